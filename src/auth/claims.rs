use crate::domain::models::Role;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token format")]
    Malformed,
    #[error("token payload is not valid json")]
    Payload,
}

/// Claims carried by an access token. Decoded without signature
/// verification: the server re-checks the token on every request, so the
/// claims only drive display and route decisions on this side.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    #[serde(deserialize_with = "string_or_int")]
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

impl AccessClaims {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Decode the payload segment of a `header.payload.signature` token.
pub fn decode(token: &str) -> Result<AccessClaims, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::Malformed);
    }
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&payload_bytes).map_err(|_| TokenError::Payload)
}

/// The issuer serializes subject ids as integers; tolerate both forms.
fn string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use serde_json::json;

    /// Build a decodable token for tests. The signature segment is junk;
    /// nothing in this crate verifies it.
    pub(crate) fn make_token(
        user_id: &str,
        email: &str,
        name: &str,
        role: Role,
        exp: i64,
    ) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD
            .encode(json!({"alg": "HS256", "typ": "JWT"}).to_string());
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(
            json!({
                "user_id": user_id,
                "email": email,
                "name": name,
                "role": role.as_str(),
                "exp": exp,
            })
            .to_string(),
        );
        format!("{header}.{payload}.sig")
    }
}
