use crate::auth::claims::{self, AccessClaims};
use crate::auth::store::{TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::client::transport::{ApiRequest, Transport, TransportError};
use crate::domain::models::Role;
use crate::error::Error;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const TOKEN_PATH: &str = "/users/token/";
pub const TOKEN_REFRESH_PATH: &str = "/users/token/refresh/";

/// The decoded, trusted-for-display identity behind the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<AccessClaims> for Identity {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Authenticated(Identity),
    Anonymous,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self, SessionState::Uninitialized | SessionState::Loading)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct TokenPairResponse {
    access: String,
    refresh: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Owns the access/refresh token pair and the identity derived from it.
/// Exactly one instance exists for the life of the process; everything else
/// reads the session through it and only it writes the stored tokens.
pub struct SessionManager {
    transport: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            transport,
            store,
            state: RwLock::new(SessionState::Uninitialized),
        }
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.state.read().await.identity().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// The token attached as a bearer credential to every API call.
    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    /// Exchange credentials for a token pair. A rejection leaves the session
    /// and the store exactly as they were.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, Error> {
        let request = ApiRequest::new(Method::POST, TOKEN_PATH)
            .with_body(json!({ "email": email, "password": password }));
        let response = self.transport.execute(request).await?;

        if response.status == 400 || response.status == 401 {
            tracing::info!("Login rejected for {email}");
            return Err(Error::InvalidCredentials);
        }
        if !response.is_success() {
            return Err(Error::Api {
                status: response.status,
                detail: response.detail(),
            });
        }

        let pair: TokenPairResponse = serde_json::from_value(response.body)
            .map_err(|_| TransportError::new("token endpoint returned a malformed pair"))?;

        // Decode before persisting so a bad token never leaves partial state.
        let claims = claims::decode(&pair.access)?;
        self.store.put(ACCESS_TOKEN_KEY, &pair.access);
        self.store.put(REFRESH_TOKEN_KEY, &pair.refresh);

        let identity = Identity::from(claims);
        *self.state.write().await = SessionState::Authenticated(identity.clone());
        tracing::info!("Signed in as {} ({})", identity.email, identity.role.as_str());
        Ok(identity)
    }

    /// Resolve any persisted token into a session. Runs once at startup and
    /// always settles into Authenticated or Anonymous, never Loading.
    pub async fn initialize(&self) {
        *self.state.write().await = SessionState::Loading;

        let Some(token) = self.store.get(ACCESS_TOKEN_KEY) else {
            *self.state.write().await = SessionState::Anonymous;
            return;
        };

        match claims::decode(&token) {
            Ok(claims) if claims.is_expired() => {
                // refresh() settles the state on both outcomes.
                if self.refresh().await.is_err() {
                    tracing::info!("Persisted session expired and could not be refreshed");
                }
            }
            Ok(claims) => {
                *self.state.write().await = SessionState::Authenticated(Identity::from(claims));
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable persisted token: {e}");
                self.logout().await;
            }
        }
    }

    /// Trade the refresh token for a new access token. Every failure path
    /// (missing credential, rejection, network trouble) logs the session out.
    pub async fn refresh(&self) -> Result<Identity, Error> {
        let Some(refresh) = self.store.get(REFRESH_TOKEN_KEY) else {
            self.logout().await;
            return Err(Error::SessionExpired);
        };

        let request = ApiRequest::new(Method::POST, TOKEN_REFRESH_PATH)
            .with_body(json!({ "refresh": refresh }));

        let accepted = match self.transport.execute(request).await {
            Ok(response) if response.is_success() => {
                serde_json::from_value::<RefreshResponse>(response.body).ok()
            }
            Ok(response) => {
                tracing::info!("Refresh rejected with status {}", response.status);
                None
            }
            Err(e) => {
                tracing::warn!("Refresh request failed: {e}");
                None
            }
        };

        let Some(RefreshResponse { access }) = accepted else {
            self.logout().await;
            return Err(Error::SessionExpired);
        };

        let claims = match claims::decode(&access) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("Refreshed token is unreadable: {e}");
                self.logout().await;
                return Err(Error::SessionExpired);
            }
        };

        self.store.put(ACCESS_TOKEN_KEY, &access);
        let identity = Identity::from(claims);
        *self.state.write().await = SessionState::Authenticated(identity.clone());
        Ok(identity)
    }

    /// Clear both stored tokens and the in-memory identity. Never fails.
    pub async fn logout(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        *self.state.write().await = SessionState::Anonymous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::testing::make_token;
    use crate::auth::store::MemoryTokenStore;
    use crate::client::transport::testing::FakeTransport;
    use chrono::Utc;

    fn fresh_exp() -> i64 {
        Utc::now().timestamp() + 3_600
    }

    fn stale_exp() -> i64 {
        Utc::now().timestamp() - 3_600
    }

    fn manager() -> (Arc<FakeTransport>, Arc<MemoryTokenStore>, SessionManager) {
        let transport = Arc::new(FakeTransport::new());
        let store = Arc::new(MemoryTokenStore::new());
        let session = SessionManager::new(transport.clone(), store.clone());
        (transport, store, session)
    }

    #[tokio::test]
    async fn login_decodes_the_issued_role() {
        let (transport, store, session) = manager();
        let access = make_token("9", "hr@example.com", "Pat", Role::Hr, fresh_exp());
        transport.push_json(200, json!({ "access": access, "refresh": "refresh-1" }));

        let identity = session.login("hr@example.com", "x").await.unwrap();
        assert_eq!(identity.role, Role::Hr);
        assert!(session.is_authenticated().await);
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some(access));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-1"));

        let sent = transport.requests();
        assert_eq!(sent[0].path, TOKEN_PATH);
        assert!(sent[0].bearer.is_none());
    }

    #[tokio::test]
    async fn rejected_login_changes_nothing() {
        let (transport, store, session) = manager();
        transport.push_json(401, json!({ "detail": "No active account" }));

        let err = session.login("hr@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
        assert_eq!(session.state().await, SessionState::Uninitialized);
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn login_with_unreadable_token_persists_nothing() {
        let (transport, store, session) = manager();
        transport.push_json(200, json!({ "access": "not-a-token", "refresh": "r" }));

        assert!(matches!(
            session.login("a@example.com", "x").await,
            Err(Error::Token(_))
        ));
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn initialize_without_token_is_anonymous() {
        let (transport, _store, session) = manager();
        session.initialize().await;
        assert_eq!(session.state().await, SessionState::Anonymous);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn initialize_with_valid_token_needs_no_network() {
        let (transport, store, session) = manager();
        store.put(
            ACCESS_TOKEN_KEY,
            &make_token("3", "e@example.com", "E", Role::Employee, fresh_exp()),
        );

        session.initialize().await;
        let identity = session.identity().await.unwrap();
        assert_eq!(identity.user_id, "3");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn initialize_refreshes_an_expired_token() {
        let (transport, store, session) = manager();
        store.put(
            ACCESS_TOKEN_KEY,
            &make_token("3", "e@example.com", "E", Role::Employee, stale_exp()),
        );
        store.put(REFRESH_TOKEN_KEY, "refresh-ok");
        let renewed = make_token("3", "e@example.com", "E", Role::Employee, fresh_exp());
        transport.push_json(200, json!({ "access": renewed }));

        session.initialize().await;
        assert!(session.is_authenticated().await);
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some(renewed));
        assert_eq!(transport.requests()[0].path, TOKEN_REFRESH_PATH);
    }

    #[tokio::test]
    async fn initialize_with_dead_refresh_clears_everything() {
        let (transport, store, session) = manager();
        store.put(
            ACCESS_TOKEN_KEY,
            &make_token("3", "e@example.com", "E", Role::Employee, stale_exp()),
        );
        store.put(REFRESH_TOKEN_KEY, "refresh-dead");
        transport.push_json(401, json!({ "detail": "Token is invalid or expired" }));

        session.initialize().await;
        assert_eq!(session.state().await, SessionState::Anonymous);
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn initialize_discards_a_malformed_token() {
        let (transport, store, session) = manager();
        store.put(ACCESS_TOKEN_KEY, "garbage");
        store.put(REFRESH_TOKEN_KEY, "refresh");

        session.initialize().await;
        assert_eq!(session.state().await, SessionState::Anonymous);
        assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn refresh_without_credential_expires_the_session() {
        let (_transport, _store, session) = manager();
        let err = session.refresh().await.unwrap_err();
        assert!(matches!(err, Error::SessionExpired));
        assert_eq!(session.state().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn refresh_failure_on_network_error_logs_out() {
        let (transport, store, session) = manager();
        store.put(REFRESH_TOKEN_KEY, "refresh");
        transport.push_error("connection reset");

        assert!(matches!(
            session.refresh().await,
            Err(Error::SessionExpired)
        ));
        assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn logout_clears_tokens_and_identity() {
        let (transport, store, session) = manager();
        let access = make_token("9", "hr@example.com", "Pat", Role::Hr, fresh_exp());
        transport.push_json(200, json!({ "access": access, "refresh": "r" }));
        session.login("hr@example.com", "x").await.unwrap();

        session.logout().await;
        assert_eq!(session.state().await, SessionState::Anonymous);
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
    }
}
