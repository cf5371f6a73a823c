use std::path::PathBuf;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the ETMS REST API, without a trailing slash.
    pub api_base_url: String,
    /// Where the token pair is persisted between runs.
    pub token_store_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = std::env::var("ETMS_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let token_store_path = std::env::var("ETMS_TOKEN_STORE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_store_path());

        Self {
            api_base_url,
            token_store_path,
        }
    }
}

fn default_token_store_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("etms_console_tokens.json");
    path
}
