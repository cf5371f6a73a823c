use crate::auth::session::SessionManager;
use crate::auth::store::{FileTokenStore, TokenStore};
use crate::client::transport::{HttpTransport, Transport};
use crate::client::ApiClient;
use crate::config::Config;
use std::sync::Arc;

/// The console aggregate: one instance wired up at startup, torn down at
/// shutdown. Everything downstream borrows the session and the API client
/// from here instead of reaching for ambient state.
pub struct Console {
    config: Config,
    session: Arc<SessionManager>,
    api: ApiClient,
}

impl Console {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(Config::from_env())
    }

    pub fn new(config: Config) -> anyhow::Result<Self> {
        let transport: Arc<dyn Transport> =
            Arc::new(HttpTransport::new(config.api_base_url.clone())?);
        let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&config.token_store_path)?);
        Ok(Self::with_parts(config, transport, store))
    }

    /// Assemble from explicit collaborators; the seam embedders and tests
    /// use to swap the wire or the storage out.
    pub fn with_parts(
        config: Config,
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let session = Arc::new(SessionManager::new(transport.clone(), store));
        let api = ApiClient::new(transport, session.clone());
        Self {
            config,
            session,
            api,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
