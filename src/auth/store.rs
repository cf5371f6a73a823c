use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Durable storage for the token pair: two string values under fixed keys,
/// cleared together on logout. Writes must not fail the caller (logout has
/// no failure mode), so implementations log and swallow I/O trouble.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// File-backed store: a small JSON object at a fixed path, the process-local
/// analogue of the browser storage the console originally used.
pub struct FileTokenStore {
    path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl FileTokenStore {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let cache = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Token store at {} is corrupt, resetting: {e}", path.display());
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    fn flush(&self, cache: &HashMap<String, String>) {
        let bytes = match serde_json::to_vec(cache) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to serialize token store: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, bytes) {
            tracing::warn!("Failed to persist token store at {}: {e}", self.path.display());
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        let mut cache = self.cache.lock().unwrap();
        cache.insert(key.to_string(), value.to_string());
        self.flush(&cache);
    }

    fn remove(&self, key: &str) {
        let mut cache = self.cache.lock().unwrap();
        if cache.remove(key).is_some() {
            self.flush(&cache);
        }
    }
}

/// In-memory store for tests and embedders that bring their own persistence.
#[derive(Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.values.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}
