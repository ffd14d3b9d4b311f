//! Core trait for credential lookup

use thiserror::Error;

/// Errors that can occur during secret lookup
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Secret not found: {0}")]
    NotFound(String),
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Read access to API credentials
///
/// Credentials are resolved once at startup; nothing on the request path
/// calls into a store.
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Retrieve a secret by key
    ///
    /// The key can be a tool name (e.g. "inkeep") or an environment
    /// variable name (e.g. "INKEEP_API_KEY"). Empty values count as absent.
    fn get(&self, key: &str) -> Option<String>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Retrieve a secret or fail with [`SecretStoreError::NotFound`]
    fn require(&self, key: &str) -> SecretStoreResult<String> {
        self.get(key)
            .ok_or_else(|| SecretStoreError::NotFound(key.to_string()))
    }
}
