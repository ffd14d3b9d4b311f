//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::SecretStore;

/// Mapping from tool names to environment variable names
static ENV_VAR_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("inkeep", "INKEEP_API_KEY");
    m.insert("jina", "JINA_API_KEY");
    m
});

/// Secret store backed by process environment variables
///
/// Binaries load `.env` with dotenvy before resolving, so values from a
/// `.env` file are visible here too.
///
/// # Example
///
/// ```
/// use inkbridge_core::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::new();
/// // Both read INKEEP_API_KEY
/// let a = store.get("inkeep");
/// let b = store.get("INKEEP_API_KEY");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (),
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Environment variable consulted for a tool name
    pub fn env_var_for(tool: &str) -> Option<&'static str> {
        ENV_VAR_MAP.get(tool.to_lowercase().as_str()).copied()
    }

    fn read(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = Self::read(key) {
            return Some(value);
        }

        if let Some(var) = Self::env_var_for(key) {
            if let Some(value) = Self::read(var) {
                return Some(value);
            }
        }

        Self::read(&format!("{}_API_KEY", key.to_uppercase()))
    }
}
