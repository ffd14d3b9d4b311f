//! Credential newtype

use std::fmt;

use super::traits::SecretStore;

/// A bearer credential for an upstream service
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Resolve a credential from a store; absent or empty yields `None`
    pub fn resolve(store: &dyn SecretStore, key: &str) -> Option<Self> {
        store.get(key).map(Self)
    }

    /// The raw secret, for building an Authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
