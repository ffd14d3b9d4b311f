//! Credential lookup
//!
//! - `SecretStore` trait for read-only lookups
//! - `EnvSecretStore` (process environment) and `MemorySecretStore` (tests)
//! - `Credential`, the redacted value handed to clients

mod traits;
mod env_store;
mod memory_store;
mod credential;

pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
pub use credential::Credential;
