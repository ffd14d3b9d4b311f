//! Wire types shared across upstream clients

mod message;

pub use message::{ChatMessage, MessageRole};
