//! Per-browser session attributes, keyed by the id carried in the session cookie.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::InMemorySessionStore;
pub use postgres::PgSessionStore;

/// Attribute name to value, kept sorted so enumeration is stable.
pub type Attributes = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("malformed session data: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<String>, SessionError>;

    /// Stores `value` under `key` and pushes the session expiry forward.
    async fn set(&self, session_id: &str, key: &str, value: &str) -> Result<(), SessionError>;

    /// Names of every attribute in the session; empty for unknown or expired sessions.
    async fn attribute_names(&self, session_id: &str) -> Result<Vec<String>, SessionError>;

    /// Drops expired sessions and returns how many were removed.
    async fn delete_expired(&self) -> Result<u64, SessionError>;
}
