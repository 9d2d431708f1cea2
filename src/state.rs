use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::SessionConfig,
    repositories::{CartRepository, InMemoryCartRepository, PgCartRepository},
    session::{InMemorySessionStore, PgSessionStore, SessionStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::Memory => "memory",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub carts: Arc<dyn CartRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub session_config: SessionConfig,
    pub backend: StoreBackend,
}

impl AppState {
    pub fn postgres(orm: DatabaseConnection, session_config: SessionConfig) -> Self {
        Self {
            carts: Arc::new(PgCartRepository::new(orm.clone())),
            sessions: Arc::new(PgSessionStore::new(orm, session_config.ttl())),
            session_config,
            backend: StoreBackend::Postgres,
        }
    }

    pub fn in_memory(session_config: SessionConfig) -> Self {
        Self {
            carts: Arc::new(InMemoryCartRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new(session_config.ttl())),
            session_config,
            backend: StoreBackend::Memory,
        }
    }
}
