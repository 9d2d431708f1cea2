use std::env;

use crate::seed::{DEFAULT_CART_COUNT, SeedOptions};

pub const DEFAULT_SESSION_COOKIE: &str = "SESSION";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 1800;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string; the in-memory stores are used when unset.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub seed_on_startup: bool,
    pub seed: SeedOptions,
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_secs)
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parsed_var("APP_PORT").unwrap_or(3000);
        let seed_on_startup = parsed_var("SEED_ON_STARTUP").unwrap_or(true);
        let seed = SeedOptions {
            cart_count: parsed_var("SEED_CART_COUNT").unwrap_or(DEFAULT_CART_COUNT),
            rng_seed: parsed_var("SEED_RNG_SEED"),
        };
        let session = SessionConfig {
            cookie_name: env::var("SESSION_COOKIE_NAME")
                .ok()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string()),
            ttl_secs: parsed_var("SESSION_TTL_SECS")
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_SESSION_TTL_SECS),
        };
        Ok(Self {
            database_url,
            host,
            port,
            seed_on_startup,
            seed,
            session,
        })
    }

    /// The configured database URL, for tools that cannot run without one.
    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}
