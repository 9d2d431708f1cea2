use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::{Attributes, SessionError, SessionStore};

#[derive(Debug, Clone)]
struct Record {
    data: Attributes,
    expiry_date: DateTime<Utc>,
}

#[derive(Debug)]
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Record>>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn live_record(&self, session_id: &str) -> Option<Record> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .filter(|record| record.expiry_date > Utc::now())
            .cloned()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self
            .live_record(session_id)
            .await
            .and_then(|record| record.data.get(key).cloned()))
    }

    async fn set(&self, session_id: &str, key: &str, value: &str) -> Result<(), SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let record = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Record {
                data: Attributes::new(),
                expiry_date: now,
            });
        if record.expiry_date <= now {
            record.data.clear();
        }
        record.data.insert(key.to_string(), value.to_string());
        record.expiry_date = now + self.ttl;
        Ok(())
    }

    async fn attribute_names(&self, session_id: &str) -> Result<Vec<String>, SessionError> {
        Ok(self
            .live_record(session_id)
            .await
            .map(|record| record.data.into_keys().collect())
            .unwrap_or_default())
    }

    async fn delete_expired(&self) -> Result<u64, SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| record.expiry_date > now);
        Ok((before - sessions.len()) as u64)
    }
}
