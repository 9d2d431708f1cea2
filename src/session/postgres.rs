use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Insert, QueryFilter, Set};

use super::{Attributes, SessionError, SessionStore};
use crate::entity::sessions::{ActiveModel, Column, Entity as Sessions};

/// Merges the new attribute into a live row; an expired row starts over.
const MERGE_DATA: &str = "CASE WHEN sessions.expiry_date > now() \
     THEN sessions.data || EXCLUDED.data ELSE EXCLUDED.data END";

/// Session store backed by the `sessions` table; attributes are a JSONB object.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    orm: DatabaseConnection,
    ttl: Duration,
}

impl PgSessionStore {
    pub fn new(orm: DatabaseConnection, ttl: Duration) -> Self {
        Self { orm, ttl }
    }

    async fn load(&self, session_id: &str) -> Result<Attributes, SessionError> {
        let record = Sessions::find_by_id(session_id.to_string())
            .filter(Column::ExpiryDate.gt(Utc::now()))
            .one(&self.orm)
            .await?;
        match record {
            Some(model) => Ok(serde_json::from_value(model.data)?),
            None => Ok(Attributes::new()),
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<String>, SessionError> {
        let mut data = self.load(session_id).await?;
        Ok(data.remove(key))
    }

    async fn set(&self, session_id: &str, key: &str, value: &str) -> Result<(), SessionError> {
        upsert_attribute(session_id, key, value, Utc::now() + self.ttl)?
            .exec(&self.orm)
            .await?;
        Ok(())
    }

    async fn attribute_names(&self, session_id: &str) -> Result<Vec<String>, SessionError> {
        Ok(self.load(session_id).await?.into_keys().collect())
    }

    async fn delete_expired(&self) -> Result<u64, SessionError> {
        let result = Sessions::delete_many()
            .filter(Column::ExpiryDate.lte(Utc::now()))
            .exec(&self.orm)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Single-statement write of one attribute, so concurrent writers of other
/// keys in the same session are not overwritten.
fn upsert_attribute(
    session_id: &str,
    key: &str,
    value: &str,
    expires_at: DateTime<Utc>,
) -> Result<Insert<ActiveModel>, SessionError> {
    let data = Attributes::from([(key.to_string(), value.to_string())]);
    let active = ActiveModel {
        id: Set(session_id.to_string()),
        data: Set(serde_json::to_value(&data)?),
        expiry_date: Set(expires_at.fixed_offset()),
    };
    Ok(Sessions::insert(active).on_conflict(
        OnConflict::column(Column::Id)
            .value(Column::Data, Expr::cust(MERGE_DATA))
            .update_column(Column::ExpiryDate)
            .to_owned(),
    ))
}
