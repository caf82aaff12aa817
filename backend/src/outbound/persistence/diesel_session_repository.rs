//! PostgreSQL-backed `SessionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionPersistenceError, SessionRepository};
use crate::domain::{SessionDigest, SessionRecord, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewSessionRow, SessionRow};
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

/// Diesel-backed implementation of the session repository port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionPersistenceError {
    map_basic_pool_error(error, SessionPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SessionPersistenceError {
    map_basic_diesel_error(
        error,
        SessionPersistenceError::query,
        SessionPersistenceError::connection,
    )
}

fn row_to_record(row: SessionRow) -> SessionRecord {
    SessionRecord::new(
        SessionDigest::from_stored(row.token_digest),
        UserId::from_uuid(row.user_id),
        row.created_at,
        row.expires_at,
    )
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn insert(&self, record: &SessionRecord) -> Result<(), SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewSessionRow {
            token_digest: record.digest().as_str(),
            user_id: *record.user_id().as_uuid(),
            created_at: record.created_at(),
            expires_at: record.expires_at(),
        };

        diesel::insert_into(sessions::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find(
        &self,
        digest: &SessionDigest,
    ) -> Result<Option<SessionRecord>, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sessions::table
            .find(digest.as_str())
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_record))
    }

    async fn delete(&self, digest: &SessionDigest) -> Result<(), SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(sessions::table.find(digest.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
