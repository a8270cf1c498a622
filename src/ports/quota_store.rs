//! QuotaStore port - Per-user quota state persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::quota::QuotaState;

/// Port for quota state persistence.
///
/// Counter updates must be atomic enough that no increment is silently
/// lost (counters never go backward); last-writer-wins is acceptable
/// for the anchors.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Fetches the quota state for a user, None if never seen.
    async fn get(&self, user_id: &UserId) -> Result<Option<QuotaState>, QuotaStoreError>;

    /// Inserts or replaces the quota state for a user.
    async fn upsert(&self, state: &QuotaState) -> Result<(), QuotaStoreError>;
}

/// Errors from the quota store.
#[derive(Debug, thiserror::Error)]
pub enum QuotaStoreError {
    /// Backend read/write failure.
    #[error("quota store unavailable: {0}")]
    Unavailable(String),
}

impl From<QuotaStoreError> for DomainError {
    fn from(err: QuotaStoreError) -> Self {
        match err {
            QuotaStoreError::Unavailable(msg) => DomainError::new(ErrorCode::StoreError, msg),
        }
    }
}
