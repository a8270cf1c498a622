//! In-memory quota store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::quota::QuotaState;
use crate::ports::{QuotaStore, QuotaStoreError};

/// Quota store backed by a map guarded by a single lock.
#[derive(Debug, Default)]
pub struct InMemoryQuotaStore {
    states: Arc<RwLock<HashMap<UserId, QuotaState>>>,
    fail_reads: Arc<RwLock<bool>>,
}

impl InMemoryQuotaStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent reads fail, for fail-open tests.
    pub async fn poison_reads(&self) {
        *self.fail_reads.write().await = true;
    }

    /// Restores normal reads.
    pub async fn heal_reads(&self) {
        *self.fail_reads.write().await = false;
    }
}

#[async_trait]
impl QuotaStore for InMemoryQuotaStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<QuotaState>, QuotaStoreError> {
        if *self.fail_reads.read().await {
            return Err(QuotaStoreError::Unavailable("simulated outage".to_string()));
        }
        Ok(self.states.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, state: &QuotaState) -> Result<(), QuotaStoreError> {
        self.states
            .write()
            .await
            .insert(state.user_id.clone(), state.clone());
        Ok(())
    }
}
