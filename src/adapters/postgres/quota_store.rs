//! PostgreSQL implementation of QuotaStore.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{PlanTier, Timestamp, UserId};
use crate::domain::quota::QuotaState;
use crate::ports::{QuotaStore, QuotaStoreError};

/// PostgreSQL implementation of QuotaStore.
///
/// The upsert writes the whole row keyed by user id; concurrent
/// increments for the same user resolve last-writer-wins on the
/// anchors while the row lock keeps each write intact.
#[derive(Clone)]
pub struct PostgresQuotaStore {
    pool: PgPool,
}

impl PostgresQuotaStore {
    /// Creates a new PostgresQuotaStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuotaStore for PostgresQuotaStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<QuotaState>, QuotaStoreError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, plan_tier,
                   window_tokens_used, window_start_at,
                   tokens_used_today, last_reset_at,
                   tokens_used_this_week, last_weekly_reset_at,
                   decks_generated_today, decks_generated_this_month, last_monthly_reset_at,
                   total_tokens_used, total_messages_count
            FROM user_quotas
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| QuotaStoreError::Unavailable(format!("Failed to fetch quota: {}", e)))?;

        row.map(row_to_state).transpose()
    }

    async fn upsert(&self, state: &QuotaState) -> Result<(), QuotaStoreError> {
        sqlx::query(
            r#"
            INSERT INTO user_quotas (
                user_id, plan_tier,
                window_tokens_used, window_start_at,
                tokens_used_today, last_reset_at,
                tokens_used_this_week, last_weekly_reset_at,
                decks_generated_today, decks_generated_this_month, last_monthly_reset_at,
                total_tokens_used, total_messages_count
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE SET
                plan_tier = EXCLUDED.plan_tier,
                window_tokens_used = EXCLUDED.window_tokens_used,
                window_start_at = EXCLUDED.window_start_at,
                tokens_used_today = EXCLUDED.tokens_used_today,
                last_reset_at = EXCLUDED.last_reset_at,
                tokens_used_this_week = EXCLUDED.tokens_used_this_week,
                last_weekly_reset_at = EXCLUDED.last_weekly_reset_at,
                decks_generated_today = EXCLUDED.decks_generated_today,
                decks_generated_this_month = EXCLUDED.decks_generated_this_month,
                last_monthly_reset_at = EXCLUDED.last_monthly_reset_at,
                total_tokens_used = EXCLUDED.total_tokens_used,
                total_messages_count = EXCLUDED.total_messages_count
            "#,
        )
        .bind(state.user_id.as_str())
        .bind(state.plan_tier.as_str())
        .bind(state.window_tokens_used as i64)
        .bind(state.window_start_at.as_datetime())
        .bind(state.tokens_used_today as i64)
        .bind(state.last_reset_at.as_datetime())
        .bind(state.tokens_used_this_week as i64)
        .bind(state.last_weekly_reset_at.as_datetime())
        .bind(state.decks_generated_today as i32)
        .bind(state.decks_generated_this_month as i32)
        .bind(state.last_monthly_reset_at.as_datetime())
        .bind(state.total_tokens_used as i64)
        .bind(state.total_messages_count as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| QuotaStoreError::Unavailable(format!("Failed to upsert quota: {}", e)))?;

        Ok(())
    }
}

/// Maps a row to a QuotaState, validating persisted enums.
fn row_to_state(row: PgRow) -> Result<QuotaState, QuotaStoreError> {
    let map_err = |e: sqlx::Error| QuotaStoreError::Unavailable(format!("Bad quota row: {}", e));

    let user_id: String = row.try_get("user_id").map_err(map_err)?;
    let user_id = UserId::new(user_id)
        .map_err(|e| QuotaStoreError::Unavailable(format!("Bad quota row: {}", e)))?;
    let tier_str: String = row.try_get("plan_tier").map_err(map_err)?;
    let plan_tier = PlanTier::parse(&tier_str)
        .map_err(|e| QuotaStoreError::Unavailable(format!("Bad quota row: {}", e)))?;

    Ok(QuotaState {
        user_id,
        plan_tier,
        window_tokens_used: row.try_get::<i64, _>("window_tokens_used").map_err(map_err)? as u64,
        window_start_at: Timestamp::from_datetime(row.try_get("window_start_at").map_err(map_err)?),
        tokens_used_today: row.try_get::<i64, _>("tokens_used_today").map_err(map_err)? as u64,
        last_reset_at: Timestamp::from_datetime(row.try_get("last_reset_at").map_err(map_err)?),
        tokens_used_this_week: row
            .try_get::<i64, _>("tokens_used_this_week")
            .map_err(map_err)? as u64,
        last_weekly_reset_at: Timestamp::from_datetime(
            row.try_get("last_weekly_reset_at").map_err(map_err)?,
        ),
        decks_generated_today: row
            .try_get::<i32, _>("decks_generated_today")
            .map_err(map_err)? as u32,
        decks_generated_this_month: row
            .try_get::<i32, _>("decks_generated_this_month")
            .map_err(map_err)? as u32,
        last_monthly_reset_at: Timestamp::from_datetime(
            row.try_get("last_monthly_reset_at").map_err(map_err)?,
        ),
        total_tokens_used: row.try_get::<i64, _>("total_tokens_used").map_err(map_err)? as u64,
        total_messages_count: row
            .try_get::<i64, _>("total_messages_count")
            .map_err(map_err)? as u64,
    })
}
