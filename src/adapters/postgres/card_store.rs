//! PostgreSQL implementation of CardStore.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{CardId, CardState, DeckId, Timestamp, UserId};
use crate::domain::scheduler::{CardMemoryState, CardRecord};
use crate::ports::{CardStore, CardStoreError};

/// PostgreSQL implementation of CardStore.
///
/// Memory-state updates are single-row UPDATEs, so per-card atomicity
/// comes from Postgres row-level locking.
#[derive(Clone)]
pub struct PostgresCardStore {
    pool: PgPool,
}

impl PostgresCardStore {
    /// Creates a new PostgresCardStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CARD_COLUMNS: &str = r#"
    id, deck_id, user_id, deck_position, front, back,
    due, stability, difficulty, reps, lapses, state, last_review
"#;

#[async_trait]
impl CardStore for PostgresCardStore {
    async fn get(&self, card_id: &CardId) -> Result<Option<CardRecord>, CardStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM cards WHERE id = $1",
            CARD_COLUMNS
        ))
        .bind(card_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CardStoreError::Unavailable(format!("Failed to fetch card: {}", e)))?;

        row.map(row_to_card).transpose()
    }

    async fn update_memory_state(
        &self,
        card_id: &CardId,
        memory: CardMemoryState,
    ) -> Result<(), CardStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE cards SET
                due = $2,
                stability = $3,
                difficulty = $4,
                reps = $5,
                lapses = $6,
                state = $7,
                last_review = $8
            WHERE id = $1
            "#,
        )
        .bind(card_id.as_uuid())
        .bind(memory.due.as_datetime())
        .bind(memory.stability)
        .bind(memory.difficulty)
        .bind(memory.reps as i32)
        .bind(memory.lapses as i32)
        .bind(memory.state.as_str())
        .bind(memory.last_review.map(|ts| *ts.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| CardStoreError::Unavailable(format!("Failed to update card: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(CardStoreError::CardNotFound(card_id.to_string()));
        }

        Ok(())
    }

    async fn list_by_deck(&self, deck_id: &DeckId) -> Result<Vec<CardRecord>, CardStoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM cards WHERE deck_id = $1 ORDER BY deck_position",
            CARD_COLUMNS
        ))
        .bind(deck_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CardStoreError::Unavailable(format!("Failed to list deck cards: {}", e)))?;

        rows.into_iter().map(row_to_card).collect()
    }
}

/// Maps a row to a CardRecord, validating the persisted state string.
fn row_to_card(row: PgRow) -> Result<CardRecord, CardStoreError> {
    let map_err = |e: sqlx::Error| CardStoreError::Unavailable(format!("Bad card row: {}", e));

    let state_str: String = row.try_get("state").map_err(map_err)?;
    let state = CardState::parse(&state_str)
        .map_err(|e| CardStoreError::Unavailable(format!("Bad card row: {}", e)))?;
    let user_id: String = row.try_get("user_id").map_err(map_err)?;
    let user_id = UserId::new(user_id)
        .map_err(|e| CardStoreError::Unavailable(format!("Bad card row: {}", e)))?;

    let last_review: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("last_review").map_err(map_err)?;

    Ok(CardRecord {
        id: CardId::from_uuid(row.try_get("id").map_err(map_err)?),
        deck_id: DeckId::from_uuid(row.try_get("deck_id").map_err(map_err)?),
        user_id,
        position: row.try_get::<i32, _>("deck_position").map_err(map_err)? as u32,
        front: row.try_get("front").map_err(map_err)?,
        back: row.try_get("back").map_err(map_err)?,
        memory: CardMemoryState {
            due: Timestamp::from_datetime(row.try_get("due").map_err(map_err)?),
            stability: row.try_get("stability").map_err(map_err)?,
            difficulty: row.try_get("difficulty").map_err(map_err)?,
            reps: row.try_get::<i32, _>("reps").map_err(map_err)? as u32,
            lapses: row.try_get::<i32, _>("lapses").map_err(map_err)? as u32,
            state,
            last_review: last_review.map(Timestamp::from_datetime),
        },
    })
}
