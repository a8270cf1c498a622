//! PostgreSQL adapters - Production persistence.

mod card_store;
mod quota_store;

pub use card_store::PostgresCardStore;
pub use quota_store::PostgresQuotaStore;
