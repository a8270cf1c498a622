//! In-memory adapters for testing and single-node deployments.

mod card_store;
mod quota_store;

pub use card_store::InMemoryCardStore;
pub use quota_store::InMemoryQuotaStore;
