//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CardStore` - Flashcard persistence keyed by card and deck
//! - `QuotaStore` - Per-user quota state persistence
//! - `Clock` - Injectable time source for deterministic tests

mod card_store;
mod clock;
mod quota_store;

pub use card_store::{CardStore, CardStoreError};
pub use clock::{Clock, SystemClock};
pub use quota_store::{QuotaStore, QuotaStoreError};
