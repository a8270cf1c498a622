//! Adapters - Implementations of the ports.
//!
//! In-memory adapters back tests and single-node deployments; the
//! Postgres adapters are the production persistence layer.

pub mod clock;
pub mod memory;
pub mod postgres;
pub mod random;

pub use clock::FixedClock;
pub use memory::{InMemoryCardStore, InMemoryQuotaStore};
pub use random::{SeededRandom, ThreadRandom};
