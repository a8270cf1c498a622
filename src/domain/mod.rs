//! Domain layer - Pure business logic.
//!
//! Contains the foundation value objects, the review scheduler, and the
//! quota manager. Nothing in this layer performs I/O; persistence and
//! clocks are injected through ports.

pub mod foundation;
pub mod quota;
pub mod scheduler;
