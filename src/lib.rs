//! Study Coach - Educational Tutoring Platform Core
//!
//! This crate implements the two scheduling-shaped subsystems of the
//! platform: the FSRS-based flashcard review scheduler and the
//! token/deck quota manager that gates expensive tutoring operations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod observability;
pub mod ports;
