//! Orchestration services around the pure scheduler and aggregator.
//!
//! # Responsibility
//! - Define collaborator contracts (storage, notification dispatcher,
//!   calendar) as traits.
//! - Validate input, call the core algorithms, and report collaborator
//!   failures without corrupting in-memory state.

pub mod calendar_sync;
pub mod reminder_service;
pub mod task_service;
