//! Domain model for tasks, groups and reminder policies.
//!
//! # Responsibility
//! - Define canonical data structures consumed by the scheduler, the
//!   aggregator and the service layer.
//! - Keep serialized field names aligned with the storage wire shape.
//!
//! # Invariants
//! - Every task and group is identified by a stable `Uuid`.
//! - All timestamps are local wall-clock values; no zone conversion happens
//!   inside core.

use chrono::NaiveDateTime;

pub mod group;
pub mod reminder;
pub mod task;

/// Local wall-clock timestamp used across the core.
///
/// Callers convert from their platform clock before entering core; all date
/// arithmetic then happens on wall-clock fields.
pub type LocalTimestamp = NaiveDateTime;
