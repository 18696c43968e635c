//! Reminder scheduling.
//!
//! # Responsibility
//! - Compute the next absolute fire time for a reminder policy.
//!
//! # Invariants
//! - Computation is pure and total: no I/O, no errors, no clock reads.
//! - Lifecycle flags (`is_active`, `is_completed`) gate whether callers ask,
//!   never what the answer is.

mod next_fire;

pub use next_fire::{
    compute_next_fire_time, DEFAULT_DAILY_HOUR, DEFAULT_DAYS_BEFORE_DUE, DEFAULT_END_HOUR,
    DEFAULT_INTERVAL_MINUTES, DEFAULT_START_HOUR,
};
