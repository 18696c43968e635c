//! Task aggregation for display.
//!
//! # Responsibility
//! - Partition a flat task list into ordered, filtered display buckets.
//! - Provide the secondary list views (today, upcoming).
//!
//! # Invariants
//! - Output is a pure function of the inputs; identical inputs yield
//!   structurally equal outputs.
//! - Dangling group references are filed as ungrouped, never dropped.
//! - All sorts are stable.

mod buckets;
mod views;

pub use buckets::{
    compare_display_order, compare_group_names, group_tasks, DisplayBucket, UNGROUPED_BUCKET_NAME,
};
pub use views::{tasks_created_on, upcoming_tasks};
