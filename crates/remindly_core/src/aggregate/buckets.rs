//! Group-bucket aggregation.

use crate::model::group::{Group, GroupId};
use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Display name of the synthetic bucket holding ungrouped tasks.
pub const UNGROUPED_BUCKET_NAME: &str = "Not Grouped";

const UNGROUPED_SLOT: usize = 0;

/// One display section: a group (or the ungrouped sentinel) and its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBucket {
    /// Group id, `None` for the synthetic ungrouped bucket.
    pub id: Option<GroupId>,
    pub name: String,
    /// Incomplete tasks, priority desc then newest first.
    pub pending: Vec<Task>,
    /// Completed tasks, same ordering as `pending`.
    pub done: Vec<Task>,
}

impl DisplayBucket {
    fn ungrouped() -> Self {
        Self {
            id: None,
            name: UNGROUPED_BUCKET_NAME.to_string(),
            pending: Vec::new(),
            done: Vec::new(),
        }
    }

    fn for_group(group: &Group) -> Self {
        Self {
            id: Some(group.id),
            name: group.name.clone(),
            pending: Vec::new(),
            done: Vec::new(),
        }
    }

    /// Whether this is the synthetic ungrouped bucket.
    pub fn is_ungrouped(&self) -> bool {
        self.id.is_none()
    }

    /// Total task count across both sub-lists.
    pub fn len(&self) -> usize {
        self.pending.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.done.is_empty()
    }

    fn file(&mut self, task: &Task) {
        if task.is_complete {
            self.done.push(task.clone());
        } else {
            self.pending.push(task.clone());
        }
    }
}

/// Groups `tasks` into display buckets.
///
/// Rules:
/// - one bucket per group plus the synthetic "Not Grouped" bucket;
/// - tasks with no group, or a group id missing from `groups`, go to the
///   synthetic bucket;
/// - each sub-list is stably sorted by [`compare_display_order`];
/// - empty buckets are dropped;
/// - the synthetic bucket comes first, the rest by [`compare_group_names`],
///   equal names in input order.
///
/// When `groups` repeats an id, the bucket keeps its first position and the
/// last name.
pub fn group_tasks(tasks: &[Task], groups: &[Group]) -> Vec<DisplayBucket> {
    let mut buckets = Vec::with_capacity(groups.len() + 1);
    buckets.push(DisplayBucket::ungrouped());

    let mut slot_by_group: HashMap<GroupId, usize> = HashMap::with_capacity(groups.len());
    for group in groups {
        match slot_by_group.get(&group.id) {
            Some(&slot) => buckets[slot].name.clone_from(&group.name),
            None => {
                slot_by_group.insert(group.id, buckets.len());
                buckets.push(DisplayBucket::for_group(group));
            }
        }
    }

    for task in tasks {
        let slot = task
            .group_id
            .and_then(|group_id| slot_by_group.get(&group_id).copied())
            .unwrap_or(UNGROUPED_SLOT);
        buckets[slot].file(task);
    }

    for bucket in &mut buckets {
        bucket.pending.sort_by(compare_display_order);
        bucket.done.sort_by(compare_display_order);
    }

    buckets.retain(|bucket| !bucket.is_empty());
    buckets.sort_by(compare_buckets);
    buckets
}

/// Task ordering inside a bucket: priority descending, then creation
/// timestamp descending. Out-of-range priorities compare by raw value.
pub fn compare_display_order(left: &Task, right: &Task) -> Ordering {
    right
        .priority
        .cmp(&left.priority)
        .then_with(|| right.created_at.cmp(&left.created_at))
}

fn compare_buckets(left: &DisplayBucket, right: &DisplayBucket) -> Ordering {
    match (left.is_ungrouped(), right.is_ungrouped()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => compare_group_names(&left.name, &right.name),
    }
}

/// Dictionary order for group names: letters compare case-insensitively,
/// and names differing only in case put lowercase first (`"home"` <
/// `"Home"` < `"Work"`).
pub fn compare_group_names(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
        .then_with(|| right.cmp(left))
}
