//! Group domain model.
//!
//! Groups are owned independently of tasks. A task only keeps a weak
//! `group_id` reference, which may dangle after the group is deleted.

use crate::model::LocalTimestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task group.
pub type GroupId = Uuid;

/// Named bucket a user can file tasks into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub created_at: LocalTimestamp,
    /// Display name; ordering of buckets uses this value verbatim.
    pub name: String,
    /// Optional group-level deadline. Informational only.
    pub deadline: Option<LocalTimestamp>,
}

impl Group {
    /// Creates a group with a generated stable ID and no deadline.
    pub fn new(name: impl Into<String>, created_at: LocalTimestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            name: name.into(),
            deadline: None,
        }
    }
}
