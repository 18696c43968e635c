//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by the aggregator, the calendar
//!   sync and the storage boundary.
//! - Provide write-path validation for user input.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - Persisted tasks have `priority` in `1..=3`; read paths keep the raw
//!   value so that malformed rows still sort by their literal number.
//! - A task carries at most one reminder policy, and only when it has a due
//!   timestamp.

use crate::model::group::GroupId;
use crate::model::reminder::ReminderPolicy;
use crate::model::LocalTimestamp;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every task.
pub type TaskId = Uuid;

/// Identifier of the user owning a task.
pub type UserId = Uuid;

/// Task priority level.
///
/// Serialized as its integer level (`1|2|3`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i32", into = "i32")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Integer level stored in `priority_level`.
    pub fn level(self) -> i32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Maps a stored level back to a priority.
    pub fn from_level(level: i32) -> Option<Self> {
        match level {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl From<Priority> for i32 {
    fn from(value: Priority) -> Self {
        value.level()
    }
}

impl TryFrom<i32> for Priority {
    type Error = TaskValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_level(value).ok_or(TaskValidationError::PriorityOutOfRange(value))
    }
}

/// Returns the label for a raw stored level, `None` for unknown levels.
pub fn priority_label(level: i32) -> &'static str {
    Priority::from_level(level).map_or("None", Priority::label)
}

/// Validation errors for task write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `id` is nil UUID.
    NilId,
    /// Task text is empty after trim.
    BlankText,
    /// Priority level outside `1..=3`.
    PriorityOutOfRange(i32),
    /// A reminder policy was requested for a task without due timestamp.
    ReminderWithoutDueDate,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::BlankText => write!(f, "task text must not be blank"),
            Self::PriorityOutOfRange(level) => {
                write!(f, "priority level must be 1, 2 or 3, got {level}")
            }
            Self::ReminderWithoutDueDate => {
                write!(f, "a reminder requires the task to have a due date")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Field names on the wire follow the storage columns (`task`,
/// `is_complete`, `inserted_at`, ...). Ids are UUID strings and timestamps
/// are local `YYYY-MM-DDTHH:MM:SS` values without offset; rows keyed by
/// integers or stamped with an offset must be converted by the host first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    #[serde(rename = "task")]
    pub text: String,
    pub is_complete: bool,
    #[serde(rename = "inserted_at")]
    pub created_at: LocalTimestamp,
    /// "Finish by" timestamp.
    #[serde(rename = "finish_by")]
    pub due_at: Option<LocalTimestamp>,
    /// Raw priority level. See [`Priority`] for the valid set.
    #[serde(rename = "priority_level")]
    pub priority: i32,
    /// Weak reference; may point at a group that no longer exists.
    pub group_id: Option<GroupId>,
    #[serde(rename = "notifications")]
    pub reminder: Option<ReminderPolicy>,
    /// Opaque external calendar event reference, used for sync bookkeeping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_event_id: Option<String>,
}

impl Task {
    /// Creates a pending, ungrouped, low-priority task with a generated ID.
    pub fn new(user_id: UserId, text: impl Into<String>, created_at: LocalTimestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            text: text.into(),
            is_complete: false,
            created_at,
            due_at: None,
            priority: Priority::Low.level(),
            group_id: None,
            reminder: None,
            calendar_event_id: None,
        }
    }

    /// Typed priority, `None` when the stored level is malformed.
    pub fn priority_level(&self) -> Option<Priority> {
        Priority::from_level(self.priority)
    }

    /// Validates write-path invariants.
    ///
    /// # Errors
    /// - [`TaskValidationError::NilId`] for a nil id.
    /// - [`TaskValidationError::BlankText`] for whitespace-only text.
    /// - [`TaskValidationError::PriorityOutOfRange`] outside `1..=3`.
    /// - [`TaskValidationError::ReminderWithoutDueDate`] when a reminder is
    ///   attached but `due_at` is unset.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::BlankText);
        }
        if Priority::from_level(self.priority).is_none() {
            return Err(TaskValidationError::PriorityOutOfRange(self.priority));
        }
        if self.reminder.is_some() && self.due_at.is_none() {
            return Err(TaskValidationError::ReminderWithoutDueDate);
        }
        Ok(())
    }
}
