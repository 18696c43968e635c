//! Task use-case service.
//!
//! # Responsibility
//! - Validate user input before it reaches storage or the scheduler.
//! - Delegate persistence to a [`TaskStore`] implementation.
//! - Produce the grouped board view for presentation layers.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before the store is touched.
//! - A new reminder policy always leaves with `next_notification_at` set.
//! - Store failures are logged and returned; in-memory state is not mutated.

use crate::aggregate::{group_tasks, DisplayBucket};
use crate::model::group::{Group, GroupId};
use crate::model::reminder::{ReminderFrequency, ReminderPolicy, ReminderSettings};
use crate::model::task::{Priority, Task, TaskId, TaskValidationError, UserId};
use crate::model::LocalTimestamp;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Record keyed by this id does not exist.
    NotFound(Uuid),
    /// Backend refused the call (auth/row-level policy).
    Denied(String),
    /// Network or backend failure.
    Transport(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Denied(message) => write!(f, "storage access denied: {message}"),
            Self::Transport(message) => write!(f, "storage transport failure: {message}"),
        }
    }
}

impl Error for StoreError {}

/// Storage contract for tasks and groups.
pub trait TaskStore {
    fn list_tasks(&self, user_id: UserId) -> StoreResult<Vec<Task>>;
    fn list_groups(&self) -> StoreResult<Vec<Group>>;
    fn create_task(&self, task: &Task) -> StoreResult<TaskId>;
    fn update_task(&self, task: &Task) -> StoreResult<()>;
    fn delete_task(&self, id: TaskId) -> StoreResult<()>;
    fn create_group(&self, group: &Group) -> StoreResult<GroupId>;
}

/// Errors from task service operations.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Input failed task validation.
    Validation(TaskValidationError),
    /// Group name is blank after trim.
    BlankGroupName,
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Storage-layer failure.
    Store(StoreError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::BlankGroupName => write!(f, "group name must not be blank"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for TaskServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Reminder requested alongside a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub frequency: ReminderFrequency,
    pub settings: ReminderSettings,
}

/// Request model for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub due_at: Option<LocalTimestamp>,
    pub group_id: Option<GroupId>,
    pub priority: Priority,
    pub reminder: Option<ReminderRequest>,
}

/// Task service facade over storage implementations.
pub struct TaskService<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new task, attaching a fresh reminder policy
    /// when one is requested.
    ///
    /// # Errors
    /// - `Validation` for blank text or a reminder without due date.
    /// - `Store` when persistence fails.
    pub fn create_task(
        &self,
        user_id: UserId,
        request: NewTask,
        now: LocalTimestamp,
    ) -> Result<Task, TaskServiceError> {
        let mut task = Task::new(user_id, request.text.trim(), now);
        task.due_at = request.due_at;
        task.group_id = request.group_id;
        task.priority = request.priority.level();

        if let Some(reminder) = request.reminder {
            let due_at = request
                .due_at
                .ok_or(TaskServiceError::Validation(
                    TaskValidationError::ReminderWithoutDueDate,
                ))?;
            task.reminder = Some(ReminderPolicy::new(
                task.text.clone(),
                format!("Due {}", due_at.format("%Y-%m-%d %H:%M")),
                reminder.frequency,
                due_at,
                reminder.settings,
                now,
            ));
        }
        task.validate()?;

        self.store.create_task(&task).map_err(|err| {
            error!(
                "event=task_create module=service status=error task_id={} error={}",
                task.id, err
            );
            TaskServiceError::from(err)
        })?;
        info!(
            "event=task_create module=service status=ok task_id={} priority={} reminder={}",
            task.id,
            task.priority,
            task.reminder
                .as_ref()
                .map_or("none", |policy| policy.frequency.as_str())
        );
        Ok(task)
    }

    /// Replaces a task after validation.
    pub fn update_task(&self, task: &Task) -> Result<(), TaskServiceError> {
        task.validate()?;
        self.store.update_task(task).map_err(Into::into)
    }

    /// Toggles completion; the attached reminder is completed or reopened
    /// with it.
    pub fn set_complete(
        &self,
        task: &Task,
        done: bool,
        now: LocalTimestamp,
    ) -> Result<Task, TaskServiceError> {
        let mut updated = task.clone();
        updated.is_complete = done;
        if let Some(policy) = updated.reminder.as_mut() {
            if done {
                policy.complete(now);
            } else if policy.is_completed {
                policy.reopen(now);
            }
        }
        self.update_task(&updated)?;
        Ok(updated)
    }

    /// Deletes a task by id.
    pub fn delete_task(&self, id: TaskId) -> Result<(), TaskServiceError> {
        self.store.delete_task(id).map_err(Into::into)
    }

    /// Creates a group with a trimmed, non-blank name.
    pub fn create_group(
        &self,
        name: impl Into<String>,
        deadline: Option<LocalTimestamp>,
        now: LocalTimestamp,
    ) -> Result<Group, TaskServiceError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TaskServiceError::BlankGroupName);
        }
        let mut group = Group::new(trimmed, now);
        group.deadline = deadline;
        self.store.create_group(&group)?;
        Ok(group)
    }

    /// Loads all tasks of `user_id` and groups them for display.
    pub fn load_board(&self, user_id: UserId) -> Result<Vec<DisplayBucket>, TaskServiceError> {
        let tasks = self.store.list_tasks(user_id).map_err(|err| {
            error!("event=board_load module=service status=error stage=tasks error={err}");
            TaskServiceError::Store(err)
        })?;
        let groups = self.store.list_groups().map_err(|err| {
            error!("event=board_load module=service status=error stage=groups error={err}");
            TaskServiceError::Store(err)
        })?;
        let buckets = group_tasks(&tasks, &groups);
        info!(
            "event=board_load module=service status=ok tasks={} groups={} buckets={}",
            tasks.len(),
            groups.len(),
            buckets.len()
        );
        Ok(buckets)
    }
}
