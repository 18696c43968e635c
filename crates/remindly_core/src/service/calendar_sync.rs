//! Calendar mirroring for dated tasks.
//!
//! # Responsibility
//! - Build calendar event descriptors from tasks.
//! - Mirror pending dated tasks into the platform calendar and remove events
//!   of completed tasks.
//!
//! # Invariants
//! - A stored event reference that no longer resolves is recreated, not
//!   reported as an error.
//! - One task failing never aborts the rest of the run.
//! - Core does not persist reference changes; they are returned to the caller.

use crate::model::group::{Group, GroupId};
use crate::model::task::{priority_label, Task, TaskId};
use crate::model::LocalTimestamp;
use chrono::Duration;
use log::{info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque platform calendar event id.
pub type CalendarEventId = String;

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Length of a mirrored task event.
pub const EVENT_DURATION_MINUTES: i64 = 30;
/// Alarm offset relative to event start.
pub const ALARM_OFFSET_MINUTES: i64 = -30;

/// Calendar provider failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    NotFound(CalendarEventId),
    PermissionDenied,
    Platform(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "calendar event not found: {id}"),
            Self::PermissionDenied => write!(f, "calendar permission denied"),
            Self::Platform(message) => write!(f, "calendar platform failure: {message}"),
        }
    }
}

impl Error for CalendarError {}

/// Event fields written to the platform calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEventDraft {
    pub title: String,
    pub notes: String,
    pub start: LocalTimestamp,
    pub end: LocalTimestamp,
    pub alarm_offset_minutes: i64,
}

impl CalendarEventDraft {
    /// Builds the event for a dated task; `None` when the task has no due
    /// timestamp.
    pub fn for_task(task: &Task, group_name: Option<&str>) -> Option<Self> {
        let start = task.due_at?;
        let mut notes = format!("Priority: {}", priority_label(task.priority));
        if let Some(name) = group_name {
            notes.push_str("\nGroup: ");
            notes.push_str(name);
        }
        Some(Self {
            title: task.text.clone(),
            notes,
            start,
            end: start
                .checked_add_signed(Duration::minutes(EVENT_DURATION_MINUTES))
                .unwrap_or(start),
            alarm_offset_minutes: ALARM_OFFSET_MINUTES,
        })
    }
}

/// Platform calendar capability.
pub trait CalendarProvider {
    fn event_exists(&self, id: &str) -> CalendarResult<bool>;
    fn create_event(&self, draft: &CalendarEventDraft) -> CalendarResult<CalendarEventId>;
    fn update_event(&self, id: &str, draft: &CalendarEventDraft) -> CalendarResult<()>;
    fn delete_event(&self, id: &str) -> CalendarResult<()>;
}

/// Reference change the caller must persist on the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarChange {
    Linked {
        task_id: TaskId,
        event_id: CalendarEventId,
    },
    Unlinked {
        task_id: TaskId,
    },
}

/// Summary of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarSyncReport {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
    pub changes: Vec<CalendarChange>,
    pub failures: Vec<(TaskId, CalendarError)>,
}

/// Calendar sync facade over a provider implementation.
pub struct CalendarSync<C: CalendarProvider> {
    provider: C,
}

impl<C: CalendarProvider> CalendarSync<C> {
    pub fn new(provider: C) -> Self {
        Self { provider }
    }

    /// Mirrors `tasks` into the calendar.
    ///
    /// - Pending tasks with a due timestamp get their event updated, or
    ///   created when they have none or the stored one is gone.
    /// - Completed tasks holding an event reference get the event deleted.
    pub fn sync(&self, tasks: &[Task], groups: &[Group]) -> CalendarSyncReport {
        let group_names = groups
            .iter()
            .map(|group| (group.id, group.name.as_str()))
            .collect::<HashMap<GroupId, &str>>();
        let mut report = CalendarSyncReport::default();

        for task in tasks.iter().filter(|task| !task.is_complete) {
            let group_name = task
                .group_id
                .and_then(|id| group_names.get(&id).copied());
            let Some(draft) = CalendarEventDraft::for_task(task, group_name) else {
                continue;
            };
            if let Err(err) = self.mirror_task(task, &draft, &mut report) {
                warn!(
                    "event=calendar_sync module=calendar status=error task_id={} error={}",
                    task.id, err
                );
                report.failures.push((task.id, err));
            }
        }

        for task in tasks.iter().filter(|task| task.is_complete) {
            let Some(event_id) = task.calendar_event_id.as_deref() else {
                continue;
            };
            match self.provider.delete_event(event_id) {
                Ok(()) | Err(CalendarError::NotFound(_)) => {
                    report.removed += 1;
                    report
                        .changes
                        .push(CalendarChange::Unlinked { task_id: task.id });
                }
                Err(err) => {
                    warn!(
                        "event=calendar_cleanup module=calendar status=error task_id={} error={}",
                        task.id, err
                    );
                    report.failures.push((task.id, err));
                }
            }
        }

        info!(
            "event=calendar_sync module=calendar status=ok created={} updated={} removed={} failed={}",
            report.created,
            report.updated,
            report.removed,
            report.failures.len()
        );
        report
    }

    fn mirror_task(
        &self,
        task: &Task,
        draft: &CalendarEventDraft,
        report: &mut CalendarSyncReport,
    ) -> CalendarResult<()> {
        if let Some(event_id) = task.calendar_event_id.as_deref() {
            if self.try_update(event_id, draft)? {
                report.updated += 1;
                return Ok(());
            }
        }

        let event_id = self.provider.create_event(draft)?;
        report.created += 1;
        report.changes.push(CalendarChange::Linked {
            task_id: task.id,
            event_id,
        });
        Ok(())
    }

    /// Returns `false` when the event no longer exists.
    fn try_update(&self, event_id: &str, draft: &CalendarEventDraft) -> CalendarResult<bool> {
        let exists = match self.provider.event_exists(event_id) {
            Ok(exists) => exists,
            Err(CalendarError::NotFound(_)) => false,
            Err(err) => return Err(err),
        };
        if !exists {
            return Ok(false);
        }
        match self.provider.update_event(event_id, draft) {
            Ok(()) => Ok(true),
            Err(CalendarError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
