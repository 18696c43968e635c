//! Core domain logic for Remindly.
//! Reminder scheduling, task aggregation, and the service layer that wires
//! them to storage, notification and calendar collaborators.

pub mod aggregate;
pub mod config;
pub mod logging;
pub mod model;
pub mod schedule;
pub mod service;

pub use aggregate::{
    compare_display_order, compare_group_names, group_tasks, tasks_created_on, upcoming_tasks,
    DisplayBucket, UNGROUPED_BUCKET_NAME,
};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::group::{Group, GroupId};
pub use model::reminder::{
    ReminderFrequency, ReminderId, ReminderPolicy, ReminderSettings, TimeOfDay, TimeOfDayError,
};
pub use model::task::{priority_label, Priority, Task, TaskId, TaskValidationError, UserId};
pub use model::LocalTimestamp;
pub use schedule::compute_next_fire_time;
pub use service::calendar_sync::{
    CalendarChange, CalendarError, CalendarEventDraft, CalendarEventId, CalendarProvider,
    CalendarResult, CalendarSync, CalendarSyncReport,
};
pub use service::reminder_service::{
    DispatchError, DispatchResult, EnsureOutcome, FireAcknowledgement, NotificationDispatcher,
    NotificationId, NotificationPresentation, ReminderService, ReminderServiceError,
    ScheduledNotification, ScheduledReminder,
};
pub use service::task_service::{
    NewTask, ReminderRequest, StoreError, StoreResult, TaskService, TaskServiceError, TaskStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
