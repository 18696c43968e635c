//! Reminder orchestration over the platform notification dispatcher.
//!
//! # Responsibility
//! - Perform the one-time notification setup with an injected dispatcher.
//! - Turn reminder policies into scheduled platform notifications.
//! - Recreate notifications the platform has lost.
//!
//! # Invariants
//! - Inactive or completed policies are never handed to the scheduler.
//! - Dispatcher failures are logged and returned, never swallowed.
//! - Notification titles/bodies are user content and are not logged.

use crate::model::reminder::{ReminderId, ReminderPolicy};
use crate::model::LocalTimestamp;
use crate::schedule::compute_next_fire_time;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque id returned by the platform dispatcher.
pub type NotificationId = String;

pub type DispatchResult<T> = Result<T, DispatchError>;

/// How the platform presents a delivered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPresentation {
    pub show_alert: bool,
    pub play_sound: bool,
    pub set_badge: bool,
}

impl Default for NotificationPresentation {
    fn default() -> Self {
        Self {
            show_alert: true,
            play_sound: true,
            set_badge: true,
        }
    }
}

/// Notification currently queued on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledNotification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    /// `None` for platform triggers that are not date based.
    pub fire_at: Option<LocalTimestamp>,
}

/// Dispatcher failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    PermissionDenied,
    NotFound(NotificationId),
    Platform(String),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "notification permission denied"),
            Self::NotFound(id) => write!(f, "notification not found: {id}"),
            Self::Platform(message) => write!(f, "notification platform failure: {message}"),
        }
    }
}

impl Error for DispatchError {}

/// Platform notification capability.
pub trait NotificationDispatcher {
    /// Applies process-wide presentation settings.
    fn configure(&self, presentation: NotificationPresentation) -> DispatchResult<()>;
    /// Asks the user for permission; returns whether it is granted.
    fn request_permission(&self) -> DispatchResult<bool>;
    fn schedule(
        &self,
        title: &str,
        body: &str,
        fire_at: LocalTimestamp,
    ) -> DispatchResult<NotificationId>;
    fn cancel(&self, id: &str) -> DispatchResult<()>;
    fn list_scheduled(&self) -> DispatchResult<Vec<ScheduledNotification>>;
}

/// Errors from reminder service operations.
#[derive(Debug)]
pub enum ReminderServiceError {
    /// Policy is inactive or completed.
    NotSchedulable(ReminderId),
    Dispatch(DispatchError),
}

impl Display for ReminderServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSchedulable(id) => {
                write!(f, "reminder is inactive or completed: {id}")
            }
            Self::Dispatch(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReminderServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dispatch(err) => Some(err),
            Self::NotSchedulable(_) => None,
        }
    }
}

impl From<DispatchError> for ReminderServiceError {
    fn from(value: DispatchError) -> Self {
        Self::Dispatch(value)
    }
}

/// Result of handing one policy to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub notification_id: NotificationId,
    pub fire_at: LocalTimestamp,
}

/// Outcome of [`ReminderService::ensure_scheduled`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The known notification is still queued.
    Kept(NotificationId),
    /// The notification was missing and has been created again.
    Recreated(ScheduledReminder),
}

/// Policy state after a delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireAcknowledgement {
    pub policy: ReminderPolicy,
    /// Follow-up notification, `None` once the policy is exhausted.
    pub next: Option<ScheduledReminder>,
}

/// Reminder service facade over a dispatcher implementation.
pub struct ReminderService<D: NotificationDispatcher> {
    dispatcher: D,
    presentation: NotificationPresentation,
}

impl<D: NotificationDispatcher> ReminderService<D> {
    /// Creates a service with default presentation (alert, sound, badge).
    pub fn new(dispatcher: D) -> Self {
        Self::with_presentation(dispatcher, NotificationPresentation::default())
    }

    pub fn with_presentation(dispatcher: D, presentation: NotificationPresentation) -> Self {
        Self {
            dispatcher,
            presentation,
        }
    }

    /// One-time startup setup: applies presentation settings and requests
    /// permission. Returns whether permission was granted.
    pub fn init(&self) -> Result<bool, ReminderServiceError> {
        self.dispatcher.configure(self.presentation)?;
        let granted = self.dispatcher.request_permission()?;
        if granted {
            info!("event=notifications_init module=reminder status=ok permission=granted");
        } else {
            warn!("event=notifications_init module=reminder status=degraded permission=denied");
        }
        Ok(granted)
    }

    /// Computes the next fire time for `policy` and queues a notification.
    ///
    /// # Errors
    /// - `NotSchedulable` when the policy is inactive or completed.
    /// - `Dispatch` when the platform rejects the call.
    pub fn schedule(
        &self,
        policy: &ReminderPolicy,
        now: LocalTimestamp,
    ) -> Result<ScheduledReminder, ReminderServiceError> {
        if !policy.is_schedulable() {
            return Err(ReminderServiceError::NotSchedulable(policy.id));
        }
        let fire_at = compute_next_fire_time(policy, now);
        self.dispatch(policy, fire_at)
    }

    /// Cancels a queued notification.
    pub fn cancel(&self, id: &str) -> Result<(), ReminderServiceError> {
        self.dispatcher.cancel(id).map_err(|err| {
            error!(
                "event=reminder_cancel module=reminder status=error notification_id={id} error={err}"
            );
            ReminderServiceError::from(err)
        })
    }

    /// Queued notifications, soonest first; entries without a date first.
    pub fn scheduled(&self) -> Result<Vec<ScheduledNotification>, ReminderServiceError> {
        let mut notifications = self.dispatcher.list_scheduled()?;
        notifications.sort_by_key(|notification| notification.fire_at);
        Ok(notifications)
    }

    /// Keeps `known_id` when the platform still lists it, otherwise schedules
    /// the policy again.
    pub fn ensure_scheduled(
        &self,
        policy: &ReminderPolicy,
        known_id: Option<&str>,
        now: LocalTimestamp,
    ) -> Result<EnsureOutcome, ReminderServiceError> {
        if let Some(id) = known_id {
            let queued = self.dispatcher.list_scheduled()?;
            if queued.iter().any(|notification| notification.id == id) {
                return Ok(EnsureOutcome::Kept(id.to_string()));
            }
            warn!("event=reminder_missing module=reminder status=recreate notification_id={id}");
        }
        self.schedule(policy, now).map(EnsureOutcome::Recreated)
    }

    /// Cancels `previous_id` (if still queued) and schedules the policy with
    /// its current settings. Used after due-date or frequency edits.
    pub fn reschedule(
        &self,
        policy: &ReminderPolicy,
        previous_id: Option<&str>,
        now: LocalTimestamp,
    ) -> Result<ScheduledReminder, ReminderServiceError> {
        if let Some(id) = previous_id {
            match self.dispatcher.cancel(id) {
                Ok(()) | Err(DispatchError::NotFound(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }
        self.schedule(policy, now)
    }

    /// Records a delivered notification and queues the follow-up.
    ///
    /// The policy is completed when its recomputed fire time is not after
    /// `fired_at`; single-shot kinds end here.
    ///
    /// # Errors
    /// - `NotSchedulable` when the policy is inactive or completed; the
    ///   policy is left untouched.
    /// - `Dispatch` when the follow-up cannot be queued.
    pub fn acknowledge_fire(
        &self,
        policy: &ReminderPolicy,
        fired_at: LocalTimestamp,
    ) -> Result<FireAcknowledgement, ReminderServiceError> {
        if !policy.is_schedulable() {
            return Err(ReminderServiceError::NotSchedulable(policy.id));
        }
        let mut updated = policy.clone();
        updated.last_notification_at = Some(fired_at);
        updated.updated_at = fired_at;
        updated.next_notification_at = compute_next_fire_time(&updated, fired_at);

        if updated.next_notification_at <= fired_at {
            updated.complete(fired_at);
            info!(
                "event=reminder_exhausted module=reminder status=ok reminder_id={} frequency={}",
                updated.id,
                updated.frequency.as_str()
            );
            return Ok(FireAcknowledgement {
                policy: updated,
                next: None,
            });
        }

        let next = self.dispatch(&updated, updated.next_notification_at)?;
        Ok(FireAcknowledgement {
            policy: updated,
            next: Some(next),
        })
    }

    fn dispatch(
        &self,
        policy: &ReminderPolicy,
        fire_at: LocalTimestamp,
    ) -> Result<ScheduledReminder, ReminderServiceError> {
        let notification_id = self
            .dispatcher
            .schedule(policy.title.as_str(), policy.body.as_str(), fire_at)
            .map_err(|err| {
                error!(
                    "event=reminder_schedule module=reminder status=error reminder_id={} error={}",
                    policy.id, err
                );
                ReminderServiceError::from(err)
            })?;
        info!(
            "event=reminder_schedule module=reminder status=ok reminder_id={} frequency={} fire_at={}",
            policy.id,
            policy.frequency.as_str(),
            fire_at
        );
        Ok(ScheduledReminder {
            notification_id,
            fire_at,
        })
    }
}
