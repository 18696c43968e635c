//! Reminder policy model.
//!
//! # Responsibility
//! - Define the per-task notification policy and its kind-specific settings.
//! - Keep the stored JSON shape (camelCase) decodable, including frequency
//!   kinds this build does not know yet.
//!
//! # Invariants
//! - `frequency` is a closed set; unknown stored values decode to
//!   [`ReminderFrequency::Unknown`] instead of failing.
//! - `next_notification_at` is always produced by the scheduler.
//! - Inactive or completed policies are never scheduled again.

use crate::model::LocalTimestamp;
use crate::schedule::compute_next_fire_time;
use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static TIME_OF_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").expect("valid time-of-day regex"));

/// Stable identifier for a reminder policy.
pub type ReminderId = Uuid;

/// Recurrence kind of a reminder policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderFrequency {
    /// Single-shot reminder at the due timestamp.
    Once,
    /// Hourly pings on the due day, starting at `start_hour`.
    HourlyOnDueDate,
    /// Daily ping at a fixed time of day, independent of the due date.
    Daily,
    /// Daily countdown starting `days_before_due` days ahead of the due date.
    DailyFromDueDate,
    /// Relative ping every `interval_minutes`.
    CustomInterval,
    /// Kind written by a newer client. Scheduled like [`Self::Once`].
    #[serde(other)]
    Unknown,
}

impl ReminderFrequency {
    /// Stable string id used in stored policies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::HourlyOnDueDate => "hourly-on-due-date",
            Self::Daily => "daily",
            Self::DailyFromDueDate => "daily-from-due-date",
            Self::CustomInterval => "custom-interval",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a stored kind; never fails.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "once" => Self::Once,
            "hourly-on-due-date" => Self::HourlyOnDueDate,
            "daily" => Self::Daily,
            "daily-from-due-date" => Self::DailyFromDueDate,
            "custom-interval" => Self::CustomInterval,
            _ => Self::Unknown,
        }
    }
}

/// Errors for time-of-day parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeOfDayError {
    /// Input is not `H:MM` / `HH:MM`.
    InvalidFormat(String),
    /// Hour or minute outside the 24h clock.
    OutOfRange { hour: u32, minute: u32 },
}

impl Display for TimeOfDayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(value) => {
                write!(f, "time of day must be formatted as HH:MM, got `{value}`")
            }
            Self::OutOfRange { hour, minute } => {
                write!(f, "time of day out of range: {hour:02}:{minute:02}")
            }
        }
    }
}

impl Error for TimeOfDayError {}

/// Wall-clock time of day (24h, minute precision).
///
/// Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Builds a time of day from 24h clock fields.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeOfDayError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or(TimeOfDayError::OutOfRange { hour, minute })
    }

    /// Parses `H:MM` or `HH:MM`.
    pub fn parse(value: &str) -> Result<Self, TimeOfDayError> {
        let caps = TIME_OF_DAY_RE
            .captures(value)
            .ok_or_else(|| TimeOfDayError::InvalidFormat(value.to_string()))?;
        let field = |index: usize| -> Result<u32, TimeOfDayError> {
            caps.get(index)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .ok_or_else(|| TimeOfDayError::InvalidFormat(value.to_string()))
        };
        Self::new(field(1)?, field(2)?)
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// Time with seconds and sub-seconds zeroed.
    pub fn as_naive_time(self) -> NaiveTime {
        self.0
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeOfDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

/// Kind-specific reminder settings. Every field is optional; the scheduler
/// falls back to its defaults when a field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    /// Used by `daily`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_time: Option<TimeOfDay>,
    /// Used by `daily-from-due-date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_before_due: Option<u32>,
    /// Used by `custom-interval`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_minutes: Option<u32>,
    /// Used by `hourly-on-due-date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<u32>,
    /// Bounds the hourly series; not read by the single-shot computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_hour: Option<u32>,
}

/// Notification policy attached to exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPolicy {
    pub id: ReminderId,
    /// Notification title shown by the platform dispatcher.
    pub title: String,
    /// Notification body shown by the platform dispatcher.
    pub body: String,
    pub frequency: ReminderFrequency,
    pub due_date: LocalTimestamp,
    #[serde(default)]
    pub settings: ReminderSettings,
    pub created_at: LocalTimestamp,
    pub updated_at: LocalTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_notification_at: Option<LocalTimestamp>,
    pub next_notification_at: LocalTimestamp,
    pub is_active: bool,
    pub is_completed: bool,
}

impl ReminderPolicy {
    /// Creates an active policy with `next_notification_at` computed for `now`.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        frequency: ReminderFrequency,
        due_date: LocalTimestamp,
        settings: ReminderSettings,
        now: LocalTimestamp,
    ) -> Self {
        let mut policy = Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            frequency,
            due_date,
            settings,
            created_at: now,
            updated_at: now,
            last_notification_at: None,
            next_notification_at: due_date,
            is_active: true,
            is_completed: false,
        };
        policy.next_notification_at = compute_next_fire_time(&policy, now);
        policy
    }

    /// Whether callers may ask the scheduler for a new fire time.
    pub fn is_schedulable(&self) -> bool {
        self.is_active && !self.is_completed
    }

    /// Marks the policy completed; it is never scheduled again.
    pub fn complete(&mut self, now: LocalTimestamp) {
        self.is_completed = true;
        self.updated_at = now;
    }

    /// Re-opens a completed policy and recomputes its next fire time.
    pub fn reopen(&mut self, now: LocalTimestamp) {
        self.is_completed = false;
        self.updated_at = now;
        self.next_notification_at = compute_next_fire_time(self, now);
    }
}
