//! Next fire time computation for the five reminder frequencies.

use crate::model::reminder::{ReminderFrequency, ReminderPolicy, TimeOfDay};
use crate::model::LocalTimestamp;
use chrono::{Days, Duration};

/// Hour used by `daily` when no notification time is set.
pub const DEFAULT_DAILY_HOUR: u32 = 9;
/// Countdown length used by `daily-from-due-date`.
pub const DEFAULT_DAYS_BEFORE_DUE: u32 = 1;
/// First hourly ping on the due day.
pub const DEFAULT_START_HOUR: u32 = 9;
/// Last hourly ping on the due day.
pub const DEFAULT_END_HOUR: u32 = 17;
/// Interval used by `custom-interval`.
pub const DEFAULT_INTERVAL_MINUTES: u32 = 60;

const LAST_HOUR_OF_DAY: u32 = 23;

/// Computes the next moment `policy` should fire, relative to `now`.
///
/// Every timestamp is local wall-clock time; no zone conversion happens here.
///
/// | kind | result |
/// |---|---|
/// | `once` | due timestamp |
/// | `daily` | today at the notification time, or tomorrow if that is not after `now` |
/// | `daily-from-due-date` | `due - days_before_due`, or the due timestamp if that is not after `now` |
/// | `hourly-on-due-date` | due day at `start_hour:00` |
/// | `custom-interval` | `now + interval_minutes` |
/// | unknown | due timestamp |
///
/// Absent settings use the `DEFAULT_*` constants. Zero `days_before_due` and
/// zero `interval_minutes` count as absent.
pub fn compute_next_fire_time(policy: &ReminderPolicy, now: LocalTimestamp) -> LocalTimestamp {
    let due = policy.due_date;
    let settings = &policy.settings;

    match policy.frequency {
        ReminderFrequency::Once => due,
        ReminderFrequency::Daily => next_daily_occurrence(settings.notification_time, now),
        ReminderFrequency::DailyFromDueDate => {
            let days = settings
                .days_before_due
                .filter(|days| *days > 0)
                .unwrap_or(DEFAULT_DAYS_BEFORE_DUE);
            match due.checked_sub_days(Days::new(u64::from(days))) {
                Some(start) if start > now => start,
                // Countdown window already open: degrade to a single shot at due.
                _ => due,
            }
        }
        ReminderFrequency::HourlyOnDueDate => {
            let hour = settings
                .start_hour
                .unwrap_or(DEFAULT_START_HOUR)
                .min(LAST_HOUR_OF_DAY);
            due.date().and_hms_opt(hour, 0, 0).unwrap_or(due)
        }
        ReminderFrequency::CustomInterval => {
            let minutes = settings
                .interval_minutes
                .filter(|minutes| *minutes > 0)
                .unwrap_or(DEFAULT_INTERVAL_MINUTES);
            now.checked_add_signed(Duration::minutes(i64::from(minutes)))
                .unwrap_or(now)
        }
        ReminderFrequency::Unknown => due,
    }
}

fn next_daily_occurrence(time: Option<TimeOfDay>, now: LocalTimestamp) -> LocalTimestamp {
    let Some(time) = time.or_else(|| TimeOfDay::new(DEFAULT_DAILY_HOUR, 0).ok()) else {
        return now;
    };
    let today = now.date().and_time(time.as_naive_time());
    if today > now {
        return today;
    }
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::compute_next_fire_time;
    use crate::model::reminder::{ReminderFrequency, ReminderPolicy, ReminderSettings, TimeOfDay};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid test timestamp")
    }

    fn policy(
        frequency: ReminderFrequency,
        due: NaiveDateTime,
        settings: ReminderSettings,
    ) -> ReminderPolicy {
        let mut policy = ReminderPolicy::new("t", "b", frequency, due, settings, at(1, 0, 0));
        policy.next_notification_at = due;
        policy
    }

    #[test]
    fn once_returns_due_timestamp() {
        let due = at(10, 14, 30);
        let policy = policy(ReminderFrequency::Once, due, ReminderSettings::default());
        assert_eq!(compute_next_fire_time(&policy, at(1, 0, 0)), due);
        assert_eq!(compute_next_fire_time(&policy, at(20, 0, 0)), due);
    }

    #[test]
    fn daily_fires_today_when_still_ahead_otherwise_tomorrow() {
        let settings = ReminderSettings {
            notification_time: Some(TimeOfDay::new(9, 0).expect("valid time")),
            ..ReminderSettings::default()
        };
        let policy = policy(ReminderFrequency::Daily, at(20, 0, 0), settings);

        assert_eq!(compute_next_fire_time(&policy, at(5, 8, 0)), at(5, 9, 0));
        assert_eq!(compute_next_fire_time(&policy, at(5, 10, 0)), at(6, 9, 0));
    }

    #[test]
    fn daily_occurrence_equal_to_now_rolls_to_tomorrow() {
        let settings = ReminderSettings {
            notification_time: Some(TimeOfDay::new(9, 0).expect("valid time")),
            ..ReminderSettings::default()
        };
        let policy = policy(ReminderFrequency::Daily, at(20, 0, 0), settings);
        assert_eq!(compute_next_fire_time(&policy, at(5, 9, 0)), at(6, 9, 0));
    }

    #[test]
    fn daily_without_time_uses_default_hour() {
        let policy = policy(
            ReminderFrequency::Daily,
            at(20, 0, 0),
            ReminderSettings::default(),
        );
        assert_eq!(compute_next_fire_time(&policy, at(5, 7, 0)), at(5, 9, 0));
    }

    #[test]
    fn daily_from_due_date_starts_countdown_or_collapses_to_due() {
        let settings = ReminderSettings {
            days_before_due: Some(3),
            ..ReminderSettings::default()
        };
        let due = at(10, 12, 0);
        let policy = policy(ReminderFrequency::DailyFromDueDate, due, settings);

        assert_eq!(compute_next_fire_time(&policy, at(5, 12, 0)), at(7, 12, 0));
        assert_eq!(compute_next_fire_time(&policy, at(8, 12, 0)), due);
    }

    #[test]
    fn daily_from_due_date_defaults_to_one_day() {
        let due = at(10, 12, 0);
        let policy = policy(
            ReminderFrequency::DailyFromDueDate,
            due,
            ReminderSettings::default(),
        );
        assert_eq!(compute_next_fire_time(&policy, at(5, 0, 0)), at(9, 12, 0));
    }

    #[test]
    fn hourly_on_due_date_anchors_start_hour_regardless_of_end_hour() {
        let due = at(10, 0, 0);
        for end_hour in [None, Some(10), Some(17), Some(23)] {
            let settings = ReminderSettings {
                start_hour: Some(9),
                end_hour,
                ..ReminderSettings::default()
            };
            let policy = policy(ReminderFrequency::HourlyOnDueDate, due, settings);
            assert_eq!(compute_next_fire_time(&policy, at(1, 0, 0)), at(10, 9, 0));
        }
    }

    #[test]
    fn hourly_on_due_date_zeroes_minutes_and_defaults_start_hour() {
        let policy = policy(
            ReminderFrequency::HourlyOnDueDate,
            at(10, 15, 45),
            ReminderSettings::default(),
        );
        assert_eq!(compute_next_fire_time(&policy, at(1, 0, 0)), at(10, 9, 0));
    }

    #[test]
    fn custom_interval_is_relative_to_now() {
        let settings = ReminderSettings {
            interval_minutes: Some(60),
            ..ReminderSettings::default()
        };
        let policy = policy(ReminderFrequency::CustomInterval, at(20, 0, 0), settings);
        for now in [at(1, 0, 0), at(5, 23, 30), at(31, 23, 59)] {
            assert_eq!(
                compute_next_fire_time(&policy, now),
                now + chrono::Duration::minutes(60)
            );
        }
    }

    #[test]
    fn unknown_kind_falls_back_to_due_timestamp() {
        let due = at(10, 14, 30);
        let policy = policy(ReminderFrequency::Unknown, due, ReminderSettings::default());
        assert_eq!(compute_next_fire_time(&policy, at(12, 0, 0)), due);
    }

    #[test]
    fn lifecycle_flags_do_not_change_the_result() {
        let due = at(10, 14, 30);
        let mut policy = policy(ReminderFrequency::Once, due, ReminderSettings::default());
        policy.is_active = false;
        policy.is_completed = true;
        policy.last_notification_at = Some(at(9, 0, 0));
        assert_eq!(compute_next_fire_time(&policy, at(1, 0, 0)), due);
    }
}
