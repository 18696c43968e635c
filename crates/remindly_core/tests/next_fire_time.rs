use chrono::{Duration, NaiveDate, NaiveDateTime};
use remindly_core::{
    compute_next_fire_time, ReminderFrequency, ReminderPolicy, ReminderSettings, TimeOfDay,
};

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn policy(
    frequency: ReminderFrequency,
    due: NaiveDateTime,
    settings: ReminderSettings,
) -> ReminderPolicy {
    ReminderPolicy::new("Reminder", "body", frequency, due, settings, at(1, 0, 0))
}

#[test]
fn once_always_returns_due_timestamp() {
    let due = at(10, 18, 15);
    let policy = policy(ReminderFrequency::Once, due, ReminderSettings::default());
    for now in [at(1, 0, 0), at(10, 18, 15), at(25, 12, 0)] {
        assert_eq!(compute_next_fire_time(&policy, now), due);
    }
}

#[test]
fn daily_at_nine_before_and_after() {
    let settings = ReminderSettings {
        notification_time: Some(TimeOfDay::parse("09:00").unwrap()),
        ..ReminderSettings::default()
    };
    let policy = policy(ReminderFrequency::Daily, at(30, 0, 0), settings);

    assert_eq!(compute_next_fire_time(&policy, at(5, 8, 0)), at(5, 9, 0));
    assert_eq!(compute_next_fire_time(&policy, at(5, 10, 0)), at(6, 9, 0));
}

#[test]
fn daily_from_due_date_countdown_and_collapse() {
    let settings = ReminderSettings {
        days_before_due: Some(3),
        ..ReminderSettings::default()
    };
    let due = at(10, 0, 0);
    let policy = policy(ReminderFrequency::DailyFromDueDate, due, settings);

    assert_eq!(compute_next_fire_time(&policy, at(5, 0, 0)), at(7, 0, 0));
    assert_eq!(compute_next_fire_time(&policy, at(8, 0, 0)), due);
}

#[test]
fn hourly_on_due_date_ignores_end_hour() {
    let due = NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let expected = NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    for end_hour in [Some(12), Some(17), None] {
        let settings = ReminderSettings {
            start_hour: Some(9),
            end_hour,
            ..ReminderSettings::default()
        };
        let policy = policy(ReminderFrequency::HourlyOnDueDate, due, settings);
        assert_eq!(compute_next_fire_time(&policy, at(2, 0, 0)), expected);
    }
}

#[test]
fn custom_interval_adds_exactly_sixty_minutes() {
    let settings = ReminderSettings {
        interval_minutes: Some(60),
        ..ReminderSettings::default()
    };
    let policy = policy(ReminderFrequency::CustomInterval, at(30, 0, 0), settings);
    for now in [at(1, 0, 0), at(12, 23, 30), at(31, 23, 59)] {
        assert_eq!(compute_next_fire_time(&policy, now), now + Duration::minutes(60));
    }
}

#[test]
fn custom_interval_without_setting_defaults_to_an_hour() {
    let policy = policy(
        ReminderFrequency::CustomInterval,
        at(30, 0, 0),
        ReminderSettings::default(),
    );
    let now = at(3, 7, 45);
    assert_eq!(compute_next_fire_time(&policy, now), at(3, 8, 45));
}

#[test]
fn new_policy_precomputes_next_notification() {
    let settings = ReminderSettings {
        days_before_due: Some(2),
        ..ReminderSettings::default()
    };
    let policy = ReminderPolicy::new(
        "Pay rent",
        "Due soon",
        ReminderFrequency::DailyFromDueDate,
        at(10, 9, 0),
        settings,
        at(1, 0, 0),
    );
    assert_eq!(policy.next_notification_at, at(8, 9, 0));
    assert!(policy.is_schedulable());
    assert_eq!(policy.created_at, at(1, 0, 0));
}

#[test]
fn stored_policy_with_unknown_kind_decodes_and_falls_back_to_due() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Standup",
        "body": "Daily sync",
        "frequency": "weekly",
        "dueDate": "2024-01-10T09:30:00",
        "settings": {},
        "createdAt": "2024-01-01T00:00:00",
        "updatedAt": "2024-01-01T00:00:00",
        "nextNotificationAt": "2024-01-10T09:30:00",
        "isActive": true,
        "isCompleted": false
    });

    let policy: ReminderPolicy = serde_json::from_value(value).unwrap();
    assert_eq!(policy.frequency, ReminderFrequency::Unknown);
    assert_eq!(compute_next_fire_time(&policy, at(2, 0, 0)), at(10, 9, 30));
}

#[test]
fn stored_settings_use_camel_case_and_hh_mm_time() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Water plants",
        "body": "",
        "frequency": "daily",
        "dueDate": "2024-01-20T00:00:00",
        "settings": { "notificationTime": "18:30", "intervalMinutes": 15 },
        "createdAt": "2024-01-01T00:00:00",
        "updatedAt": "2024-01-01T00:00:00",
        "nextNotificationAt": "2024-01-01T18:30:00",
        "isActive": true,
        "isCompleted": false
    });

    let policy: ReminderPolicy = serde_json::from_value(value).unwrap();
    assert_eq!(policy.frequency, ReminderFrequency::Daily);
    assert_eq!(policy.settings.interval_minutes, Some(15));
    assert_eq!(compute_next_fire_time(&policy, at(4, 19, 0)), at(5, 18, 30));

    let encoded = serde_json::to_value(&policy).unwrap();
    assert_eq!(encoded["settings"]["notificationTime"], "18:30");
    assert_eq!(encoded["frequency"], "daily");
    assert!(encoded.get("lastNotificationAt").is_none());
}

#[test]
fn malformed_stored_time_of_day_is_rejected_at_decode() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "x",
        "body": "",
        "frequency": "daily",
        "dueDate": "2024-01-20T00:00:00",
        "settings": { "notificationTime": "25:00" },
        "createdAt": "2024-01-01T00:00:00",
        "updatedAt": "2024-01-01T00:00:00",
        "nextNotificationAt": "2024-01-01T00:00:00",
        "isActive": true,
        "isCompleted": false
    });

    let err = serde_json::from_value::<ReminderPolicy>(value).unwrap_err();
    assert!(err.to_string().contains("out of range"), "unexpected error: {err}");
}
