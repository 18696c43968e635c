//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Accept domain records as JSON in the core wire shape (UUID ids, local
//!   timestamps without offset); Dart converts stored rows before calling.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Decode failures come back as envelopes with `ok = false`, never as
//!   partial results.
//! - Timestamps cross the boundary as local ISO-8601 strings without offset.

use chrono::NaiveDateTime;
use log::warn;
use remindly_core::{
    compute_next_fire_time, core_version as core_version_inner, group_tasks as group_tasks_inner,
    init_logging as init_logging_inner, ping as ping_inner, DisplayBucket, Group, ReminderPolicy,
    Task,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const TIMESTAMP_FORMAT_NO_SECONDS: &str = "%Y-%m-%dT%H:%M";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Response envelope for [`next_fire_time`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireTimeResponse {
    /// Whether the computation ran.
    pub ok: bool,
    /// Next fire timestamp as `YYYY-MM-DDTHH:MM:SS`.
    pub next_fire_at: Option<String>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl FireTimeResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            next_fire_at: None,
            message: message.into(),
        }
    }
}

/// One display bucket, carrying task ids in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardBucket {
    /// Group id, `None` for the ungrouped bucket.
    pub group_id: Option<String>,
    pub name: String,
    pub pending_task_ids: Vec<String>,
    pub done_task_ids: Vec<String>,
}

/// Response envelope for [`group_tasks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardResponse {
    pub ok: bool,
    pub buckets: Vec<BoardBucket>,
    pub message: String,
}

/// Computes the next fire time of a stored reminder policy.
///
/// Input semantics:
/// - `policy_json`: camelCase policy record as stored on a task.
/// - `now`: local timestamp, `YYYY-MM-DDTHH:MM[:SS]`.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Completed or inactive policies are refused with `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn next_fire_time(policy_json: String, now: String) -> FireTimeResponse {
    let policy = match serde_json::from_str::<ReminderPolicy>(&policy_json) {
        Ok(policy) => policy,
        Err(err) => {
            warn!("event=ffi_next_fire module=ffi status=error stage=decode error={err}");
            return FireTimeResponse::failure(format!("next_fire_time failed: {err}"));
        }
    };
    let now = match parse_timestamp(&now) {
        Ok(now) => now,
        Err(err) => return FireTimeResponse::failure(format!("next_fire_time failed: {err}")),
    };
    if !policy.is_schedulable() {
        return FireTimeResponse::failure("Reminder is inactive or completed.");
    }

    let next = compute_next_fire_time(&policy, now);
    FireTimeResponse {
        ok: true,
        next_fire_at: Some(next.format(TIMESTAMP_FORMAT).to_string()),
        message: format!("Next reminder ({}).", policy.frequency.as_str()),
    }
}

/// Groups task rows (core wire shape) into ordered display buckets.
///
/// Input semantics:
/// - `tasks_json`: JSON array of task rows.
/// - `groups_json`: JSON array of groups.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Never panics; malformed input yields `ok = false` and no buckets.
#[flutter_rust_bridge::frb(sync)]
pub fn group_tasks(tasks_json: String, groups_json: String) -> BoardResponse {
    let decoded = serde_json::from_str::<Vec<Task>>(&tasks_json)
        .map_err(|err| format!("tasks: {err}"))
        .and_then(|tasks| {
            serde_json::from_str::<Vec<Group>>(&groups_json)
                .map(|groups| (tasks, groups))
                .map_err(|err| format!("groups: {err}"))
        });
    let (tasks, groups) = match decoded {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!("event=ffi_group_tasks module=ffi status=error stage=decode error={err}");
            return BoardResponse {
                ok: false,
                buckets: Vec::new(),
                message: format!("group_tasks failed: {err}"),
            };
        }
    };

    let buckets = group_tasks_inner(&tasks, &groups)
        .into_iter()
        .map(to_board_bucket)
        .collect::<Vec<_>>();
    let message = if buckets.is_empty() {
        "No tasks.".to_string()
    } else {
        format!("Grouped {} task(s) into {} bucket(s).", tasks.len(), buckets.len())
    };
    BoardResponse {
        ok: true,
        buckets,
        message,
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT_NO_SECONDS))
        .map_err(|err| format!("invalid timestamp `{trimmed}`: {err}"))
}

fn to_board_bucket(bucket: DisplayBucket) -> BoardBucket {
    BoardBucket {
        group_id: bucket.id.map(|id| id.to_string()),
        name: bucket.name,
        pending_task_ids: bucket.pending.iter().map(|task| task.id.to_string()).collect(),
        done_task_ids: bucket.done.iter().map(|task| task.id.to_string()).collect(),
    }
}
