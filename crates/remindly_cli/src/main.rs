//! CLI entry point.
//!
//! # Responsibility
//! - Without arguments, print a smoke probe verifying `remindly_core` linkage.
//! - With a snapshot file, render its tasks as display buckets followed by
//!   the next fire time of every schedulable reminder.
//! - Keep output deterministic for a fixed `now`.

use chrono::{Local, NaiveDateTime};
use remindly_core::{compute_next_fire_time, group_tasks, Group, Task};
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "usage: remindly_cli [<snapshot.json> [YYYY-MM-DDTHH:MM:SS]]";

/// Exported task and group rows.
#[derive(Debug, Deserialize)]
struct Snapshot {
    tasks: Vec<Task>,
    #[serde(default)]
    groups: Vec<Group>,
}

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("remindly_cli: {err}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<String, String> {
    match args {
        [] => Ok(format!(
            "remindly_core ping={}\nremindly_core version={}\n",
            remindly_core::ping(),
            remindly_core::core_version()
        )),
        [path] => render_file(Path::new(path), Local::now().naive_local()),
        [path, now] => {
            let now = now
                .parse::<NaiveDateTime>()
                .map_err(|err| format!("invalid now `{now}`: {err}"))?;
            render_file(Path::new(path), now)
        }
        _ => Err("too many arguments".to_string()),
    }
}

fn render_file(path: &Path, now: NaiveDateTime) -> Result<String, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    let snapshot = serde_json::from_str::<Snapshot>(&raw)
        .map_err(|err| format!("invalid snapshot `{}`: {err}", path.display()))?;
    Ok(render(&snapshot, now))
}

fn render(snapshot: &Snapshot, now: NaiveDateTime) -> String {
    let mut out = String::new();
    for bucket in group_tasks(&snapshot.tasks, &snapshot.groups) {
        let _ = writeln!(
            out,
            "[{}] {} pending, {} done",
            bucket.name,
            bucket.pending.len(),
            bucket.done.len()
        );
        for task in &bucket.pending {
            let _ = writeln!(out, "  - ({}) {}", task.priority, task.text);
        }
        for task in &bucket.done {
            let _ = writeln!(out, "  x ({}) {}", task.priority, task.text);
        }
    }

    let mut reminders = snapshot
        .tasks
        .iter()
        .filter_map(|task| {
            let policy = task.reminder.as_ref().filter(|policy| policy.is_schedulable())?;
            Some((compute_next_fire_time(policy, now), task, policy.frequency))
        })
        .collect::<Vec<_>>();
    reminders.sort_by_key(|(fire_at, _, _)| *fire_at);

    if !reminders.is_empty() {
        let _ = writeln!(out, "next reminders (now={}):", now.format("%Y-%m-%d %H:%M"));
    }
    for (fire_at, task, frequency) in reminders {
        let _ = writeln!(
            out,
            "  {} {} [{}]",
            fire_at.format("%Y-%m-%d %H:%M"),
            task.text,
            frequency.as_str()
        );
    }
    out
}
