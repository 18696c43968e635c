//! Secondary task list views.

use crate::model::task::Task;
use chrono::NaiveDate;

/// Tasks created on `day`, in input order.
pub fn tasks_created_on(tasks: &[Task], day: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.created_at.date() == day)
        .cloned()
        .collect()
}

/// Pending tasks with a due timestamp, soonest first.
///
/// Tasks sharing a due timestamp keep their input order.
pub fn upcoming_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut upcoming = tasks
        .iter()
        .filter(|task| !task.is_complete && task.due_at.is_some())
        .cloned()
        .collect::<Vec<_>>();
    upcoming.sort_by_key(|task| task.due_at);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::{tasks_created_on, upcoming_tasks};
    use crate::model::task::Task;
    use chrono::{NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid test timestamp")
    }

    fn task(text: &str, created: NaiveDateTime, due: Option<NaiveDateTime>) -> Task {
        let mut task = Task::new(Uuid::nil(), text, created);
        task.due_at = due;
        task
    }

    #[test]
    fn created_on_matches_calendar_day_only() {
        let tasks = vec![
            task("early", at(4, 0), None),
            task("yesterday", at(3, 23), None),
            task("late", at(4, 23), None),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid day");
        let texts = tasks_created_on(&tasks, day)
            .into_iter()
            .map(|task| task.text)
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["early", "late"]);
    }

    #[test]
    fn upcoming_skips_done_and_undated_and_sorts_by_due() {
        let mut done = task("done", at(1, 0), Some(at(2, 0)));
        done.is_complete = true;
        let tasks = vec![
            task("later", at(1, 0), Some(at(9, 0))),
            done,
            task("undated", at(1, 0), None),
            task("sooner", at(1, 0), Some(at(5, 0))),
            task("sooner-twin", at(1, 0), Some(at(5, 0))),
        ];
        let texts = upcoming_tasks(&tasks)
            .into_iter()
            .map(|task| task.text)
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["sooner", "sooner-twin", "later"]);
    }
}
