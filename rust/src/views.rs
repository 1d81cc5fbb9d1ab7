//! Date-window views over a snapshot of stored tasks.
//!
//! Only pending tasks with both dates assigned show up in any view.

use chrono::NaiveDate;

use crate::models::Task;

fn dated_pending(tasks: &[Task]) -> impl Iterator<Item = (&Task, NaiveDate, NaiveDate)> {
    tasks.iter().filter(|t| t.is_pending()).filter_map(|t| {
        let start = t.start_date?;
        let end = t.end_date?;
        Some((t, start, end))
    })
}

/// Tasks whose window covers `today`, high priority first, then by start date.
pub fn todays_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let mut hits: Vec<(&Task, NaiveDate)> = dated_pending(tasks)
        .filter(|&(_, start, end)| start <= today && end >= today)
        .map(|(t, start, _)| (t, start))
        .collect();
    hits.sort_by_key(|&(t, start)| (t.priority.rank(), start));
    hits.into_iter().map(|(t, _)| t).collect()
}

/// Tasks that start after `today`, or start today and run past it; by start date, then priority.
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let mut hits: Vec<(&Task, NaiveDate)> = dated_pending(tasks)
        .filter(|&(_, start, end)| start > today || (start == today && end > today))
        .map(|(t, start, _)| (t, start))
        .collect();
    hits.sort_by_key(|&(t, start)| (start, t.priority.rank()));
    hits.into_iter().map(|(t, _)| t).collect()
}

/// Tasks whose end date is before `today`; oldest first, then priority.
pub fn overdue_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let mut hits: Vec<(&Task, NaiveDate)> = dated_pending(tasks)
        .filter(|&(_, _, end)| end < today)
        .map(|(t, _, end)| (t, end))
        .collect();
    hits.sort_by_key(|&(t, end)| (end, t.priority.rank()));
    hits.into_iter().map(|(t, _)| t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskStatus};

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_task(id: &str, start: (u32, u32), end: (u32, u32), priority: Priority) -> Task {
        Task::new(id, id, 1)
            .with_priority(priority)
            .with_dates(make_date(2025, start.0, start.1), make_date(2025, end.0, end.1))
    }

    fn ids<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn snapshot() -> Vec<Task> {
        vec![
            make_task("old", (4, 1), (4, 3), Priority::Low),
            make_task("older_high", (3, 1), (4, 3), Priority::High),
            make_task("running_low", (4, 8), (4, 12), Priority::Low),
            make_task("ends_today", (4, 9), (4, 10), Priority::Medium),
            make_task("starts_today", (4, 10), (4, 11), Priority::High),
            make_task("next_week", (4, 17), (4, 18), Priority::Medium),
            make_task("done", (4, 9), (4, 11), Priority::High).with_status(TaskStatus::Completed),
            Task::new("undated", "undated", 1),
        ]
    }

    #[test]
    fn test_todays_tasks() {
        let tasks = snapshot();
        let today = make_date(2025, 4, 10);
        assert_eq!(
            ids(&todays_tasks(&tasks, today)),
            vec!["starts_today", "ends_today", "running_low"]
        );
    }

    #[test]
    fn test_upcoming_tasks() {
        let tasks = snapshot();
        let today = make_date(2025, 4, 10);
        assert_eq!(
            ids(&upcoming_tasks(&tasks, today)),
            vec!["starts_today", "next_week"]
        );
    }

    #[test]
    fn test_overdue_tasks() {
        let tasks = snapshot();
        let today = make_date(2025, 4, 10);
        assert_eq!(
            ids(&overdue_tasks(&tasks, today)),
            vec!["older_high", "old"]
        );
    }

    #[test]
    fn test_empty_snapshot() {
        let today = make_date(2025, 4, 10);
        assert!(todays_tasks(&[], today).is_empty());
        assert!(upcoming_tasks(&[], today).is_empty());
        assert!(overdue_tasks(&[], today).is_empty());
    }
}
