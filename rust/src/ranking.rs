//! Priority scoring for the "what matters now" view.
//!
//! A task's score is the sum of three independent terms:
//! - urgency: a band derived from whole days until the end date
//! - priority: the task's importance band
//! - duration: a small boost for short tasks, floored at zero
//!
//! Ranking sorts by score descending. Equal scores fall back to task id
//! ascending, then to input position, so the result never depends on how
//! the caller's storage happened to iterate.

use chrono::NaiveDate;

use crate::models::{Priority, Task};

/// Discrete urgency tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UrgencyBand {
    /// Due today or earlier, or no end date at all.
    Overdue,
    /// Due tomorrow.
    DueTomorrow,
    /// Due in 2-3 days.
    DueSoon,
    /// Due in 4-7 days.
    DueThisWeek,
    /// Due in more than a week.
    Later,
}

impl UrgencyBand {
    /// Band for a whole-day distance to the due date; zero or less is overdue.
    pub fn from_days_until_due(days: i64) -> Self {
        match days {
            d if d <= 0 => UrgencyBand::Overdue,
            1 => UrgencyBand::DueTomorrow,
            2..=3 => UrgencyBand::DueSoon,
            4..=7 => UrgencyBand::DueThisWeek,
            _ => UrgencyBand::Later,
        }
    }

    /// Urgency points awarded for this band.
    pub fn points(&self) -> i32 {
        match self {
            UrgencyBand::Overdue => 100,
            UrgencyBand::DueTomorrow => 80,
            UrgencyBand::DueSoon => 60,
            UrgencyBand::DueThisWeek => 40,
            UrgencyBand::Later => 20,
        }
    }
}

/// Points for a task's priority band.
pub fn priority_points(priority: Priority) -> i32 {
    match priority {
        Priority::High => 30,
        Priority::Medium => 20,
        Priority::Low => 10,
    }
}

/// Boost for short tasks: ten minus the duration, never below zero.
pub fn duration_points(duration_days: u32) -> i32 {
    10u32.saturating_sub(duration_days) as i32
}

/// Whole days from `now` until the task's end date; a missing end date counts as due now.
pub fn days_until_due(task: &Task, now: NaiveDate) -> i64 {
    task.end_date
        .map(|end| (end - now).num_days())
        .unwrap_or(0)
}

/// The individual terms of a task's score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriorityScore {
    pub days_until_due: i64,
    pub band: UrgencyBand,
    pub urgency: i32,
    pub priority: i32,
    pub duration: i32,
}

impl PriorityScore {
    /// Sum of the three terms.
    pub fn total(&self) -> i32 {
        self.urgency + self.priority + self.duration
    }
}

/// Score a task against `now`, keeping each term.
pub fn score_breakdown(task: &Task, now: NaiveDate) -> PriorityScore {
    let days = days_until_due(task, now);
    let band = UrgencyBand::from_days_until_due(days);
    PriorityScore {
        days_until_due: days,
        band,
        urgency: band.points(),
        priority: priority_points(task.priority),
        duration: duration_points(task.duration_days),
    }
}

/// Total priority score of a task against `now`.
pub fn score(task: &Task, now: NaiveDate) -> i32 {
    score_breakdown(task, now).total()
}

/// A task paired with its score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedTask<'a> {
    pub task: &'a Task,
    pub score: PriorityScore,
}

/// Sort key; lower sorts first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey<'a> {
    neg_score: i32,
    task_id: &'a str,
    position: usize,
}

fn ranked<'a, I>(tasks: I, now: NaiveDate) -> Vec<RankedTask<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut keyed: Vec<(RankKey<'a>, RankedTask<'a>)> = tasks
        .into_iter()
        .enumerate()
        .map(|(position, task)| {
            let score = score_breakdown(task, now);
            let key = RankKey {
                neg_score: -score.total(),
                task_id: task.id.as_str(),
                position,
            };
            (key, RankedTask { task, score })
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, ranked)| ranked).collect()
}

/// Score and order `tasks`, most pressing first.
pub fn rank_with_scores(tasks: &[Task], now: NaiveDate) -> Vec<RankedTask<'_>> {
    ranked(tasks, now)
}

/// Order `tasks` by descending score. Total over any input, including an empty one.
pub fn rank(tasks: &[Task], now: NaiveDate) -> Vec<&Task> {
    ranked(tasks, now).into_iter().map(|r| r.task).collect()
}

/// Rank only the pending tasks of a mixed snapshot.
pub fn rank_pending(tasks: &[Task], now: NaiveDate) -> Vec<&Task> {
    ranked(tasks.iter().filter(|t| t.is_pending()), now)
        .into_iter()
        .map(|r| r.task)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::Days;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn due_in(id: &str, now: NaiveDate, days: i64, priority: Priority, duration: u32) -> Task {
        let end = if days >= 0 {
            now + Days::new(days as u64)
        } else {
            now - Days::new(days.unsigned_abs())
        };
        Task::new(id, id, duration)
            .with_priority(priority)
            .with_dates(end - Days::new(u64::from(duration)), end)
    }

    fn ids<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_urgency_bands() {
        let now = make_date(2025, 6, 1);
        let cases = [(0, 100), (1, 80), (3, 60), (7, 40), (30, 20)];
        for (days, expected) in cases {
            let task = due_in("t", now, days, Priority::Low, 1);
            assert_eq!(score_breakdown(&task, now).urgency, expected, "days={}", days);
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(UrgencyBand::from_days_until_due(-4), UrgencyBand::Overdue);
        assert_eq!(UrgencyBand::from_days_until_due(2), UrgencyBand::DueSoon);
        assert_eq!(UrgencyBand::from_days_until_due(4), UrgencyBand::DueThisWeek);
        assert_eq!(UrgencyBand::from_days_until_due(8), UrgencyBand::Later);
    }

    #[test]
    fn test_missing_end_date_is_due_now() {
        let task = Task::new("loose", "No dates", 3);
        let breakdown = score_breakdown(&task, make_date(2025, 6, 1));
        assert_eq!(breakdown.days_until_due, 0);
        assert_eq!(breakdown.band, UrgencyBand::Overdue);
        // 100 + medium 20 + (10 - 3)
        assert_eq!(breakdown.total(), 127);
    }

    #[test]
    fn test_duration_term_floors_at_zero() {
        assert_eq!(duration_points(1), 9);
        assert_eq!(duration_points(10), 0);
        assert_eq!(duration_points(45), 0);
        assert_eq!(duration_points(u32::MAX), 0);
    }

    #[test]
    fn test_overdue_high_priority_ranks_first() {
        let now = make_date(2025, 6, 15);
        let tasks = vec![
            due_in("later", now, 10, Priority::High, 2),
            due_in("overdue", now, -2, Priority::High, 2),
        ];

        assert_eq!(score(&tasks[1], now), 138);
        assert_eq!(score(&tasks[0], now), 58);
        assert_eq!(ids(&rank(&tasks, now)), vec!["overdue", "later"]);
    }

    #[test]
    fn test_priority_outweighs_duration_within_band() {
        let now = make_date(2025, 6, 15);
        let tasks = vec![
            due_in("low_short", now, 5, Priority::Low, 1),
            due_in("high_long", now, 5, Priority::High, 9),
            due_in("medium", now, 5, Priority::Medium, 4),
        ];
        // 40+10+9=59, 40+30+1=71, 40+20+6=66
        let ranked = rank_with_scores(&tasks, now);
        let scores: Vec<i32> = ranked.iter().map(|r| r.score.total()).collect();
        assert_eq!(scores, vec![71, 66, 59]);
        assert_eq!(ranked[0].task.id, "high_long");
    }

    #[test]
    fn test_equal_scores_break_by_id() {
        let now = make_date(2025, 6, 15);
        let tasks = vec![
            due_in("task_b", now, 3, Priority::Medium, 2),
            due_in("task_c", now, 3, Priority::Medium, 2),
            due_in("task_a", now, 3, Priority::Medium, 2),
        ];
        assert_eq!(ids(&rank(&tasks, now)), vec!["task_a", "task_b", "task_c"]);
    }

    #[test]
    fn test_rank_pending_skips_other_statuses() {
        let now = make_date(2025, 6, 15);
        let tasks = vec![
            due_in("done", now, 0, Priority::High, 1).with_status(TaskStatus::Completed),
            due_in("open", now, 20, Priority::Low, 5),
            due_in("shelved", now, 1, Priority::High, 1).with_status(TaskStatus::Archived),
        ];
        assert_eq!(ids(&rank_pending(&tasks, now)), vec!["open"]);
    }

    #[test]
    fn test_empty_input() {
        let now = make_date(2025, 6, 15);
        assert!(rank(&[], now).is_empty());
        assert!(rank_pending(&[], now).is_empty());
    }
}
