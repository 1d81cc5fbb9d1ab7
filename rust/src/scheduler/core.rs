//! Date assignment over a dependency-ordered batch.

use chrono::{DateTime, Days, NaiveDate};
use thiserror::Error;

use crate::config::SchedulingConfig;
use crate::log_changes;
use crate::models::{Schedule, Task};

use super::graph::DependencyGraph;

/// Errors that can occur during scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Cannot schedule an empty batch")]
    EmptyBatch,
    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(String),
    #[error("Task {0} depends on itself")]
    SelfDependency(String),
    #[error("Task {task_id} depends on unknown task {dependency_id}")]
    UnknownDependency {
        task_id: String,
        dependency_id: String,
    },
    #[error("Cyclic dependency detected among tasks: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),
    #[error("Invalid start date: {0:?}")]
    InvalidStartDate(String),
    #[error("Dates for task {0} fall outside the supported calendar range")]
    DateOutOfRange(String),
}

/// Parse a batch start date given as `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep only their calendar date as written, without timezone
/// conversion.
pub fn parse_start_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| ScheduleError::InvalidStartDate(value.to_string()))
}

/// Order a batch so every task follows all of its dependencies.
///
/// Ties among ready tasks resolve in input order.
pub fn topological_order(tasks: &[Task]) -> Result<Vec<String>, ScheduleError> {
    let graph = DependencyGraph::build(tasks)?;
    let order = graph.topological_order(0)?;
    Ok(order.into_iter().map(|idx| graph.id(idx).to_string()).collect())
}

/// Schedule a batch from `start_date` with default configuration.
pub fn schedule(tasks: &[Task], start_date: NaiveDate) -> Result<Schedule, ScheduleError> {
    schedule_with_config(tasks, start_date, &SchedulingConfig::default())
}

/// Schedule a batch whose start date is still in its string form.
pub fn schedule_from_iso(tasks: &[Task], start_date: &str) -> Result<Schedule, ScheduleError> {
    schedule(tasks, parse_start_date(start_date)?)
}

/// Assign start and end dates to every task in the batch.
///
/// Each task starts at the later of `start_date` and the latest end date of
/// its direct dependencies, and ends `duration_days` later (durations below
/// one day count as one). Any validation failure or cycle fails the whole
/// batch; no partial schedule is returned.
pub fn schedule_with_config(
    tasks: &[Task],
    start_date: NaiveDate,
    config: &SchedulingConfig,
) -> Result<Schedule, ScheduleError> {
    let graph = DependencyGraph::build(tasks)?;
    let order = graph.topological_order(config.verbosity)?;

    // (start, end) per input index; only read for already-dated dependencies
    let mut spans: Vec<(NaiveDate, NaiveDate)> = vec![(start_date, start_date); tasks.len()];

    for &idx in &order {
        let task = &tasks[idx as usize];

        let start = graph
            .dependencies(idx)
            .iter()
            .map(|&dep| spans[dep as usize].1)
            .fold(start_date, NaiveDate::max);

        let duration = u64::from(task.duration_days.max(1));
        let end = start
            .checked_add_days(Days::new(duration))
            .ok_or_else(|| ScheduleError::DateOutOfRange(task.id.clone()))?;

        log_changes!(
            config.verbosity,
            "[schedule] {} ({}d): {} -> {}",
            task.id,
            duration,
            start,
            end
        );

        spans[idx as usize] = (start, end);
    }

    let overall_start = spans
        .iter()
        .map(|&(start, _)| start)
        .min()
        .ok_or(ScheduleError::EmptyBatch)?;
    let overall_end = spans
        .iter()
        .map(|&(_, end)| end)
        .max()
        .ok_or(ScheduleError::EmptyBatch)?;
    let total_days = (overall_end - overall_start).num_days();

    let dated: Vec<Task> = tasks
        .iter()
        .zip(&spans)
        .map(|(task, &(start, end))| Task {
            start_date: Some(start),
            end_date: Some(end),
            ..task.clone()
        })
        .collect();

    log_changes!(
        config.verbosity,
        "[schedule] {} tasks span {} -> {} ({} days)",
        dated.len(),
        overall_start,
        overall_end,
        total_days
    );

    Ok(Schedule {
        tasks: dated,
        order: order
            .into_iter()
            .map(|idx| graph.id(idx).to_string())
            .collect(),
        overall_start,
        overall_end,
        total_days,
    })
}
