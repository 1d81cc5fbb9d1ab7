//! Goal planning: turns task drafts into a batch the scheduler can date.
//!
//! Drafts come from an external generator (any [`DraftSource`]) or from the
//! keyword templates. Normalization then:
//! 1. assigns ids and clamps durations to whole days, at least one
//! 2. resolves `depends_on_titles` to ids, case-insensitively
//! 3. rescales durations to the goal's timeframe, if it names one
//! 4. chains tasks in input order when nothing declared a dependency
//!
//! The scheduler itself never invents dependencies; step 4 happens here.

mod response;
mod templates;
mod timeframe;

pub use response::parse_drafts;
pub use templates::{heuristic_drafts, template_name};
pub use timeframe::{extract_timeframe_days, rescale_durations};

use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::models::{Schedule, Task, TaskDraft};
use crate::scheduler::{schedule_with_config, ScheduleError};
use crate::{log_changes, log_checks};

/// Errors that can occur while planning a goal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Goal text is empty")]
    EmptyGoal,
    #[error("No task drafts available and heuristic fallback is disabled")]
    NoDrafts,
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// External generator of task drafts for a goal.
///
/// Returning `None` (or an empty list) means "nothing usable"; the planner
/// then decides whether to fall back to the keyword templates. Sources that
/// receive raw generator text can hand it to [`parse_drafts`].
pub trait DraftSource {
    fn drafts(&self, goal: &str) -> Option<Vec<TaskDraft>>;
}

impl<F> DraftSource for F
where
    F: Fn(&str) -> Option<Vec<TaskDraft>>,
{
    fn drafts(&self, goal: &str) -> Option<Vec<TaskDraft>> {
        self(goal)
    }
}

/// A scheduled plan for one goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub goal: String,
    #[serde(flatten)]
    pub schedule: Schedule,
}

/// Whole days for a draft duration: rounded up, at least one.
pub fn normalize_duration(duration_days: Option<f64>) -> u32 {
    match duration_days {
        Some(d) if d.is_finite() => d.ceil().clamp(1.0, f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

/// Make each task depend on the previous one when no task declares a dependency.
///
/// Returns whether a chain was injected.
pub fn chain_if_unlinked(tasks: &mut [Task]) -> bool {
    if tasks.len() < 2 || tasks.iter().any(|t| !t.depends_on_ids.is_empty()) {
        return false;
    }
    for i in 1..tasks.len() {
        let previous = tasks[i - 1].id.clone();
        tasks[i].depends_on_ids = vec![previous];
    }
    true
}

/// Normalize drafts into tasks, drawing ids from `next_id`.
///
/// Dependency titles that match no draft, or that point back at the draft
/// itself, are dropped. When two drafts share a title, references resolve to
/// the later one.
pub fn materialize_with_ids<F>(
    drafts: &[TaskDraft],
    goal: &str,
    config: &PlannerConfig,
    mut next_id: F,
) -> Vec<Task>
where
    F: FnMut() -> String,
{
    let mut tasks: Vec<Task> = drafts
        .iter()
        .map(|draft| {
            let mut task = Task::new(
                next_id(),
                draft.title.clone(),
                normalize_duration(draft.duration_days),
            );
            task.description = draft.description.clone().unwrap_or_default();
            task.priority = draft.priority.unwrap_or_default();
            task
        })
        .collect();

    let title_to_id: FxHashMap<String, String> = tasks
        .iter()
        .map(|t| (t.title.to_lowercase(), t.id.clone()))
        .collect();

    for (task, draft) in tasks.iter_mut().zip(drafts) {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut resolved = Vec::with_capacity(draft.depends_on_titles.len());
        for title in &draft.depends_on_titles {
            match title_to_id.get(&title.to_lowercase()) {
                Some(id) if *id != task.id => {
                    if seen.insert(id.as_str()) {
                        resolved.push(id.clone());
                    }
                }
                _ => log_checks!(
                    config.verbosity,
                    "[planner] dropped dependency {:?} of {:?}",
                    title,
                    task.title
                ),
            }
        }
        task.depends_on_ids = resolved;
    }

    if let Some(target) = extract_timeframe_days(goal) {
        let mut durations: Vec<u32> = tasks.iter().map(|t| t.duration_days).collect();
        if rescale_durations(&mut durations, target) {
            log_changes!(
                config.verbosity,
                "[planner] rescaled durations to {} days: {:?}",
                target,
                durations
            );
            for (task, duration) in tasks.iter_mut().zip(durations) {
                task.duration_days = duration;
            }
        }
    }

    if config.chain_when_unlinked && chain_if_unlinked(&mut tasks) {
        log_changes!(
            config.verbosity,
            "[planner] no dependencies declared, chained {} tasks",
            tasks.len()
        );
    }

    tasks
}

/// Normalize drafts into tasks with random UUID ids.
pub fn materialize(drafts: &[TaskDraft], goal: &str, config: &PlannerConfig) -> Vec<Task> {
    materialize_with_ids(drafts, goal, config, || Uuid::new_v4().to_string())
}

/// Drafts, normalizes and schedules goals.
pub struct Planner<'a> {
    source: Option<&'a dyn DraftSource>,
    config: PlannerConfig,
}

impl<'a> Planner<'a> {
    /// A planner that only uses the keyword templates.
    pub fn heuristic(config: PlannerConfig) -> Self {
        Self {
            source: None,
            config,
        }
    }

    pub fn with_source(source: &'a dyn DraftSource, config: PlannerConfig) -> Self {
        Self {
            source: Some(source),
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Drafts from the source, else from the templates if allowed.
    pub fn drafts(&self, goal: &str) -> Result<Vec<TaskDraft>, PlannerError> {
        if goal.trim().is_empty() {
            return Err(PlannerError::EmptyGoal);
        }

        if let Some(drafts) = self
            .source
            .and_then(|source| source.drafts(goal))
            .filter(|drafts| !drafts.is_empty())
        {
            return Ok(drafts);
        }

        if !self.config.allow_heuristic_fallback {
            return Err(PlannerError::NoDrafts);
        }

        log_checks!(
            self.config.verbosity,
            "[planner] using {} template for {:?}",
            template_name(goal),
            goal
        );
        Ok(heuristic_drafts(goal, self.config.default_window_days))
    }

    /// Normalized, unscheduled tasks for a goal.
    pub fn plan_tasks(&self, goal: &str) -> Result<Vec<Task>, PlannerError> {
        let drafts = self.drafts(goal)?;
        Ok(materialize(&drafts, goal, &self.config))
    }

    /// Draft, normalize and schedule a goal from `start_date`.
    pub fn plan(&self, goal: &str, start_date: NaiveDate) -> Result<Plan, PlannerError> {
        let tasks = self.plan_tasks(goal)?;
        let schedule = schedule_with_config(&tasks, start_date, &self.config.scheduling())?;
        Ok(Plan {
            goal: goal.to_string(),
            schedule,
        })
    }
}
