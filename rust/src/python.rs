//! Python bindings for the planning engine.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{PlannerConfig, SchedulingConfig};
use crate::models::{Schedule, Task};
use crate::planner::Planner;
use crate::ranking;
use crate::scheduler::schedule_with_config;

/// A task as seen from Python; enums travel as lower-case strings.
#[pyclass(name = "Task")]
#[derive(Clone, Debug)]
pub struct PyTask {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub description: String,
    #[pyo3(get, set)]
    pub duration_days: u32,
    #[pyo3(get, set)]
    pub depends_on_ids: Vec<String>,
    #[pyo3(get, set)]
    pub priority: String,
    #[pyo3(get, set)]
    pub start_date: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub end_date: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub status: String,
}

#[pymethods]
impl PyTask {
    #[new]
    #[pyo3(signature = (
        id,
        title,
        duration_days,
        depends_on_ids=None,
        priority=None,
        description=None,
        start_date=None,
        end_date=None,
        status=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: String,
        title: String,
        duration_days: u32,
        depends_on_ids: Option<Vec<String>>,
        priority: Option<String>,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            description: description.unwrap_or_default(),
            duration_days,
            depends_on_ids: depends_on_ids.unwrap_or_default(),
            priority: priority.unwrap_or_else(|| "medium".to_string()),
            start_date,
            end_date,
            status: status.unwrap_or_else(|| "pending".to_string()),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, duration_days={}, deps={}, start={:?}, end={:?})",
            self.id,
            self.duration_days,
            self.depends_on_ids.len(),
            self.start_date,
            self.end_date
        )
    }
}

impl TryFrom<PyTask> for Task {
    type Error = PyErr;

    fn try_from(value: PyTask) -> Result<Self, Self::Error> {
        Ok(Task {
            id: value.id,
            title: value.title,
            description: value.description,
            duration_days: value.duration_days,
            depends_on_ids: value.depends_on_ids,
            priority: value.priority.parse().map_err(PyValueError::new_err)?,
            start_date: value.start_date,
            end_date: value.end_date,
            status: value.status.parse().map_err(PyValueError::new_err)?,
        })
    }
}

impl From<Task> for PyTask {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            duration_days: task.duration_days,
            depends_on_ids: task.depends_on_ids,
            priority: task.priority.as_str().to_string(),
            start_date: task.start_date,
            end_date: task.end_date,
            status: task.status.as_str().to_string(),
        }
    }
}

/// Scheduler output as seen from Python.
#[pyclass(name = "Schedule")]
#[derive(Clone, Debug)]
pub struct PySchedule {
    #[pyo3(get)]
    pub tasks: Vec<PyTask>,
    #[pyo3(get)]
    pub order: Vec<String>,
    #[pyo3(get)]
    pub overall_start: NaiveDate,
    #[pyo3(get)]
    pub overall_end: NaiveDate,
    #[pyo3(get)]
    pub total_days: i64,
}

#[pymethods]
impl PySchedule {
    fn __repr__(&self) -> String {
        format!(
            "Schedule(tasks={}, start={}, end={}, total_days={})",
            self.tasks.len(),
            self.overall_start,
            self.overall_end,
            self.total_days
        )
    }
}

impl From<Schedule> for PySchedule {
    fn from(schedule: Schedule) -> Self {
        Self {
            tasks: schedule.tasks.into_iter().map(PyTask::from).collect(),
            order: schedule.order,
            overall_start: schedule.overall_start,
            overall_end: schedule.overall_end,
            total_days: schedule.total_days,
        }
    }
}

fn to_tasks(tasks: Vec<PyTask>) -> PyResult<Vec<Task>> {
    tasks.into_iter().map(Task::try_from).collect()
}

/// Assign start/end dates to a batch of tasks.
///
/// # Raises
/// * ValueError on cycles, unknown or self dependencies, duplicate ids
#[pyfunction]
#[pyo3(signature = (tasks, start_date, verbosity=0))]
fn schedule_tasks(
    tasks: Vec<PyTask>,
    start_date: NaiveDate,
    verbosity: u8,
) -> PyResult<PySchedule> {
    let tasks = to_tasks(tasks)?;
    schedule_with_config(&tasks, start_date, &SchedulingConfig::with_verbosity(verbosity))
        .map(PySchedule::from)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Order tasks by descending priority score.
#[pyfunction]
fn rank_tasks(tasks: Vec<PyTask>, now: NaiveDate) -> PyResult<Vec<PyTask>> {
    let tasks = to_tasks(tasks)?;
    Ok(ranking::rank(&tasks, now)
        .into_iter()
        .cloned()
        .map(PyTask::from)
        .collect())
}

/// Priority score of a single task.
#[pyfunction]
fn priority_score(task: PyTask, now: NaiveDate) -> PyResult<i32> {
    let task = Task::try_from(task)?;
    Ok(ranking::score(&task, now))
}

/// Plan a goal from the keyword templates and schedule it.
#[pyfunction]
#[pyo3(signature = (goal, start_date, default_window_days=7, verbosity=0))]
fn plan_goal(
    goal: &str,
    start_date: NaiveDate,
    default_window_days: u32,
    verbosity: u8,
) -> PyResult<PySchedule> {
    let config = PlannerConfig {
        default_window_days: default_window_days.max(1),
        verbosity,
        ..PlannerConfig::default()
    };
    Planner::heuristic(config)
        .plan(goal, start_date)
        .map(|plan| PySchedule::from(plan.schedule))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// The goalplan.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTask>()?;
    m.add_class::<PySchedule>()?;

    m.add_function(wrap_pyfunction!(schedule_tasks, m)?)?;
    m.add_function(wrap_pyfunction!(rank_tasks, m)?)?;
    m.add_function(wrap_pyfunction!(priority_score, m)?)?;
    m.add_function(wrap_pyfunction!(plan_goal, m)?)?;

    Ok(())
}
