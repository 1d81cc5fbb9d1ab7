//! Goal planning engine: dependency-aware scheduling and priority ranking.
//!
//! The two core pieces are independent of each other:
//! - [`scheduler`] turns a batch of tasks with durations and dependency ids
//!   into concrete calendar dates.
//! - [`ranking`] scores pending, already-dated tasks for a "what now" view.
//!
//! [`planner`] sits in front of the scheduler and turns task drafts into a
//! valid batch; [`views`] offers date-window filters over stored tasks.
//! Everything is pure and synchronous.

pub mod config;
mod interner;
pub mod logging;
pub mod models;
pub mod planner;
pub mod ranking;
pub mod scheduler;
pub mod views;

#[cfg(feature = "python")]
mod python;

pub use config::{PlannerConfig, SchedulingConfig};
pub use models::{Priority, Schedule, Task, TaskDraft, TaskStatus};
pub use planner::{parse_drafts, DraftSource, Plan, Planner, PlannerError};
pub use ranking::{rank, rank_pending, score, PriorityScore, UrgencyBand};
pub use scheduler::{schedule, schedule_from_iso, topological_order, ScheduleError};
pub use views::{overdue_tasks, todays_tasks, upcoming_tasks};
