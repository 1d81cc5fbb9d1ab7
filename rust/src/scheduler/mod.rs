//! Dependency-aware scheduler.
//!
//! Orders a batch with Kahn's algorithm and lays every task onto the calendar
//! so that it starts only once all of its direct dependencies have ended.

mod core;
mod graph;

pub use core::{
    parse_start_date, schedule, schedule_from_iso, schedule_with_config, topological_order,
    ScheduleError,
};
