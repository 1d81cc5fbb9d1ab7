//! Dependency graph of one batch and its Kahn traversal.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::interner::{TaskIdInterner, TaskIdx};
use crate::models::Task;
use crate::{log_checks, log_debug};

use super::core::ScheduleError;

/// Index-based adjacency for a validated batch.
///
/// Both adjacency lists are filled in input order, so releases during the
/// traversal happen in input order as well.
#[derive(Debug)]
pub(crate) struct DependencyGraph<'a> {
    ids: TaskIdInterner<'a>,
    /// Distinct direct dependencies of each task.
    dependencies: Vec<Vec<TaskIdx>>,
    /// Tasks that directly depend on each task.
    dependents: Vec<Vec<TaskIdx>>,
}

impl<'a> DependencyGraph<'a> {
    /// Validate the batch and build its adjacency.
    ///
    /// Rejects empty batches, duplicate ids, self references and references
    /// to ids outside the batch before any ordering work starts.
    pub(crate) fn build(tasks: &'a [Task]) -> Result<Self, ScheduleError> {
        if tasks.is_empty() {
            return Err(ScheduleError::EmptyBatch);
        }

        let ids = TaskIdInterner::from_unique(tasks.iter().map(|t| t.id.as_str()))
            .map_err(|id| ScheduleError::DuplicateTaskId(id.to_string()))?;

        let mut dependencies: Vec<Vec<TaskIdx>> = vec![Vec::new(); tasks.len()];
        let mut dependents: Vec<Vec<TaskIdx>> = vec![Vec::new(); tasks.len()];

        for (idx, task) in tasks.iter().enumerate() {
            let mut seen: FxHashSet<TaskIdx> = FxHashSet::default();
            for dep_id in &task.depends_on_ids {
                if *dep_id == task.id {
                    return Err(ScheduleError::SelfDependency(task.id.clone()));
                }
                let dep_idx =
                    ids.get(dep_id)
                        .ok_or_else(|| ScheduleError::UnknownDependency {
                            task_id: task.id.clone(),
                            dependency_id: dep_id.clone(),
                        })?;
                // Repeated ids count once
                if seen.insert(dep_idx) {
                    dependencies[idx].push(dep_idx);
                    dependents[dep_idx as usize].push(idx as TaskIdx);
                }
            }
        }

        Ok(Self {
            ids,
            dependencies,
            dependents,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn dependencies(&self, idx: TaskIdx) -> &[TaskIdx] {
        &self.dependencies[idx as usize]
    }

    pub(crate) fn id(&self, idx: TaskIdx) -> &'a str {
        self.ids.resolve(idx).unwrap_or_default()
    }

    /// Kahn's algorithm over a FIFO ready queue seeded in input order.
    ///
    /// Returns indices such that every task comes after all of its
    /// dependencies, or `CyclicDependency` naming every task that could not
    /// be placed.
    pub(crate) fn topological_order(&self, verbosity: u8) -> Result<Vec<TaskIdx>, ScheduleError> {
        let mut in_degree: Vec<usize> = self.dependencies.iter().map(Vec::len).collect();

        log_debug!(
            verbosity,
            "[graph] in-degrees: {:?}",
            in_degree
                .iter()
                .enumerate()
                .map(|(i, d)| (self.id(i as TaskIdx), *d))
                .collect::<Vec<_>>()
        );

        let mut queue: VecDeque<TaskIdx> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(idx, _)| idx as TaskIdx)
            .collect();

        let mut order: Vec<TaskIdx> = Vec::with_capacity(self.len());

        while let Some(idx) = queue.pop_front() {
            order.push(idx);

            for &dependent in &self.dependents[idx as usize] {
                let degree = &mut in_degree[dependent as usize];
                *degree -= 1;
                if *degree == 0 {
                    log_checks!(
                        verbosity,
                        "[graph] {} released by {}",
                        self.id(dependent),
                        self.id(idx)
                    );
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() != self.len() {
            let unplaced: Vec<String> = in_degree
                .iter()
                .enumerate()
                .filter(|(_, &degree)| degree > 0)
                .map(|(idx, _)| self.id(idx as TaskIdx).to_string())
                .collect();
            return Err(ScheduleError::CyclicDependency(unplaced));
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, deps: &[&str]) -> Task {
        Task::new(id, id.to_uppercase(), 1).with_dependencies(deps.iter().copied())
    }

    fn ordered_ids(tasks: &[Task]) -> Result<Vec<String>, ScheduleError> {
        let graph = DependencyGraph::build(tasks)?;
        let order = graph.topological_order(0)?;
        Ok(order.into_iter().map(|i| graph.id(i).to_string()).collect())
    }

    #[test]
    fn test_roots_keep_input_order() {
        let tasks = vec![make_task("c", &[]), make_task("a", &[]), make_task("b", &[])];
        assert_eq!(ordered_ids(&tasks).unwrap(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_dependency_listed_after_dependent() {
        let tasks = vec![
            make_task("deploy", &["build"]),
            make_task("build", &["fetch"]),
            make_task("fetch", &[]),
        ];
        assert_eq!(ordered_ids(&tasks).unwrap(), vec!["fetch", "build", "deploy"]);
    }

    #[test]
    fn test_diamond_releases_in_input_order() {
        let tasks = vec![
            make_task("a", &[]),
            make_task("d", &["b", "c"]),
            make_task("c", &["a"]),
            make_task("b", &["a"]),
        ];
        assert_eq!(ordered_ids(&tasks).unwrap(), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_repeated_dependency_counts_once() {
        let tasks = vec![make_task("a", &[]), make_task("b", &["a", "a"])];
        assert_eq!(ordered_ids(&tasks).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_cycle_reports_unplaced_tasks() {
        let tasks = vec![
            make_task("root", &[]),
            make_task("x", &["root", "y"]),
            make_task("y", &["x"]),
            make_task("tail", &["y"]),
        ];
        assert_eq!(
            ordered_ids(&tasks),
            Err(ScheduleError::CyclicDependency(vec![
                "x".to_string(),
                "y".to_string(),
                "tail".to_string()
            ]))
        );
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(ordered_ids(&[]), Err(ScheduleError::EmptyBatch));

        let dup = vec![make_task("a", &[]), make_task("a", &[])];
        assert_eq!(
            ordered_ids(&dup),
            Err(ScheduleError::DuplicateTaskId("a".to_string()))
        );

        let selfish = vec![make_task("a", &["a"])];
        assert_eq!(
            ordered_ids(&selfish),
            Err(ScheduleError::SelfDependency("a".to_string()))
        );

        let dangling = vec![make_task("a", &[]), make_task("b", &["ghost"])];
        assert_eq!(
            ordered_ids(&dangling),
            Err(ScheduleError::UnknownDependency {
                task_id: "b".to_string(),
                dependency_id: "ghost".to_string(),
            })
        );
    }
}
