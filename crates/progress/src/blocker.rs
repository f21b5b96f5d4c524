//! Task dependency diagnostics.
//!
//! Progress never follows `Task::dependencies`, so cycles and dangling ids
//! are harmless to it. This module reports them for display:
//! - open tasks waiting on open dependencies
//! - dependencies naming tasks that are not on the goal
//! - dependency cycles

use std::collections::{HashMap, HashSet};

use goalboard_core::{Task, TaskId};
use serde::Serialize;
use tracing::debug;

/// An open task held up by open dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedTask {
    /// The waiting task
    pub task: TaskId,
    /// Its unfinished dependencies
    pub blocked_by: Vec<TaskId>,
}

/// A dependency on a task id that is not in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDependency {
    /// The task declaring the dependency
    pub task: TaskId,
    /// The id it points at
    pub dependency: TaskId,
}

/// Result of dependency analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockerAnalysis {
    /// Open tasks waiting on open dependencies
    pub blocked: Vec<BlockedTask>,
    /// Dependencies on unknown tasks
    pub missing: Vec<MissingDependency>,
    /// Dependency cycles, each listed in dependency order
    pub circular_chains: Vec<Vec<TaskId>>,
}

impl BlockerAnalysis {
    /// Whether nothing was found.
    pub fn is_clear(&self) -> bool {
        self.blocked.is_empty() && self.missing.is_empty() && self.circular_chains.is_empty()
    }
}

/// Analyze the dependencies among `tasks`. Input is never modified.
pub fn analyze_dependencies(tasks: &[Task]) -> BlockerAnalysis {
    let task_map: HashMap<&TaskId, &Task> = tasks.iter().map(|t| (&t.id, t)).collect();
    let mut analysis = BlockerAnalysis::default();

    for task in tasks {
        let mut blocked_by = Vec::new();
        for dep_id in &task.dependencies {
            match task_map.get(dep_id) {
                Some(dep) if !dep.completed && !task.completed => blocked_by.push(dep_id.clone()),
                Some(_) => {}
                None => analysis.missing.push(MissingDependency {
                    task: task.id.clone(),
                    dependency: dep_id.clone(),
                }),
            }
        }
        if !blocked_by.is_empty() {
            analysis.blocked.push(BlockedTask {
                task: task.id.clone(),
                blocked_by,
            });
        }
    }

    let mut visited = HashSet::new();
    let mut path = Vec::new();
    for task in tasks {
        if !visited.contains(&task.id) {
            find_cycles(&task.id, &task_map, &mut visited, &mut path, &mut analysis.circular_chains);
        }
    }

    debug!(
        "Dependency analysis: {} blocked, {} missing, {} cycles",
        analysis.blocked.len(),
        analysis.missing.len(),
        analysis.circular_chains.len()
    );
    analysis
}

/// Depth-first search recording every back edge as a cycle.
fn find_cycles<'a>(
    node: &'a TaskId,
    task_map: &HashMap<&'a TaskId, &'a Task>,
    visited: &mut HashSet<&'a TaskId>,
    path: &mut Vec<&'a TaskId>,
    cycles: &mut Vec<Vec<TaskId>>,
) {
    visited.insert(node);
    path.push(node);

    if let Some(&task) = task_map.get(node) {
        for dep_id in &task.dependencies {
            if let Some(start) = path.iter().position(|id| *id == dep_id) {
                cycles.push(path[start..].iter().map(|id| (*id).clone()).collect());
            } else if !visited.contains(dep_id) && task_map.contains_key(dep_id) {
                find_cycles(dep_id, task_map, visited, path, cycles);
            }
        }
    }

    path.pop();
}
