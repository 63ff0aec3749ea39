// src/graph/toposort.rs

use std::collections::{HashMap, HashSet};

use crate::errors::{Result, TaskDagError};
use crate::graph::builder::DepGraph;
use crate::task::{Task, TaskId};

/// Produce a dependency-respecting linear order over the graph's tasks.
///
/// Depth-first post-order traversal: every task is emitted after all tasks
/// reachable through its dependency edges, so prerequisites land before their
/// dependents. The traversal itself tolerates cycles (the visited set stops
/// revisits) and silently skips dependencies that were never registered; the
/// candidate order is therefore checked position-by-position afterwards, and
/// that validation pass is what actually reports [`TaskDagError::CyclicDependency`]
/// and [`TaskDagError::TaskNotRegistered`].
///
/// For a fixed graph the result is fully deterministic: roots are visited in
/// ascending-id order and each dependency list is pre-sorted by the builder.
pub fn toposort(graph: &DepGraph) -> Result<Vec<Task>> {
    let mut visited: HashSet<TaskId> = HashSet::with_capacity(graph.len());
    let mut order: Vec<Task> = Vec::with_capacity(graph.len());

    for task in graph.tasks() {
        visit(graph, task, &mut visited, &mut order);
    }

    validate(graph, &order)?;
    Ok(order)
}

/// One DFS frame: expand a task's dependencies, or emit the task once they
/// have all been expanded.
enum Frame<'a> {
    Enter(&'a Task),
    Emit(&'a Task),
}

/// Post-order DFS from `root`, with an explicit stack so the traversal depth
/// is not limited by the call stack on long dependency chains.
fn visit<'a>(
    graph: &'a DepGraph,
    root: &'a Task,
    visited: &mut HashSet<TaskId>,
    order: &mut Vec<Task>,
) {
    let mut stack = vec![Frame::Enter(root)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(task) => {
                if !visited.insert(task.id()) {
                    continue;
                }

                // A dependency that was never registered has no adjacency
                // entry: mark it visited but emit nothing, so the validation
                // pass finds it without a position.
                let Some(deps) = graph.dependencies_of(task.id()) else {
                    continue;
                };

                stack.push(Frame::Emit(task));
                // Reversed so the lowest-priority dependency is expanded
                // first, matching the recursive visitation order.
                for dep in deps.iter().rev() {
                    stack.push(Frame::Enter(dep));
                }
            }
            Frame::Emit(task) => order.push(task.clone()),
        }
    }
}

/// Prove the candidate order, or say why it is not a topological order.
///
/// For every task and each of its direct dependencies:
/// - a dependency without a recorded position was never registered with the
///   manager;
/// - a dependency positioned at or after its dependent means the dependency
///   relation contains a cycle, which plain visited-marking DFS walks through
///   without noticing.
fn validate(graph: &DepGraph, order: &[Task]) -> Result<()> {
    let positions: HashMap<TaskId, usize> = order
        .iter()
        .enumerate()
        .map(|(idx, task)| (task.id(), idx))
        .collect();

    for (idx, task) in order.iter().enumerate() {
        let Some(deps) = graph.dependencies_of(task.id()) else {
            continue;
        };

        for dep in deps {
            let Some(&dep_idx) = positions.get(&dep.id()) else {
                return Err(TaskDagError::TaskNotRegistered {
                    task: task.display_name(),
                    dependency: dep.display_name(),
                });
            };
            if dep_idx >= idx {
                return Err(TaskDagError::CyclicDependency {
                    task: task.display_name(),
                });
            }
        }
    }

    Ok(())
}
