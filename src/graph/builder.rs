// src/graph/builder.rs

use std::collections::HashMap;

use crate::task::{Task, TaskId};

/// Adjacency view of the dependency relation over a fixed set of tasks.
///
/// Built from a point-in-time copy of the manager's registered set. Every
/// registered task is a key, even with no dependencies and no dependents;
/// its value is the list of direct dependencies sorted by ascending priority
/// (ties broken by id, so a fixed input always yields the same list). The
/// per-list priority order controls DFS visitation order in
/// [`toposort`](crate::graph::toposort::toposort), which is the only way
/// priority influences the final order among otherwise unconstrained tasks.
#[derive(Debug, Clone)]
pub struct DepGraph {
    /// Registered tasks in ascending-id order; fixes a deterministic
    /// iteration order for the traversal.
    tasks: Vec<Task>,
    /// Direct dependencies per registered task.
    edges: HashMap<TaskId, Vec<Task>>,
}

impl DepGraph {
    /// Build the adjacency view from a copy of the registered set.
    ///
    /// Each task's dependency set is read through its thread-safe accessor,
    /// so an individual list can never be torn; `add_dependency` calls racing
    /// with the build may or may not be observed.
    pub fn build(registered: &[Task]) -> Self {
        let mut tasks: Vec<Task> = registered.to_vec();
        tasks.sort_by_key(Task::id);

        let mut edges = HashMap::with_capacity(tasks.len());
        for task in &tasks {
            let mut deps: Vec<Task> = task.dependencies().into_iter().collect();
            deps.sort_by_key(|dep| (dep.priority(), dep.id()));
            edges.insert(task.id(), deps);
        }

        Self { tasks, edges }
    }

    /// Registered tasks in deterministic order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Direct dependencies of a registered task, lowest priority first.
    ///
    /// Returns `None` for ids that were never registered, which is how the
    /// sorter's validation pass tells a missing registration apart from an
    /// empty dependency list.
    pub fn dependencies_of(&self, id: TaskId) -> Option<&[Task]> {
        self.edges.get(&id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
