// src/manager.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::errors::Result;
use crate::exec::WorkQueue;
use crate::graph::{DepGraph, toposort};
use crate::snapshot::Snapshot;
use crate::task::Task;

/// Owns the live set of registered tasks and turns it into executable
/// snapshots.
///
/// The registered set is the only universe the sorter resolves dependencies
/// against: a registered task may point at an unregistered one, and nothing
/// complains until [`build_snapshot`](Self::build_snapshot) is called. All
/// methods take `&self`, so a manager wrapped in an `Arc` can be shared
/// freely across threads; independent managers do not interfere with each
/// other.
pub struct TaskManager {
    tasks: Mutex<HashSet<Task>>,
    queue: Arc<dyn WorkQueue>,
}

impl TaskManager {
    /// A manager whose snapshots will submit to `queue`.
    pub fn new(queue: Arc<dyn WorkQueue>) -> Self {
        Self {
            tasks: Mutex::new(HashSet::new()),
            queue,
        }
    }

    /// Register a task into the live set.
    ///
    /// Idempotent: registering the same task twice leaves the set unchanged.
    /// Every dependency of a registered task must itself be registered before
    /// a snapshot is built, otherwise the build fails with
    /// [`TaskNotRegistered`](crate::errors::TaskDagError::TaskNotRegistered).
    pub fn add(&self, task: &Task) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if tasks.insert(task.clone()) {
            debug!(task = %task.display_name(), "registered task");
        } else {
            debug!(task = %task.display_name(), "task already registered; ignoring");
        }
    }

    /// Number of registered tasks.
    pub fn task_count(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Build an immutable execution plan from the current registered set.
    ///
    /// The set is copied under the lock and the lock released before any
    /// graph work happens, so the build can never observe a torn view and
    /// never blocks concurrent registration for longer than the copy.
    /// Registrations and dependency additions racing with the build are
    /// simply not part of this snapshot; manager state is untouched whether
    /// the build succeeds or fails, so the caller may fix the graph and
    /// retry.
    pub fn build_snapshot(&self) -> Result<Snapshot> {
        let registered: Vec<Task> = {
            let tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
            tasks.iter().cloned().collect()
        };

        let graph = DepGraph::build(&registered);
        let order = toposort(&graph)?;

        debug!(tasks = order.len(), "built execution snapshot");
        Ok(Snapshot::new(order, Arc::clone(&self.queue)))
    }
}
