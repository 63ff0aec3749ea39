// src/snapshot.rs

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::exec::WorkQueue;
use crate::task::Task;

/// Immutable, reusable execution plan produced by
/// [`TaskManager::build_snapshot`](crate::manager::TaskManager::build_snapshot).
///
/// Holds a validated topological order and the work-queue handle captured
/// from the manager at build time. It is a point-in-time plan: registering
/// more tasks or adding dependencies afterwards does not affect it.
pub struct Snapshot {
    order: Vec<Task>,
    queue: Arc<dyn WorkQueue>,
}

impl Snapshot {
    pub(crate) fn new(order: Vec<Task>, queue: Arc<dyn WorkQueue>) -> Self {
        Self { order, queue }
    }

    /// Tasks in execution order: every dependency before its dependents.
    pub fn tasks(&self) -> &[Task] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Submit every task to the captured queue, in plan order, and return
    /// without waiting for anything to run.
    ///
    /// One submission per task per call; executing the snapshot again
    /// re-submits the full sequence. Only submission order is guaranteed:
    /// a parallel queue may complete tasks in any order, so "dependency
    /// *finished* before dependent *starts*" holds only on a serial queue.
    pub fn execute(&self) {
        for task in &self.order {
            debug!(task = %task.display_name(), "submitting task to work queue");
            self.queue.submit(task.clone());
        }
    }
}

// Manual impl: the queue handle is opaque, only the plan is interesting.
impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
