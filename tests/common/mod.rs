#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use tracing_subscriber::{EnvFilter, fmt};

use taskdag::exec::WorkQueue;
use taskdag::{Task, TaskId};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Uses `with_test_writer()`, so output is captured per-test and only shown
/// for failing tests (unless `-- --nocapture`). Enable levels with e.g.
/// `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Work queue that records submissions instead of running anything.
///
/// The scheduler core only needs "submit returns immediately", and the
/// submission order is exactly what the ordering tests want to observe.
#[derive(Default)]
pub struct RecordingQueue {
    submitted: Mutex<Vec<TaskId>>,
}

impl RecordingQueue {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Ids in submission order, copied out.
    pub fn submitted(&self) -> Vec<TaskId> {
        self.submitted.lock().unwrap().clone()
    }
}

impl WorkQueue for RecordingQueue {
    fn submit(&self, task: Task) {
        self.submitted.lock().unwrap().push(task.id());
    }
}

/// Position of `task` in `order`, panicking if absent.
pub fn position(order: &[Task], task: &Task) -> usize {
    order
        .iter()
        .position(|t| t == task)
        .unwrap_or_else(|| panic!("task '{}' missing from order", task.display_name()))
}

/// Assert that every dependency of every task in `order` appears strictly
/// before the task itself.
pub fn assert_valid_order(order: &[Task]) {
    for (idx, task) in order.iter().enumerate() {
        for dep in task.dependencies() {
            let dep_idx = position(order, &dep);
            assert!(
                dep_idx < idx,
                "dependency '{}' of '{}' at position {dep_idx}, dependent at {idx}",
                dep.display_name(),
                task.display_name(),
            );
        }
    }
}
