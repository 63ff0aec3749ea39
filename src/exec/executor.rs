// src/exec/executor.rs

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{info, warn};

use super::WorkQueue;
use crate::task::Task;

/// Sending half of an executor loop spawned by [`spawn_executor`] or
/// [`spawn_serial_executor`].
///
/// Cheap to clone. The loop keeps running as long as any handle is alive;
/// once every handle is dropped it finishes whatever was submitted and its
/// join handle resolves. The binary relies on that to exit cleanly after a
/// one-shot run.
#[derive(Clone)]
pub struct QueueHandle {
    tx: mpsc::UnboundedSender<Task>,
}

impl WorkQueue for QueueHandle {
    fn submit(&self, task: Task) {
        // Unbounded send never blocks; it only fails if the loop is gone.
        if self.tx.send(task).is_err() {
            warn!("executor loop is gone; dropping submitted task");
        }
    }
}

/// Spawn an executor that runs each submitted task on its own blocking
/// worker.
///
/// Submissions may run in parallel, so completion order is unrelated to
/// submission order.
pub fn spawn_executor() -> (QueueHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Task>();

    let handle = tokio::spawn(async move {
        info!("parallel executor loop started");

        let mut running = JoinSet::new();
        while let Some(task) = rx.recv().await {
            running.spawn_blocking(move || task.execute());
        }

        while let Some(res) = running.join_next().await {
            if let Err(err) = res {
                warn!(error = %err, "task worker panicked");
            }
        }

        info!("parallel executor loop finished (all handles dropped)");
    });

    (QueueHandle { tx }, handle)
}

/// Spawn an executor that runs submitted tasks one at a time, in submission
/// order.
///
/// Combined with a snapshot's topological submission order this means every
/// dependency has finished before a dependent starts: the serial queue is
/// the one configuration where completion order matches submission order.
pub fn spawn_serial_executor() -> (QueueHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Task>();

    let handle = tokio::spawn(async move {
        info!("serial executor loop started");

        while let Some(task) = rx.recv().await {
            if let Err(err) = tokio::task::spawn_blocking(move || task.execute()).await {
                warn!(error = %err, "task worker panicked");
            }
        }

        info!("serial executor loop finished (all handles dropped)");
    });

    (QueueHandle { tx }, handle)
}
