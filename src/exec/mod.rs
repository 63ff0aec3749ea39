// src/exec/mod.rs

//! Work-queue abstraction and the executors behind it.
//!
//! Snapshots only know how to hand tasks to a [`WorkQueue`]; what happens
//! after a submission is entirely the queue's business.
//!
//! - [`executor`] owns the tokio-backed executor loops and their
//!   [`QueueHandle`].
//! - [`command`] builds shell-command units of work for config-defined
//!   tasks.

pub mod command;
pub mod executor;

pub use command::shell_task;
pub use executor::{QueueHandle, spawn_executor, spawn_serial_executor};

use crate::task::Task;

/// Sink that snapshots submit tasks to.
///
/// `submit` must return immediately and makes no ordering promise between
/// two submissions; whether they run serially or in parallel is up to the
/// implementation, and nothing here waits for a task to finish. Production
/// code uses the handles returned by [`spawn_executor`] /
/// [`spawn_serial_executor`]; tests can implement the trait with a recorder
/// instead.
pub trait WorkQueue: Send + Sync {
    fn submit(&self, task: Task);
}
