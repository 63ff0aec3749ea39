// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod graph;
pub mod logging;
pub mod manager;
pub mod snapshot;
pub mod task;

pub use errors::{Result, TaskDagError};
pub use manager::TaskManager;
pub use snapshot::Snapshot;
pub use task::{Task, TaskId};

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::{ConfigFile, QueueMode};
use crate::exec::{WorkQueue, shell_task, spawn_executor, spawn_serial_executor};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the work-queue executor (serial or parallel, per `[queue].mode`)
/// - task construction, dependency wiring and registration
/// - snapshot building and one-shot execution
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let cfg = load_and_validate(&args.config)
        .with_context(|| format!("loading config from '{}'", args.config))?;

    if args.dry_run {
        print_dry_run(&cfg)?;
        return Ok(());
    }

    let (queue, executor) = match cfg.queue.mode {
        QueueMode::Serial => spawn_serial_executor(),
        QueueMode::Parallel => spawn_executor(),
    };

    let manager = manager_from_config(&cfg, Arc::new(queue));
    let snapshot = manager.build_snapshot()?;

    info!(
        tasks = snapshot.len(),
        mode = ?cfg.queue.mode,
        "submitting execution snapshot"
    );
    snapshot.execute();

    // Release every queue handle so the executor loop can drain and stop.
    drop(snapshot);
    drop(manager);
    executor.await?;

    Ok(())
}

/// Build a [`TaskManager`] with one task per `[task.<name>]` entry, wired
/// according to each entry's `after` list and registered with the manager.
///
/// Entries with a `cmd` run it through the platform shell; entries without
/// one just log their identity when executed. Assumes the config passed
/// [`validate_config`](crate::config::validate::validate_config), so every
/// `after` name resolves.
pub fn manager_from_config(cfg: &ConfigFile, queue: Arc<dyn WorkQueue>) -> TaskManager {
    let manager = TaskManager::new(queue);
    let mut tasks: BTreeMap<&str, Task> = BTreeMap::new();

    for (name, tc) in cfg.task.iter() {
        let task = match &tc.cmd {
            Some(cmd) => shell_task(name, tc.priority, cmd),
            None => Task::labeled(name.as_str(), tc.priority),
        };
        manager.add(&task);
        tasks.insert(name, task);
    }

    for (name, tc) in cfg.task.iter() {
        let Some(task) = tasks.get(name.as_str()) else {
            continue;
        };
        for dep in tc.after.iter() {
            if let Some(dep_task) = tasks.get(dep.as_str()) {
                task.add_dependency(dep_task);
            }
        }
    }

    manager
}

/// Queue that discards submissions; used for `--dry-run`.
struct NullQueue;

impl WorkQueue for NullQueue {
    fn submit(&self, _task: Task) {}
}

/// Dry-run output: the planned execution order, without running anything.
///
/// Builds a real snapshot against a discarding queue, so a cyclic or
/// mis-wired config fails here exactly as it would on a real run.
fn print_dry_run(cfg: &ConfigFile) -> anyhow::Result<()> {
    let manager = manager_from_config(cfg, Arc::new(NullQueue));
    let snapshot = manager.build_snapshot()?;

    println!("taskdag dry-run");
    println!("  queue.mode = {:?}", cfg.queue.mode);
    println!();

    println!("planned order ({} tasks):", snapshot.len());
    for task in snapshot.tasks() {
        let mut deps: Vec<String> = task
            .dependencies()
            .iter()
            .map(Task::display_name)
            .collect();
        deps.sort();

        if deps.is_empty() {
            println!("  - {} (priority {})", task.display_name(), task.priority());
        } else {
            println!(
                "  - {} (priority {}, after: {})",
                task.display_name(),
                task.priority(),
                deps.join(", ")
            );
        }
    }

    Ok(())
}
