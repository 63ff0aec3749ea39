// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [queue]
/// mode = "serial"
///
/// [task.fetch]
/// priority = 8
/// cmd = "echo fetch"
///
/// [task.build]
/// priority = 10
/// after = ["fetch"]
/// cmd = "echo build"
/// ```
///
/// The `[queue]` section is optional and defaults to a serial queue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Work-queue behaviour from `[queue]`.
    #[serde(default)]
    pub queue: QueueSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[queue]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueSection {
    /// Whether submitted tasks run one at a time or in parallel.
    #[serde(default)]
    pub mode: QueueMode,
}

/// Execution mode of the work queue that snapshots submit to.
///
/// - `Serial` (default): one task at a time; completion order matches
///   submission order, so dependencies are guaranteed to have *finished*
///   before dependents start.
/// - `Parallel`: each task on its own worker; only submission order is
///   guaranteed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueMode {
    #[default]
    Serial,
    Parallel,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Priority hint; higher values are favoured among unrelated tasks, but
    /// dependency ordering always wins.
    #[serde(default)]
    pub priority: i32,

    /// Names of tasks that must be ordered before this one.
    ///
    /// This is the TOML `after = ["A", "B"]` field.
    #[serde(default)]
    pub after: Vec<String>,

    /// Shell command to run; when omitted the task just logs its identity.
    #[serde(default)]
    pub cmd: Option<String>,
}
