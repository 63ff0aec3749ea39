// src/exec/command.rs

use std::process::Command;

use tracing::{error, info, warn};

use crate::task::Task;

/// Build a task whose unit of work runs `cmd` through the platform shell.
///
/// This is what the binary wires up for `[task.<name>]` entries that carry a
/// `cmd`. The command runs on whatever blocking worker the executor hands it
/// to; its outcome is logged and otherwise ignored. A failing command does
/// not fail the run, matching the scheduler's fire-and-forget contract.
pub fn shell_task(name: &str, priority: i32, cmd: &str) -> Task {
    let task_name = name.to_string();
    let cmd = cmd.to_string();
    Task::with_work(name, priority, move || run_command(&task_name, &cmd))
}

/// Run a single shell command to completion, logging its outcome.
fn run_command(task: &str, cmd: &str) {
    info!(task, cmd, "starting task command");

    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    };

    match command.status() {
        Ok(status) if status.success() => {
            info!(task, "task command exited successfully");
        }
        Ok(status) => {
            warn!(task, exit_code = status.code(), "task command failed");
        }
        Err(err) => {
            error!(task, error = %err, "failed to spawn task command");
        }
    }
}
