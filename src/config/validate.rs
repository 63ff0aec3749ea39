// src/config/validate.rs

use crate::config::model::ConfigFile;
use crate::errors::{Result, TaskDagError};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - there is at least one task
/// - all `after` references name tasks defined in the file
/// - no task lists itself in `after`
///
/// It does **not** check the `after` relation for cycles: that is the
/// sorter's job, and a cyclic config fails at snapshot build time with a
/// structured [`CyclicDependency`](TaskDagError::CyclicDependency) instead.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(TaskDagError::Config(
            "config must contain at least one [task.<name>] section".to_string(),
        ));
    }

    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            if !cfg.task.contains_key(dep) {
                return Err(TaskDagError::Config(format!(
                    "task '{name}' has unknown dependency '{dep}' in `after`"
                )));
            }
            if dep == name {
                return Err(TaskDagError::Config(format!(
                    "task '{name}' cannot depend on itself in `after`"
                )));
            }
        }
    }

    Ok(())
}
