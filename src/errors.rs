// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

/// Errors surfaced by snapshot building and, for the binary, config handling.
///
/// The first two variants are the only failures the scheduling core can
/// produce, and both are raised exclusively by
/// [`TaskManager::build_snapshot`](crate::manager::TaskManager::build_snapshot);
/// registering tasks and adding dependencies never fail.
#[derive(Debug, Error)]
pub enum TaskDagError {
    /// A task names a dependency that was never registered with the manager.
    #[error("task '{task}' depends on '{dependency}', which was never registered")]
    TaskNotRegistered { task: String, dependency: String },

    /// The dependency relation is not a DAG.
    #[error("dependency cycle detected involving task '{task}'")]
    CyclicDependency { task: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TaskDagError>;
