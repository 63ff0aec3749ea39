// src/config/mod.rs

//! Configuration loading and validation for taskdag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like known `after` references (`validate.rs`).
//!
//! Cycle detection is deliberately *not* a config concern: a cyclic `after`
//! relation parses and validates fine here, and fails later when the
//! snapshot is built.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, QueueMode, QueueSection, TaskConfig};
pub use validate::validate_config;
