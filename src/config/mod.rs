//! Configuration model for execgate.
//!
//! This module defines the GateConfig struct that represents `execgate.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::GateConfig;
pub use operations::DEFAULT_CONFIG_FILE;
pub use types::{DEFAULT_ALLOWED_COMMANDS, DEFAULT_BLOCKED_PATTERNS, DEFAULT_SCRATCH_DIRECTORIES};
