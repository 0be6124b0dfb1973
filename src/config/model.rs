//! GateConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for an execution gate.
///
/// This struct represents the contents of `execgate.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    // =========================================================================
    // Command policy
    // =========================================================================
    /// Substrings that block execution (case-insensitive, whole command line).
    #[serde(default = "default_blocked_patterns")]
    pub blocked_patterns: Vec<String>,

    /// Binary basenames allowed to execute when `require_allowlist` is set.
    #[serde(default = "default_allowed_commands")]
    pub allowed_commands: Vec<String>,

    /// Whether only allow-listed binaries may run.
    #[serde(default = "default_true")]
    pub require_allowlist: bool,

    // =========================================================================
    // Directory policy
    // =========================================================================
    /// Working directories commands may run in. Empty means unrestricted.
    #[serde(default)]
    pub allowed_directories: Vec<PathBuf>,

    /// Roots under which recursive `rm` of absolute paths is permitted.
    #[serde(default = "default_scratch_directories")]
    pub scratch_directories: Vec<PathBuf>,

    // =========================================================================
    // Resource limits
    // =========================================================================
    /// Upper bound on the per-call timeout, in seconds.
    #[serde(default = "default_max_timeout")]
    pub max_timeout: u64,

    /// Maximum bytes kept for each of stdout and stderr.
    #[serde(default = "default_max_output_size")]
    pub max_output_size: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            blocked_patterns: default_blocked_patterns(),
            allowed_commands: default_allowed_commands(),
            require_allowlist: default_true(),
            allowed_directories: Vec::new(),
            scratch_directories: default_scratch_directories(),
            max_timeout: default_max_timeout(),
            max_output_size: default_max_output_size(),
        }
    }
}
