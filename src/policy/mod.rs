//! Command policy for the execution gate.
//!
//! A [`Policy`] decides whether a command may run. Checks run in a fixed
//! order and the first failure is returned:
//!
//! 1. Blocked patterns: substring match on the whole command line
//! 2. Allow-list: exact match on the binary basename (if enforced)
//! 3. Directory: working directory must sit under an allowed directory
//! 4. Recursive `rm` aimed at a protected path
//!
//! Pattern matching runs against the raw string, not the parsed words, so a
//! blocked tool hidden inside a pipeline or subshell is still caught.

mod checks;
mod parser;
pub mod paths;
mod rejection;

pub use checks::{check_allowed_command, check_blocked_patterns, check_directory, check_rm};
pub use parser::{ParsedCommand, parse_command};
pub use rejection::PolicyRejection;

use crate::config::GateConfig;
use std::path::{Path, PathBuf};

/// Policy lists and limits owned by a gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub blocked_patterns: Vec<String>,
    pub allowed_commands: Vec<String>,
    pub allowed_directories: Vec<PathBuf>,
    pub scratch_directories: Vec<PathBuf>,
    pub require_allowlist: bool,
    /// Seconds.
    pub max_timeout: u64,
    /// Bytes, applied to stdout and stderr separately.
    pub max_output_size: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self::from(GateConfig::default())
    }
}

impl From<GateConfig> for Policy {
    fn from(config: GateConfig) -> Self {
        Self {
            blocked_patterns: config.blocked_patterns,
            allowed_commands: config.allowed_commands,
            allowed_directories: config.allowed_directories,
            scratch_directories: config.scratch_directories,
            require_allowlist: config.require_allowlist,
            max_timeout: config.max_timeout,
            max_output_size: config.max_output_size,
        }
    }
}

impl From<&Policy> for GateConfig {
    fn from(policy: &Policy) -> Self {
        Self {
            blocked_patterns: policy.blocked_patterns.clone(),
            allowed_commands: policy.allowed_commands.clone(),
            allowed_directories: policy.allowed_directories.clone(),
            scratch_directories: policy.scratch_directories.clone(),
            require_allowlist: policy.require_allowlist,
            max_timeout: policy.max_timeout,
            max_output_size: policy.max_output_size,
        }
    }
}

impl Policy {
    /// Run every check against a command. The first failure wins.
    pub fn evaluate(
        &self,
        command: &str,
        parsed: &ParsedCommand,
        cwd: Option<&Path>,
    ) -> Result<(), PolicyRejection> {
        if parsed.is_empty() {
            return Err(PolicyRejection::EmptyCommand);
        }

        check_blocked_patterns(self, command)?;
        check_allowed_command(self, parsed)?;
        check_directory(self, cwd)?;
        check_rm(self, parsed)?;

        Ok(())
    }

    /// Clamp a requested timeout (seconds) to `max_timeout`.
    pub fn clamp_timeout(&self, requested: u64) -> u64 {
        requested.min(self.max_timeout)
    }

    /// Add a command to the allow-list. No-op if already present.
    pub fn add_allowed_command(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.allowed_commands.contains(&name) {
            self.allowed_commands.push(name);
        }
    }

    /// Remove a command from the allow-list. No-op if absent.
    pub fn remove_allowed_command(&mut self, name: &str) {
        self.allowed_commands.retain(|allowed| allowed != name);
    }

    /// Add a pattern to the block-list. No-op if already present.
    pub fn add_blocked_pattern(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if !self.blocked_patterns.contains(&pattern) {
            self.blocked_patterns.push(pattern);
        }
    }
}
