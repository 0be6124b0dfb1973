//! Structured result of a gated execution.
//!
//! Every path through the gate (rejection, timeout, launch failure, normal
//! exit) produces the same shape, so callers can branch on `success` and
//! `exit_code` alone.

use crate::exec::CapturedStream;
use crate::policy::PolicyRejection;
use serde::{Deserialize, Serialize};

/// Exit code reported when no process exit status exists.
pub const NO_EXIT_CODE: i32 = -1;

/// How an execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The process ran to completion (any exit code).
    Completed,
    /// A policy check refused the command; nothing was spawned.
    Rejected,
    /// The process exceeded its timeout and was killed.
    TimedOut,
    /// The process could not be launched or supervised.
    Faulted,
}

/// Result of `ExecGate::execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    /// Process exit code, `128 + signal` for a signal death on Unix, or
    /// [`NO_EXIT_CODE`] when no process exit status exists.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
    pub outcome: Outcome,
}

impl ExecutionResult {
    pub fn rejected(reason: &PolicyRejection) -> Self {
        Self {
            success: false,
            exit_code: NO_EXIT_CODE,
            stdout: String::new(),
            stderr: reason.to_string(),
            duration_ms: 0,
            outcome: Outcome::Rejected,
        }
    }

    /// Timeout results report the full timeout window as their duration.
    pub fn timed_out(timeout_secs: u64) -> Self {
        Self {
            success: false,
            exit_code: NO_EXIT_CODE,
            stdout: String::new(),
            stderr: format!("Command timed out after {}s", timeout_secs),
            duration_ms: timeout_secs.saturating_mul(1000),
            outcome: Outcome::TimedOut,
        }
    }

    pub fn faulted(error: &str, duration_ms: u64) -> Self {
        Self {
            success: false,
            exit_code: NO_EXIT_CODE,
            stdout: String::new(),
            stderr: format!("Execution error: {}", error),
            duration_ms,
            outcome: Outcome::Faulted,
        }
    }

    /// Build a result from captured streams, truncating each to `limit`
    /// bytes. Truncation notices always go to stderr.
    pub fn completed(
        exit_code: i32,
        stdout: &CapturedStream,
        stderr: &CapturedStream,
        limit: usize,
        duration_ms: u64,
    ) -> Self {
        let mut err_text = stderr.to_text(limit);

        if stdout.total_len > limit {
            err_text.push_str(&format!(
                "\n[Output truncated - {} bytes total]",
                stdout.total_len
            ));
        }
        if stderr.total_len > limit {
            err_text.push_str(&format!(
                "\n[Stderr truncated - {} bytes total]",
                stderr.total_len
            ));
        }

        Self {
            success: exit_code == 0,
            exit_code,
            stdout: stdout.to_text(limit),
            stderr: err_text,
            duration_ms,
            outcome: Outcome::Completed,
        }
    }

    /// Render the result as the plain-text block handed back to an agent.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("Exit code: {}", self.exit_code)];
        if !self.stdout.is_empty() {
            lines.push(format!("STDOUT:\n{}", self.stdout));
        }
        if !self.stderr.is_empty() {
            lines.push(format!("STDERR:\n{}", self.stderr));
        }
        lines.push(format!("Duration: {}ms", self.duration_ms));
        lines.join("\n")
    }

    /// Serialize as a single-line JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
