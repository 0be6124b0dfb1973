//! The command execution gate.
//!
//! [`ExecGate`] owns a [`Policy`] and a [`CommandRunner`]. `execute` never
//! fails: policy rejections, timeouts and launch errors all come back as an
//! [`ExecutionResult`], which lets automated callers (agent loops) inspect the
//! outcome without special error handling.
//!
//! ```no_run
//! use execgate::config::GateConfig;
//! use execgate::gate::ExecGate;
//!
//! let mut gate = ExecGate::new(GateConfig::default());
//! gate.add_allowed_command("deno");
//!
//! let result = gate.execute("cargo test --quiet", 120, None);
//! println!("{}", result.render());
//! ```

use crate::config::GateConfig;
use crate::exec::{CommandRunner, RunOutcome, ShellRunner};
use crate::policy::{Policy, PolicyRejection, parse_command, paths::resolve_lenient};
use crate::result::ExecutionResult;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Timeout used when a caller does not pick one, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// A single command to run through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub command: String,
    /// Requested timeout in seconds, clamped to the policy maximum.
    pub timeout: u64,
    /// Working directory; the process's current directory when unset.
    pub cwd: Option<PathBuf>,
}

impl ExecutionRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            cwd: None,
        }
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Policy-checked, bounded command executor.
#[derive(Debug, Clone)]
pub struct ExecGate<R = ShellRunner> {
    policy: Policy,
    runner: R,
}

impl Default for ExecGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

impl ExecGate {
    pub fn new(config: GateConfig) -> Self {
        Self::with_runner(config, ShellRunner)
    }
}

impl<R: CommandRunner> ExecGate<R> {
    /// Build a gate with a custom runner.
    pub fn with_runner(config: GateConfig, runner: R) -> Self {
        Self {
            policy: Policy::from(config),
            runner,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Check a command against the policy without running it.
    pub fn check(&self, command: &str, cwd: Option<&Path>) -> Result<(), PolicyRejection> {
        let parsed = parse_command(command);
        self.policy.evaluate(command, &parsed, cwd)
    }

    /// Run `command` if the policy allows it.
    ///
    /// `timeout_secs` is clamped to the policy's `max_timeout`.
    pub fn execute(
        &self,
        command: &str,
        timeout_secs: u64,
        cwd: Option<&Path>,
    ) -> ExecutionResult {
        if let Err(reason) = self.check(command, cwd) {
            tracing::warn!(
                rule = reason.rule(),
                command,
                reason = %reason,
                "command rejected by policy"
            );
            return ExecutionResult::rejected(&reason);
        }

        let timeout = self.policy.clamp_timeout(timeout_secs);
        if timeout < timeout_secs {
            tracing::debug!(requested = timeout_secs, effective = timeout, "timeout clamped");
        }

        let work_dir = match resolve_work_dir(cwd) {
            Ok(dir) => dir,
            Err(e) => {
                tracing::error!(command, error = %e, "failed to resolve working directory");
                return ExecutionResult::faulted(&e.to_string(), 0);
            }
        };

        tracing::debug!(command, cwd = %work_dir.display(), timeout, "executing command");
        let start = Instant::now();

        let outcome = self.runner.run(
            command,
            &work_dir,
            Duration::from_secs(timeout),
            self.policy.max_output_size,
        );

        match outcome {
            RunOutcome::Completed {
                exit_code,
                stdout,
                stderr,
            } => {
                let duration_ms = elapsed_ms(start);
                tracing::info!(command, exit_code, duration_ms, "command finished");
                ExecutionResult::completed(
                    exit_code,
                    &stdout,
                    &stderr,
                    self.policy.max_output_size,
                    duration_ms,
                )
            }
            RunOutcome::TimedOut => {
                tracing::warn!(command, timeout, "command timed out and was killed");
                ExecutionResult::timed_out(timeout)
            }
            RunOutcome::Failed(error) => {
                tracing::error!(command, error = %error, "command failed to run");
                ExecutionResult::faulted(&error, elapsed_ms(start))
            }
        }
    }

    /// Run a prepared request.
    pub fn execute_request(&self, request: &ExecutionRequest) -> ExecutionResult {
        self.execute(&request.command, request.timeout, request.cwd.as_deref())
    }

    /// Add a command to the allow-list. No-op if already present.
    pub fn add_allowed_command(&mut self, name: impl Into<String>) {
        self.policy.add_allowed_command(name);
    }

    /// Remove a command from the allow-list. No-op if absent.
    pub fn remove_allowed_command(&mut self, name: &str) {
        self.policy.remove_allowed_command(name);
    }

    /// Add a pattern to the block-list. No-op if already present.
    pub fn add_blocked_pattern(&mut self, pattern: impl Into<String>) {
        self.policy.add_blocked_pattern(pattern);
    }
}

fn resolve_work_dir(cwd: Option<&Path>) -> std::io::Result<PathBuf> {
    match cwd {
        Some(cwd) => resolve_lenient(cwd),
        None => std::env::current_dir(),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
