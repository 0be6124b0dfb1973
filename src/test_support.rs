use crate::config::GateConfig;
use crate::exec::{CapturedStream, CommandRunner, RunOutcome};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use std::time::Duration;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Default limits with the allow-list switched off and no blocked patterns.
pub(crate) fn permissive_config() -> GateConfig {
    GateConfig {
        blocked_patterns: Vec::new(),
        require_allowlist: false,
        ..Default::default()
    }
}

/// One call observed by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunCall {
    pub command: String,
    pub cwd: PathBuf,
    pub timeout: Duration,
    pub max_output: usize,
}

/// Runner that records every call and replays a fixed outcome.
pub(crate) struct RecordingRunner {
    outcome: RunOutcome,
    calls: Mutex<Vec<RunCall>>,
}

impl RecordingRunner {
    pub(crate) fn with_outcome(outcome: RunOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn succeeding(stdout: &str) -> Self {
        Self::with_outcome(RunOutcome::Completed {
            exit_code: 0,
            stdout: CapturedStream::from_bytes(stdout),
            stderr: CapturedStream::default(),
        })
    }

    pub(crate) fn timing_out() -> Self {
        Self::with_outcome(RunOutcome::TimedOut)
    }

    pub(crate) fn failing(error: &str) -> Self {
        Self::with_outcome(RunOutcome::Failed(error.to_string()))
    }

    pub(crate) fn calls(&self) -> Vec<RunCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, cwd: &Path, timeout: Duration, max_output: usize) -> RunOutcome {
        self.calls
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(RunCall {
                command: command.to_string(),
                cwd: cwd.to_path_buf(),
                timeout,
                max_output,
            });
        self.outcome.clone()
    }
}
