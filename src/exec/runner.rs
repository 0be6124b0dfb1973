//! Shell subprocess runner.
//!
//! Runs a command line through the platform shell with a wall-clock timeout
//! and bounded output capture. On timeout the child's whole process group is
//! killed and reaped before returning.

use super::capture::{CapturedStream, read_bounded};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// What happened when a command was launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The process exited (normally or by signal) within the timeout.
    Completed {
        exit_code: i32,
        stdout: CapturedStream,
        stderr: CapturedStream,
    },
    /// The process was still running when the timeout expired and was killed.
    TimedOut,
    /// The process could not be launched or supervised.
    Failed(String),
}

/// Launches commands for the gate.
///
/// The gate only calls a runner after every policy check has passed.
pub trait CommandRunner {
    fn run(&self, command: &str, cwd: &Path, timeout: Duration, max_output: usize) -> RunOutcome;
}

/// Runs commands through `sh -c` (or `cmd /C` on Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

/// How long to wait for reader threads after a kill before giving up on them.
const READER_GRACE: Duration = Duration::from_millis(500);

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path, timeout: Duration, max_output: usize) -> RunOutcome {
        // `None` when the timeout is too large to represent: wait without limit.
        let deadline = Instant::now().checked_add(timeout);

        let mut child = match shell_command(command, cwd).spawn() {
            Ok(child) => child,
            Err(e) => return RunOutcome::Failed(e.to_string()),
        };

        let streams = spawn_readers(&mut child, max_output);

        let waited = match deadline {
            Some(_) => child.wait_timeout(timeout),
            None => child.wait().map(Some),
        };
        let status = match waited {
            Ok(Some(status)) => status,
            Ok(None) => {
                kill_process_tree(&mut child);
                drain_readers(&streams, STREAM_COUNT, READER_GRACE);
                return RunOutcome::TimedOut;
            }
            Err(e) => {
                kill_process_tree(&mut child);
                drain_readers(&streams, STREAM_COUNT, READER_GRACE);
                return RunOutcome::Failed(format!("failed to wait for process: {}", e));
            }
        };

        // The shell may have exited while a background job still holds a pipe
        // open; that wait counts against the same deadline.
        match collect_streams(&streams, STREAM_COUNT, deadline) {
            Ok((stdout, stderr)) => RunOutcome::Completed {
                exit_code: exit_code(status),
                stdout,
                stderr,
            },
            Err(CollectError::Timeout { received }) => {
                kill_process_tree(&mut child);
                drain_readers(&streams, STREAM_COUNT - received, READER_GRACE);
                RunOutcome::TimedOut
            }
            Err(CollectError::Io { received, error }) => {
                kill_process_tree(&mut child);
                drain_readers(&streams, STREAM_COUNT - received, READER_GRACE);
                RunOutcome::Failed(format!("failed to read process output: {}", error))
            }
        }
    }
}

fn shell_command(command: &str, cwd: &Path) -> Command {
    #[cfg(windows)]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    };
    #[cfg(not(windows))]
    let mut cmd = {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    };

    cmd.current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // New process group so a timeout can take down pipelines and
        // background jobs, not just the shell.
        cmd.process_group(0);
    }

    cmd
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamKind {
    Stdout,
    Stderr,
}

type StreamMessage = (StreamKind, std::io::Result<CapturedStream>);

const STREAM_COUNT: usize = 2;

fn spawn_readers(child: &mut Child, limit: usize) -> Receiver<StreamMessage> {
    let (tx, rx) = mpsc::channel();

    if let Some(stdout) = child.stdout.take() {
        let tx = tx.clone();
        thread::spawn(move || {
            let _ = tx.send((StreamKind::Stdout, read_bounded(stdout, limit)));
        });
    }
    if let Some(stderr) = child.stderr.take() {
        thread::spawn(move || {
            let _ = tx.send((StreamKind::Stderr, read_bounded(stderr, limit)));
        });
    }

    rx
}

enum CollectError {
    Timeout { received: usize },
    Io { received: usize, error: std::io::Error },
}

fn collect_streams(
    rx: &Receiver<StreamMessage>,
    expected: usize,
    deadline: Option<Instant>,
) -> Result<(CapturedStream, CapturedStream), CollectError> {
    let mut stdout = CapturedStream::default();
    let mut stderr = CapturedStream::default();

    for received in 0..expected {
        let message = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                rx.recv_timeout(remaining)
            }
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match message {
            Ok((kind, result)) => {
                let captured = result.map_err(|error| CollectError::Io {
                    received: received + 1,
                    error,
                })?;
                match kind {
                    StreamKind::Stdout => stdout = captured,
                    StreamKind::Stderr => stderr = captured,
                }
            }
            Err(RecvTimeoutError::Timeout) => return Err(CollectError::Timeout { received }),
            // Every sender is gone: nothing left to collect.
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok((stdout, stderr))
}

/// Wait up to `grace` for reader threads still holding pipes after a kill.
/// Returns how many finished.
///
/// A process that escaped the group (`setsid`) can keep a pipe open past the
/// kill; its reader is abandoned with a warning.
fn drain_readers(rx: &Receiver<StreamMessage>, outstanding: usize, grace: Duration) -> usize {
    let deadline = Instant::now() + grace;
    let mut finished = 0;

    while finished < outstanding {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(_) => finished += 1,
            Err(RecvTimeoutError::Disconnected) => return outstanding,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    outstanding = outstanding - finished,
                    "output pipe still open after kill, abandoning reader"
                );
                break;
            }
        }
    }

    finished
}

/// Offset added to the signal number for a signal death, as shells report it.
const SIGNAL_EXIT_BASE: i32 = 128;

/// Exit code, or `128 + signal` when killed by a signal.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return SIGNAL_EXIT_BASE + signal;
        }
    }

    -1
}

fn kill_process_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        // The child leads its own group, so its pid is the group id.
        if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: kill(2) with a negative pid only sends a signal to the
            // process group; no memory is shared with the callee.
            unsafe {
                libc::kill(-pgid, libc::SIGKILL);
            }
        }
    }

    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}
