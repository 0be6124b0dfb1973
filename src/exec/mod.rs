//! Bounded command execution.
//!
//! This module provides subprocess execution for the gate with:
//!
//! - Shell launch so pipelines and redirection work
//! - Wall-clock timeout with process-group termination
//! - Output capture bounded per stream
//! - Cross-platform support

mod capture;
mod runner;

pub use capture::{CapturedStream, read_bounded};
pub use runner::{CommandRunner, RunOutcome, ShellRunner};
