//! execgate: policy-driven command execution gate for agentic coding pipelines.
//!
//! Agents hand the gate raw shell command strings. The gate checks each one
//! against a [`policy::Policy`] (blocked patterns, an allow-list of binaries,
//! directory restrictions and a guard against recursive `rm` on protected
//! paths), then runs it through the shell with a clamped timeout and bounded
//! output capture. Every outcome, including rejection, comes back as an
//! [`ExecutionResult`].
//!
//! The [`listing`] module provides the companion directory listing tool.

pub mod config;
pub mod error;
pub mod exec;
pub mod exit_codes;
pub mod gate;
pub mod listing;
pub mod logging;
pub mod policy;
pub mod result;

#[cfg(test)]
mod test_support;

pub use config::GateConfig;
pub use error::{GateError, Result};
pub use gate::{DEFAULT_TIMEOUT_SECS, ExecGate, ExecutionRequest};
pub use policy::{Policy, PolicyRejection};
pub use result::{ExecutionResult, Outcome};
