//! CLI argument parsing for execgate.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use execgate::gate::DEFAULT_TIMEOUT_SECS;
use std::path::PathBuf;

/// execgate: policy-driven command execution gate for agentic coding pipelines.
///
/// Commands are checked against a policy (blocked patterns, allowed binaries,
/// allowed directories, protected paths) before running through the shell
/// with a bounded timeout and bounded output.
#[derive(Parser, Debug)]
#[command(name = "execgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Policy file (defaults to ./execgate.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for execgate.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command through the gate.
    ///
    /// Prints the rendered result. Exits 0 on success, 2 when the policy
    /// rejects the command, 3 on non-zero exit, timeout or launch failure.
    Run(RunArgs),

    /// Check a command against the policy without running it.
    ///
    /// Prints `allowed` or the rejection reason.
    Check(CheckArgs),

    /// Print the effective policy as YAML.
    Policy,

    /// List files under a directory, honoring .gitignore and .dockerignore.
    Ls(LsArgs),
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Shell command line to run (quote it)
    #[arg(allow_hyphen_values = true)]
    pub command: String,

    /// Timeout in seconds, clamped to the policy maximum
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Working directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Add a binary to the allow-list for this invocation
    #[arg(long = "allow", value_name = "NAME")]
    pub allow: Vec<String>,

    /// Add a blocked pattern for this invocation
    #[arg(long = "block", value_name = "PATTERN")]
    pub block: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Shell command line to check
    #[arg(allow_hyphen_values = true)]
    pub command: String,

    /// Working directory to check against allowed directories
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the `ls` command.
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Directory to list
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
