//! Command implementations for execgate.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Handlers return the process exit code on success so
//! `run` and `check` can report policy rejections distinctly.

mod check;
mod list;
mod policy;
mod run;

use crate::cli::{Cli, Command};
use execgate::config::GateConfig;
use execgate::error::{GateError, Result};
use std::path::{Path, PathBuf};

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Run(args) => run::cmd_run(load_config(cli.config.as_deref())?, args),
        Command::Check(args) => check::cmd_check(load_config(cli.config.as_deref())?, args),
        Command::Policy => {
            let (config, source) = discover_config(cli.config.as_deref())?;
            policy::cmd_policy(&config, source.as_deref())
        }
        Command::Ls(args) => list::cmd_ls(args),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<GateConfig> {
    discover_config(explicit).map(|(config, _)| config)
}

fn discover_config(explicit: Option<&Path>) -> Result<(GateConfig, Option<PathBuf>)> {
    let cwd = std::env::current_dir().map_err(|e| {
        GateError::IoError(format!("failed to determine current directory: {}", e))
    })?;

    let (config, source) = GateConfig::discover(explicit, &cwd)?;
    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "loaded policy file"),
        None => tracing::debug!("no policy file found, using defaults"),
    }
    Ok((config, source))
}
