//! Command line splitting.
//!
//! Policy checks need a binary name even for commands the shell itself would
//! reject, so a split failure degrades to whitespace splitting instead of
//! aborting.

use std::path::Path;

/// A command string split into shell words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// First word of the command (empty for an empty command).
    pub binary: String,
    /// All words, including the binary at index 0.
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Basename of the binary (`/usr/bin/ls` -> `ls`).
    pub fn binary_name(&self) -> &str {
        Path::new(&self.binary)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.binary)
    }

    /// Arguments after the binary.
    pub fn operands(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.binary.is_empty()
    }
}

/// Split a raw command into its binary and word list.
pub fn parse_command(command: &str) -> ParsedCommand {
    let words = match shell_words::split(command) {
        Ok(words) => words,
        Err(e) => {
            tracing::debug!(error = %e, "shell-words split failed, falling back to whitespace");
            command.split_whitespace().map(str::to_string).collect()
        }
    };

    match words.first() {
        Some(binary) => ParsedCommand {
            binary: binary.clone(),
            args: words,
        },
        None => ParsedCommand::default(),
    }
}
