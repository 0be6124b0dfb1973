//! Reasons a command is refused before it runs.

use thiserror::Error;

/// A policy check failure.
///
/// The `Display` text is what callers see in the result's stderr.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyRejection {
    #[error("Empty command")]
    EmptyCommand,

    /// The raw command contains a blocked substring.
    #[error("Blocked: command contains forbidden pattern '{pattern}'")]
    BlockedPattern { pattern: String },

    /// The binary basename is not allow-listed.
    #[error("Blocked: '{binary}' is not in allowed commands")]
    NotAllowlisted { binary: String },

    /// The working directory is outside every allowed directory.
    #[error("Blocked: directory '{cwd}' is not in allowed directories")]
    DirectoryNotAllowed { cwd: String },

    /// The working directory could not be resolved.
    #[error("Invalid directory: {reason}")]
    InvalidDirectory { reason: String },

    /// Recursive `rm` aimed at a protected location.
    #[error("Blocked: recursive rm on protected path")]
    UnsafeRemoval,
}

impl PolicyRejection {
    /// Stable machine-readable label, used in log fields.
    pub fn rule(&self) -> &'static str {
        match self {
            PolicyRejection::EmptyCommand => "empty_command",
            PolicyRejection::BlockedPattern { .. } => "blocked_pattern",
            PolicyRejection::NotAllowlisted { .. } => "allowlist",
            PolicyRejection::DirectoryNotAllowed { .. } => "directory",
            PolicyRejection::InvalidDirectory { .. } => "invalid_directory",
            PolicyRejection::UnsafeRemoval => "unsafe_rm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = PolicyRejection::BlockedPattern {
            pattern: "sudo ".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Blocked: command contains forbidden pattern 'sudo '"
        );

        let err = PolicyRejection::NotAllowlisted {
            binary: "nmap".to_string(),
        };
        assert_eq!(err.to_string(), "Blocked: 'nmap' is not in allowed commands");

        let err = PolicyRejection::DirectoryNotAllowed {
            cwd: "/etc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Blocked: directory '/etc' is not in allowed directories"
        );
    }

    #[test]
    fn invalid_directory_is_distinct_from_blocked_directory() {
        let invalid = PolicyRejection::InvalidDirectory {
            reason: "no such file".to_string(),
        };
        assert!(invalid.to_string().starts_with("Invalid directory:"));
        assert_ne!(invalid.rule(), PolicyRejection::DirectoryNotAllowed { cwd: String::new() }.rule());
    }
}
