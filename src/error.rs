//! Error types for execgate.
//!
//! The gate itself never returns these: policy rejections, timeouts and launch
//! failures are encoded in [`crate::result::ExecutionResult`]. `GateError`
//! covers the surrounding surface (config loading, directory listing, CLI).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for execgate operations outside of `execute`.
#[derive(Error, Debug)]
pub enum GateError {
    /// User provided invalid arguments or input.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be read, parsed, or validated.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl GateError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GateError::UserError(_) => exit_codes::USER_ERROR,
            GateError::ConfigError(_) => exit_codes::USER_ERROR,
            GateError::IoError(_) => exit_codes::EXECUTION_FAILURE,
        }
    }
}

/// Result type alias for execgate operations.
pub type Result<T> = std::result::Result<T, GateError>;
