//! Exit code constants for the execgate CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or invalid config)
//! - 2: Policy rejection (command never ran)
//! - 3: Execution failure (non-zero exit, timeout, launch failure)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, missing directory.
pub const USER_ERROR: i32 = 1;

/// The gate refused to run the command.
pub const POLICY_REJECTED: i32 = 2;

/// The command ran (or tried to) and did not succeed.
pub const EXECUTION_FAILURE: i32 = 3;
