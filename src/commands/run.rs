//! Implementation of the `execgate run` command.

use crate::cli::RunArgs;
use execgate::config::GateConfig;
use execgate::error::{GateError, Result};
use execgate::exit_codes;
use execgate::gate::ExecGate;
use execgate::result::{ExecutionResult, Outcome};

/// Execute the `execgate run` command.
///
/// Per-invocation `--allow` and `--block` entries are layered on top of the
/// loaded policy before the command is evaluated.
pub fn cmd_run(config: GateConfig, args: RunArgs) -> Result<i32> {
    let mut gate = ExecGate::new(config);
    for name in args.allow {
        gate.add_allowed_command(name);
    }
    for pattern in args.block {
        gate.add_blocked_pattern(pattern);
    }

    let result = gate.execute(&args.command, args.timeout, args.cwd.as_deref());

    if args.json {
        let json = result.to_json().map_err(|e| {
            GateError::IoError(format!("failed to serialize result: {}", e))
        })?;
        println!("{}", json);
    } else {
        println!("{}", result.render());
    }

    Ok(exit_code_for(&result))
}

/// Map a gate result to the process exit code.
pub(super) fn exit_code_for(result: &ExecutionResult) -> i32 {
    match result.outcome {
        Outcome::Rejected => exit_codes::POLICY_REJECTED,
        Outcome::Completed if result.success => exit_codes::SUCCESS,
        _ => exit_codes::EXECUTION_FAILURE,
    }
}
