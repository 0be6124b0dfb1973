//! Implementation of the `execgate check` command.

use crate::cli::CheckArgs;
use execgate::config::GateConfig;
use execgate::error::Result;
use execgate::exit_codes;
use execgate::gate::ExecGate;

/// Execute the `execgate check` command.
pub fn cmd_check(config: GateConfig, args: CheckArgs) -> Result<i32> {
    let (message, code) = check_message(config, &args);
    println!("{}", message);
    Ok(code)
}

/// Evaluate without running. Returns the line to print and the exit code.
fn check_message(config: GateConfig, args: &CheckArgs) -> (String, i32) {
    let gate = ExecGate::new(config);
    match gate.check(&args.command, args.cwd.as_deref()) {
        Ok(()) => ("allowed".to_string(), exit_codes::SUCCESS),
        Err(reason) => (reason.to_string(), exit_codes::POLICY_REJECTED),
    }
}
