//! Implementation of the `execgate ls` command.

use crate::cli::LsArgs;
use execgate::error::Result;
use execgate::exit_codes;
use execgate::listing::{list_files, render_listing};

/// Execute the `execgate ls` command.
pub fn cmd_ls(args: LsArgs) -> Result<i32> {
    let files = list_files(&args.dir)?;
    println!("{}", render_listing(&files));
    Ok(exit_codes::SUCCESS)
}
