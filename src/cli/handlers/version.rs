// src/cli/handlers/version.rs

use crate::{constants::CLI_NAME, core::context::CommandContext};
use anyhow::Result;

/// Prints the CLI version.
pub fn handle(_ctx: &mut CommandContext) -> Result<()> {
    println!("{} {}", CLI_NAME, env!("CARGO_PKG_VERSION"));
    Ok(())
}
