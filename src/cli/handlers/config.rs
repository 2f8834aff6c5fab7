// src/cli/handlers/config.rs

use crate::core::{
    config_store::ConfigScope,
    context::CommandContext,
    flags::FlagValue,
};
use anyhow::{Result, anyhow};
use serde_json::Value;

/// The `config` command: reads, writes, and unsets persisted settings.
///
/// - `mdb config <key>` prints the stored value (nothing when unset).
/// - `mdb config <key> <value>` stores and saves the value.
/// - `mdb config <key> --unset` deletes the key and saves.
/// - `--global` targets the user-wide scope instead of the project scope.
pub fn handle(ctx: &mut CommandContext) -> Result<()> {
    ctx.register_non_arg_flags(&["unset", "global"])?;
    ctx.register_flag_expansions(&[("-u", "--unset"), ("-g", "--global")])?;
    let flags = ctx.parsed_flags()?;

    let scope = if flags.get("global").is_some_and(FlagValue::is_true) {
        ConfigScope::Global
    } else {
        ConfigScope::Project
    };

    let key = ctx
        .args()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Usage: mdb config <key> [value] [--unset] [--global]"))?;

    if flags.get("unset").is_some_and(FlagValue::is_true) {
        ctx.config_mut().unset(&key, scope)?;
        ctx.config_mut().save(scope)?;
        return Ok(());
    }

    match ctx.args().get(1).cloned() {
        Some(value) => {
            ctx.config_mut().set(&key, Value::String(value), scope)?;
            ctx.config_mut().save(scope)?;
        }
        None => {
            if let Some(value) = ctx.config().get(&key, scope)? {
                match value {
                    Value::String(text) => println!("{text}"),
                    other => println!("{other}"),
                }
            }
        }
    }

    Ok(())
}

// MARK: --- UNIT TESTS ---
