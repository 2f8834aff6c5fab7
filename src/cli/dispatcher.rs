// src/cli/dispatcher.rs

use crate::{cli::handlers, core::context::CommandContext};
use anyhow::Result;
use thiserror::Error;

/// Raised when no handler is registered for the requested command.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// The (entity, command) pair matched no registry entry.
    #[error("Invalid command: {0}")]
    CommandNotFound(String),
}

/// Defines a command, the entity it is registered under, and its handler.
pub struct CommandDefinition {
    /// The entity this registration belongs to.
    pub entity: &'static str,
    /// The command name users type.
    pub name: &'static str,
    /// The handler invoked with the per-invocation context.
    pub handler: fn(&mut CommandContext) -> Result<()>,
}

/// The single source of truth for built-in command handlers. Handlers for
/// the remote-platform commands (publish, database provisioning, auth, …)
/// register here as they land.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        entity: "app",
        name: "help",
        handler: handlers::help::handle,
    },
    CommandDefinition {
        entity: "app",
        name: "version",
        handler: handlers::version::handle,
    },
    CommandDefinition {
        entity: "config",
        name: "config",
        handler: handlers::config::handle,
    },
];

/// Finds the registered definition for an (entity, command) pair. An empty
/// entity matches any registration of the command name.
fn find_command(entity: &str, name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|def| def.name == name && (entity.is_empty() || def.entity == entity))
}

/// Routes a classified invocation to its handler. An unknown command is a
/// plain lookup miss.
pub fn dispatch(ctx: &mut CommandContext) -> Result<()> {
    ctx.infer_entity_from_config();
    log::debug!(
        "Dispatching entity='{}' command='{}'",
        ctx.entity(),
        ctx.command()
    );

    match find_command(ctx.entity(), ctx.command()) {
        Some(definition) => (definition.handler)(ctx),
        None => Err(DispatchError::CommandNotFound(ctx.command().to_string()).into()),
    }
}

// MARK: --- UNIT TESTS ---
