// src/core/context.rs

use crate::cli::classifier::Invocation;
use crate::core::config_store::{ConfigError, ConfigScope, ConfigStore};
use crate::core::flags::{FlagError, FlagGrammar, ParsedFlags};
use std::path::Path;

/// The per-invocation context handed to command handlers.
///
/// It owns the flag grammar (seeded with the defaults and the invocation's
/// raw flag tokens) and the dual-scope config store, loaded once at
/// construction. Handlers extend the grammar for their own flags before
/// asking for the parsed mapping.
#[derive(Debug)]
pub struct CommandContext {
    entity: String,
    command: String,
    args: Vec<String>,
    raw_flags: Vec<String>,
    grammar: FlagGrammar,
    config: ConfigStore,
}

impl CommandContext {
    /// Builds a context for `invocation`, loading both config scopes
    /// (project scope keyed to `cwd`).
    pub fn new(invocation: Invocation, cwd: &Path) -> Result<Self, ConfigError> {
        let config = ConfigStore::load(cwd)?;
        Ok(Self::from_parts(invocation, config))
    }

    /// Builds a context over an already-constructed store. Tests use this
    /// to point the store at temporary files.
    pub fn from_parts(invocation: Invocation, config: ConfigStore) -> Self {
        Self {
            entity: invocation.entity,
            command: invocation.command,
            args: invocation.args,
            raw_flags: invocation.raw_flags,
            grammar: FlagGrammar::default(),
            config,
        }
    }

    /// The entity this invocation acts on (empty = still unresolved).
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// The requested command.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The positional arguments, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// When the classifier deferred the entity, back-fill it from the
    /// persisted project type (`meta.type`), if one is recorded.
    pub fn infer_entity_from_config(&mut self) {
        if !self.entity.is_empty() {
            return;
        }
        let inferred = match self.config.get("meta.type", ConfigScope::Project) {
            Ok(Some(value)) => value.as_str().map(str::to_string),
            _ => None,
        };
        if let Some(entity) = inferred {
            log::debug!("Inferred entity '{}' from project config", entity);
            self.entity = entity;
        }
    }

    /// Extends the grammar with boolean flags for this command.
    pub fn register_non_arg_flags(&mut self, names: &[&str]) -> Result<(), FlagError> {
        self.grammar.register_non_arg_flags(names)
    }

    /// Extends the grammar with short-form expansions for this command.
    pub fn register_flag_expansions(&mut self, expansions: &[(&str, &str)]) -> Result<(), FlagError> {
        self.grammar.register_flag_expansions(expansions)
    }

    /// Parses the invocation's raw flag tokens under the current grammar.
    /// Produced fresh on every call.
    pub fn parsed_flags(&self) -> Result<ParsedFlags, FlagError> {
        self.grammar.parse(&self.raw_flags)
    }

    /// Read access to the dual-scope config store.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Mutable access to the dual-scope config store.
    pub fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flags::FlagValue;
    use serde_json::json;
    use tempfile::TempDir;

    fn context_in(temp: &TempDir, invocation: Invocation) -> CommandContext {
        let store = ConfigStore::with_paths(
            temp.path().join(".mdb"),
            temp.path().join("global.mdb"),
        );
        CommandContext::from_parts(invocation, store)
    }

    #[test]
    fn test_parsed_flags_respects_registrations() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation {
            raw_flags: vec!["-m".to_string(), "ftp".to_string(), "--test".to_string()],
            ..Invocation::default()
        };
        let mut ctx = context_in(&temp, invocation);
        ctx.register_non_arg_flags(&["test"]).unwrap();
        ctx.register_flag_expansions(&[("-m", "--method")]).unwrap();

        let flags = ctx.parsed_flags().unwrap();
        assert_eq!(flags.get("method").and_then(FlagValue::as_str), Some("ftp"));
        assert!(flags.get("test").is_some_and(FlagValue::is_true));
    }

    #[test]
    fn test_infer_entity_from_project_type() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation {
            command: "publish".to_string(),
            ..Invocation::default()
        };
        let mut ctx = context_in(&temp, invocation);
        ctx.config_mut()
            .set("meta.type", json!("frontend"), ConfigScope::Project)
            .unwrap();

        ctx.infer_entity_from_config();
        assert_eq!(ctx.entity(), "frontend");
    }

    #[test]
    fn test_infer_entity_keeps_explicit_entity() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation {
            entity: "backend".to_string(),
            command: "publish".to_string(),
            ..Invocation::default()
        };
        let mut ctx = context_in(&temp, invocation);
        ctx.config_mut()
            .set("meta.type", json!("frontend"), ConfigScope::Project)
            .unwrap();

        ctx.infer_entity_from_config();
        assert_eq!(ctx.entity(), "backend");
    }

    #[test]
    fn test_infer_entity_noop_without_config() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context_in(
            &temp,
            Invocation {
                command: "publish".to_string(),
                ..Invocation::default()
            },
        );
        ctx.infer_entity_from_config();
        assert_eq!(ctx.entity(), "");
    }
}
