// src/cli/classifier.rs

use thiserror::Error;

/// The fixed vocabulary of entities a command can act on.
pub static ENTITIES: &[&str] = &[
    "app",
    "backend",
    "blank",
    "compose",
    "database",
    "frontend",
    "order",
    "repo",
    "starter",
    "user",
    "wordpress",
];

/// Commands that may appear without a preceding entity.
pub static COMMANDS: &[&str] = &[
    "help", "update", "version", "register", "login", "logout", "ls", "init", "get", "rename",
    "publish", "delete", "whoami", "logs", "kill", "info", "restart", "run", "config", "status",
];

/// The default entity for each non-entity command. The empty string means
/// "resolve later", from persisted configuration.
static DEFAULT_ENTITIES: &[(&str, &str)] = &[
    ("config", "config"),
    ("logs", "backend"),
    ("kill", "backend"),
    ("compose", "app"),
    ("help", "app"),
    ("update", "app"),
    ("version", "app"),
    ("whoami", "user"),
    ("register", "user"),
    ("login", "user"),
    ("logout", "user"),
    ("status", "user"),
    ("delete", ""),
    ("get", ""),
    ("info", ""),
    ("init", ""),
    ("ls", ""),
    ("publish", ""),
    ("rename", ""),
    ("restart", ""),
    ("run", ""),
];

/// Shorthand spellings that resolve directly to an (entity, command) pair.
static ALIASES: &[(&str, (&str, &str))] =
    &[("starters", ("starter", "ls")), ("orders", ("order", "ls"))];

/// Leading flags that stand in for a whole command.
static FLAG_COMMANDS: &[(&str, &str)] = &[
    ("-v", "version"),
    ("--version", "version"),
    ("-h", "help"),
    ("--help", "help"),
];

/// Errors produced while classifying the raw argument vector.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    /// The leading token matched no entity, command, alias, or flag-command.
    #[error("Invalid command: mdb {0}")]
    InvalidCommand(String),

    /// A flag-looking token joined its value with `=`.
    #[error("Please use space instead of `=` on flags")]
    EqualsInFlag,

    /// A recognized command has no entry in the default-entity table. This
    /// is an internal inconsistency, not a user error.
    #[error("No default entity registered for command '{0}'.")]
    MissingDefaultEntity(String),
}

/// A structured command-line invocation: the noun being acted on, the verb,
/// its positional arguments, and the still-unparsed flag tokens.
///
/// Built once per process run. `entity` may later be reassigned by the
/// per-invocation context when inferred from persisted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    /// One of the fixed entity vocabulary, or empty = unspecified.
    pub entity: String,
    /// The requested action, or empty = unspecified.
    pub command: String,
    /// Positional arguments, in order.
    pub args: Vec<String>,
    /// Unparsed flag tokens, in order.
    pub raw_flags: Vec<String>,
}

/// A non-destructive cursor over an immutable token slice.
struct TokenCursor<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    fn new(tokens: &'a [String]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    /// Clones out everything not yet consumed.
    fn rest(&self) -> Vec<String> {
        self.tokens.get(self.pos..).unwrap_or_default().to_vec()
    }
}

/// Classifies the raw process argument vector into an [`Invocation`].
///
/// The first two conventional entries (runtime and script path) are
/// discarded, then the ordered rules below run on the first remaining
/// token: entity match, non-entity command match, alias match, flag-only
/// command match, the empty invocation, and finally the invalid-command
/// error carrying every remaining token.
pub fn classify(argv: &[String]) -> Result<Invocation, ClassifyError> {
    let tokens = argv.get(2..).unwrap_or_default();
    log::debug!("Classifying tokens: {:?}", tokens);
    let mut cursor = TokenCursor::new(tokens);

    let Some(first) = cursor.next() else {
        // Bare `mdb` is a request for help.
        return Ok(Invocation {
            entity: default_entity("help")?.to_string(),
            command: "help".to_string(),
            ..Invocation::default()
        });
    };

    if ENTITIES.contains(&first) {
        // The command token is consumed unconditionally; it may be absent.
        let command = cursor.next().unwrap_or_default().to_string();
        let args = collect_until_flag(&mut cursor)?;
        return Ok(Invocation {
            entity: first.to_string(),
            command,
            args,
            raw_flags: cursor.rest(),
        });
    }

    if COMMANDS.contains(&first) {
        let entity = default_entity(first)?.to_string();
        let args = collect_until_flag(&mut cursor)?;
        return Ok(Invocation {
            entity,
            command: first.to_string(),
            args,
            raw_flags: cursor.rest(),
        });
    }

    if let Some((entity, command)) = alias_target(first) {
        let args = collect_until_flag(&mut cursor)?;
        return Ok(Invocation {
            entity: entity.to_string(),
            command: command.to_string(),
            args,
            raw_flags: cursor.rest(),
        });
    }

    if looks_like_flag(first)? {
        if let Some(command) = flag_command(first) {
            // The triggering token is already consumed and is never
            // re-inserted into the flag list. No positional args here.
            return Ok(Invocation {
                entity: default_entity(command)?.to_string(),
                command: command.to_string(),
                args: Vec::new(),
                raw_flags: cursor.rest(),
            });
        }
    }

    Err(ClassifyError::InvalidCommand(tokens.join(" ")))
}

/// Pops tokens into positional args until the queue is empty or the front
/// token looks like a flag.
fn collect_until_flag(cursor: &mut TokenCursor<'_>) -> Result<Vec<String>, ClassifyError> {
    let mut args = Vec::new();
    while let Some(token) = cursor.peek() {
        if looks_like_flag(token)? {
            break;
        }
        args.push(token.to_string());
        cursor.next();
    }
    Ok(args)
}

/// A token is flag-looking when it starts with `-`. The probe itself fails
/// on an `=`-joined value; that check fires even when only testing whether
/// a token is a flag.
fn looks_like_flag(token: &str) -> Result<bool, ClassifyError> {
    if !token.starts_with('-') {
        return Ok(false);
    }
    if token.contains('=') {
        return Err(ClassifyError::EqualsInFlag);
    }
    Ok(true)
}

fn default_entity(command: &str) -> Result<&'static str, ClassifyError> {
    DEFAULT_ENTITIES
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, entity)| *entity)
        .ok_or_else(|| ClassifyError::MissingDefaultEntity(command.to_string()))
}

fn alias_target(token: &str) -> Option<(&'static str, &'static str)> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, target)| *target)
}

fn flag_command(token: &str) -> Option<&'static str> {
    FLAG_COMMANDS
        .iter()
        .find(|(flag, _)| *flag == token)
        .map(|(_, command)| *command)
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        let mut full = vec![String::new(), "mdb".to_string()];
        full.extend(tokens.iter().map(|s| s.to_string()));
        full
    }

    // --- Rule 1: Entity Match ---

    #[test]
    fn test_entity_with_command_args_and_flags() {
        let invocation =
            classify(&argv(&["backend", "delete", "my-api", "--force", "extra"])).unwrap();
        assert_eq!(invocation.entity, "backend");
        assert_eq!(invocation.command, "delete");
        assert_eq!(invocation.args, vec!["my-api"]);
        assert_eq!(invocation.raw_flags, vec!["--force", "extra"]);
    }

    #[test]
    fn test_entity_without_command() {
        let invocation = classify(&argv(&["wordpress"])).unwrap();
        assert_eq!(invocation.entity, "wordpress");
        assert_eq!(invocation.command, "");
        assert!(invocation.args.is_empty());
        assert!(invocation.raw_flags.is_empty());
    }

    #[test]
    fn test_entity_branch_consumes_command_unconditionally() {
        // Even a flag-looking second token becomes the command.
        let invocation = classify(&argv(&["frontend", "--help"])).unwrap();
        assert_eq!(invocation.entity, "frontend");
        assert_eq!(invocation.command, "--help");
    }

    // --- Rule 2: Non-Entity Command Match ---

    #[test]
    fn test_help_resolves_app_entity() {
        let invocation = classify(&argv(&["help"])).unwrap();
        assert_eq!(invocation.entity, "app");
        assert_eq!(invocation.command, "help");
        assert!(invocation.args.is_empty());
        assert!(invocation.raw_flags.is_empty());
    }

    #[test]
    fn test_config_command_with_arg_and_flag() {
        let invocation = classify(&argv(&["config", "domain", "--unset"])).unwrap();
        assert_eq!(invocation.entity, "config");
        assert_eq!(invocation.command, "config");
        assert_eq!(invocation.args, vec!["domain"]);
        assert_eq!(invocation.raw_flags, vec!["--unset"]);
    }

    #[test]
    fn test_command_with_deferred_entity() {
        let invocation = classify(&argv(&["publish"])).unwrap();
        assert_eq!(invocation.entity, "");
        assert_eq!(invocation.command, "publish");
    }

    #[test]
    fn test_logs_defaults_to_backend() {
        let invocation = classify(&argv(&["logs"])).unwrap();
        assert_eq!(invocation.entity, "backend");
    }

    // --- Rule 3: Alias Match ---

    #[test]
    fn test_starters_alias() {
        let invocation = classify(&argv(&["starters"])).unwrap();
        assert_eq!(invocation.entity, "starter");
        assert_eq!(invocation.command, "ls");
        assert!(invocation.args.is_empty());
        assert!(invocation.raw_flags.is_empty());
    }

    #[test]
    fn test_orders_alias_keeps_flags() {
        let invocation = classify(&argv(&["orders", "--all"])).unwrap();
        assert_eq!(invocation.entity, "order");
        assert_eq!(invocation.command, "ls");
        assert_eq!(invocation.raw_flags, vec!["--all"]);
    }

    // --- Rule 4: Flag-Only Command Match ---

    #[test]
    fn test_version_flag_resolves_command() {
        let invocation = classify(&argv(&["-v"])).unwrap();
        assert_eq!(invocation.entity, "app");
        assert_eq!(invocation.command, "version");
        assert!(invocation.args.is_empty());
        // The triggering token is not re-inserted.
        assert!(invocation.raw_flags.is_empty());
    }

    #[test]
    fn test_help_flag_keeps_remaining_tokens() {
        let invocation = classify(&argv(&["--help", "anything", "--force"])).unwrap();
        assert_eq!(invocation.command, "help");
        assert!(invocation.args.is_empty());
        assert_eq!(invocation.raw_flags, vec!["anything", "--force"]);
    }

    // --- Rule 5: Empty Invocation ---

    #[test]
    fn test_bare_invocation_defaults_to_help() {
        let invocation = classify(&argv(&[])).unwrap();
        assert_eq!(invocation.command, "help");
        assert_eq!(invocation.entity, "app");
    }

    #[test]
    fn test_argv_shorter_than_two_entries() {
        let invocation = classify(&[]).unwrap();
        assert_eq!(invocation.command, "help");
    }

    // --- Rule 6 & Flag-Probe Failures ---

    #[test]
    fn test_unrecognized_token_reports_full_remainder() {
        let err = classify(&argv(&["bogus", "thing", "--force"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid command: mdb bogus thing --force"
        );
    }

    #[test]
    fn test_equals_in_leading_flag_fails() {
        let err = classify(&argv(&["--name=value"])).unwrap_err();
        assert_eq!(err, ClassifyError::EqualsInFlag);
    }

    #[test]
    fn test_equals_fails_while_probing_args() {
        let err = classify(&argv(&["backend", "ls", "--port=3000"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please use space instead of `=` on flags"
        );
    }

    // --- Determinism ---

    #[test]
    fn test_classification_is_deterministic() {
        let input = argv(&["database", "info", "my-db", "--all"]);
        assert_eq!(classify(&input).unwrap(), classify(&input).unwrap());
    }

    // --- Table Sanity ---

    #[test]
    fn test_every_command_has_a_default_entity() {
        for &command in COMMANDS {
            assert!(
                default_entity(command).is_ok(),
                "missing default entity for '{command}'"
            );
        }
    }

    #[test]
    fn test_every_entity_takes_the_entity_branch() {
        for &entity in ENTITIES {
            let invocation = classify(&argv(&[entity, "ls"])).unwrap();
            assert_eq!(invocation.entity, entity);
            assert_eq!(invocation.command, "ls");
        }
    }
}
