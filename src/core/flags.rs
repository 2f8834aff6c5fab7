// src/core/flags.rs

use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors produced while registering or parsing command-line flags.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlagError {
    /// A token could not be resolved against the registered grammar.
    #[error("Unknown flag: {0}")]
    Unknown(String),
    /// A registration call was made with nothing to register.
    #[error("At least one entry must be provided when extending the flag grammar.")]
    EmptyRegistration,
}

/// The value recorded for a single parsed flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// A non-arg (boolean) flag; its presence on the command line means `true`.
    Bool(bool),
    /// A value-taking flag. `None` only occurs when the input ended before
    /// the value token, a malformed case callers must not rely on.
    Value(Option<String>),
}

impl FlagValue {
    /// Returns `true` for a boolean flag that was set.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Returns the string value of a value-taking flag, if one was recorded.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(value) => value.as_deref(),
            Self::Bool(_) => None,
        }
    }
}

/// The parsed flag mapping: bare flag names (no leading dashes) to values.
pub type ParsedFlags = HashMap<String, FlagValue>;

/// The per-invocation flag grammar: which flags take no value, and how
/// short spellings expand to their canonical long forms.
///
/// Every invocation starts from the same seeded grammar; command handlers
/// extend it with their own flags before calling [`FlagGrammar::parse`].
#[derive(Debug, Clone)]
pub struct FlagGrammar {
    non_arg: HashSet<String>,
    expansions: HashMap<String, String>,
}

impl Default for FlagGrammar {
    fn default() -> Self {
        let non_arg = ["all", "force", "help"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let expansions = [("-h", "--help"), ("-a", "--all"), ("-f", "--force")]
            .into_iter()
            .map(|(short, long)| (short.to_string(), long.to_string()))
            .collect();
        Self { non_arg, expansions }
    }
}

impl FlagGrammar {
    /// Registers flags that take no value (presence means `true`).
    /// Names are registered bare, without leading dashes.
    pub fn register_non_arg_flags(&mut self, names: &[&str]) -> Result<(), FlagError> {
        if names.is_empty() {
            return Err(FlagError::EmptyRegistration);
        }
        self.non_arg.extend(names.iter().map(|n| (*n).to_string()));
        Ok(())
    }

    /// Registers short-form to long-form expansions (e.g. `-m` -> `--method`).
    pub fn register_flag_expansions(&mut self, expansions: &[(&str, &str)]) -> Result<(), FlagError> {
        if expansions.is_empty() {
            return Err(FlagError::EmptyRegistration);
        }
        self.expansions.extend(
            expansions
                .iter()
                .map(|(short, long)| ((*short).to_string(), (*long).to_string())),
        );
        Ok(())
    }

    /// Parses raw flag tokens into a [`ParsedFlags`] mapping.
    ///
    /// Tokens are consumed strictly left to right, one per iteration plus one
    /// extra token for a value-taking flag. Either the complete mapping is
    /// returned, or the call fails with a single [`FlagError::Unknown`] and
    /// no partial result.
    pub fn parse(&self, raw_flags: &[String]) -> Result<ParsedFlags, FlagError> {
        let mut parsed = ParsedFlags::new();
        let mut queue = raw_flags.iter();

        while let Some(token) = queue.next() {
            // The lone `.` survives as a cwd shorthand from older releases;
            // it is consumed without producing an entry.
            if token == "." {
                continue;
            }
            if !token.starts_with('-') {
                return Err(FlagError::Unknown(token.clone()));
            }

            // Replace a registered short form with its canonical long form.
            let expanded = self
                .expansions
                .get(token.as_str())
                .map_or(token.as_str(), String::as_str);

            // After expansion the token must be in long form; unregistered
            // short options are never accepted.
            let Some(name) = expanded.strip_prefix("--") else {
                return Err(FlagError::Unknown(token.clone()));
            };

            if self.non_arg.contains(name) {
                parsed.insert(name.to_string(), FlagValue::Bool(true));
            } else {
                parsed.insert(name.to_string(), FlagValue::Value(queue.next().cloned()));
            }
        }

        Ok(parsed)
    }
}

// MARK: --- UNIT TESTS ---
