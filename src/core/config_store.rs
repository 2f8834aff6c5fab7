// src/core/config_store.rs

use crate::constants::PROJECT_CONFIG_FILENAME;
use crate::core::paths;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The two independent configuration partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// Keyed to the current working directory (`<cwd>/.mdb`).
    Project,
    /// Keyed to the per-user mdb directory (`~/.config/mdb/.mdb`).
    Global,
}

/// A node in the immutable schema tree describing the dotted paths a scope
/// may persist. Validation inspects only this shape, never stored values.
#[derive(Debug)]
enum SchemaNode {
    Leaf,
    Branch(&'static [(&'static str, SchemaNode)]),
}

/// The settings a project-scope `.mdb` file may carry.
static PROJECT_SCHEMA: SchemaNode = SchemaNode::Branch(&[
    ("projectName", SchemaNode::Leaf),
    ("domain", SchemaNode::Leaf),
    ("publishMethod", SchemaNode::Leaf),
    ("packageManager", SchemaNode::Leaf),
    (
        "meta",
        SchemaNode::Branch(&[("type", SchemaNode::Leaf), ("starter", SchemaNode::Leaf)]),
    ),
    (
        "backend",
        SchemaNode::Branch(&[("platform", SchemaNode::Leaf)]),
    ),
    (
        "wordpress",
        SchemaNode::Branch(&[("email", SchemaNode::Leaf), ("username", SchemaNode::Leaf)]),
    ),
    (
        "compose",
        SchemaNode::Branch(&[("projects", SchemaNode::Leaf)]),
    ),
]);

/// The user-wide defaults the global `.mdb` file may carry.
static GLOBAL_SCHEMA: SchemaNode = SchemaNode::Branch(&[("packageManager", SchemaNode::Leaf)]);

/// Errors from configuration operations. Read failures are not listed:
/// a missing or unreadable scope file is a normal first-run state.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The dotted path is not part of the scope's schema.
    #[error("Invalid config key: '{key}'")]
    InvalidKey { key: String },

    /// A scope file could not be written.
    #[error("Could not write config file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An in-memory tree could not be serialized.
    #[error("Could not serialize config for '{path}': {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Path(#[from] paths::PathError),
}

/// The dual-scope, schema-validated settings store.
///
/// Both scope trees are loaded eagerly at construction and persisted only
/// on explicit [`ConfigStore::save`] calls. Each tree may be a strict
/// subset of its schema; missing leaves simply read as `None`.
#[derive(Debug)]
pub struct ConfigStore {
    project: Map<String, Value>,
    global: Map<String, Value>,
    project_path: PathBuf,
    global_path: PathBuf,
}

impl ConfigStore {
    /// Loads both scopes: the project file from `cwd` and the global file
    /// from the per-user mdb directory.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let project_path = cwd.join(PROJECT_CONFIG_FILENAME);
        let global_path = paths::get_global_config_path()?;
        Ok(Self::with_paths(project_path, global_path))
    }

    /// Builds a store over explicit scope file paths. This is the seam the
    /// tests use; [`ConfigStore::load`] derives the canonical paths.
    pub fn with_paths(project_path: PathBuf, global_path: PathBuf) -> Self {
        let project = read_tree(&project_path);
        let global = read_tree(&global_path);
        Self {
            project,
            global,
            project_path,
            global_path,
        }
    }

    /// Checks a dotted path against the scope's schema, walking one segment
    /// at a time. Fails with the full path when a segment is absent at its
    /// depth.
    pub fn validate_key(&self, path: &str, scope: ConfigScope) -> Result<(), ConfigError> {
        let mut node = schema_for(scope);
        for segment in path.split('.') {
            let child = match node {
                SchemaNode::Branch(children) => children
                    .iter()
                    .find(|(name, _)| *name == segment)
                    .map(|(_, child)| child),
                SchemaNode::Leaf => None,
            };
            node = child.ok_or_else(|| ConfigError::InvalidKey {
                key: path.to_string(),
            })?;
        }
        Ok(())
    }

    /// Reads the value at a dotted path. A missing segment anywhere along
    /// the walk yields `None`, not an error.
    pub fn get(&self, path: &str, scope: ConfigScope) -> Result<Option<&Value>, ConfigError> {
        self.validate_key(path, scope)?;
        let segments: Vec<&str> = path.split('.').collect();
        Ok(get_at(self.tree(scope), &segments))
    }

    /// Writes a value at a dotted path, auto-creating missing intermediate
    /// objects. Values may be strings or structured lists
    /// (e.g. `compose.projects`).
    pub fn set(&mut self, path: &str, value: Value, scope: ConfigScope) -> Result<(), ConfigError> {
        self.validate_key(path, scope)?;
        let segments: Vec<&str> = path.split('.').collect();
        set_at(self.tree_mut(scope), &segments, value);
        Ok(())
    }

    /// Deletes the leaf at a dotted path. A missing intermediate node is a
    /// silent no-op (the key is already unset).
    pub fn unset(&mut self, path: &str, scope: ConfigScope) -> Result<(), ConfigError> {
        self.validate_key(path, scope)?;
        let segments: Vec<&str> = path.split('.').collect();
        unset_at(self.tree_mut(scope), &segments);
        Ok(())
    }

    /// Serializes the scope's tree to its file. Write failures are always
    /// surfaced with the target path; losing a persistence write silently
    /// is not acceptable.
    pub fn save(&self, scope: ConfigScope) -> Result<(), ConfigError> {
        let path = self.path(scope);
        let contents =
            serde_json::to_string_pretty(self.tree(scope)).map_err(|e| ConfigError::Serialize {
                path: path.display().to_string(),
                source: e,
            })?;
        log::debug!("Saving {:?} config to '{}'", scope, path.display());
        fs::write(path, contents).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn tree(&self, scope: ConfigScope) -> &Map<String, Value> {
        match scope {
            ConfigScope::Project => &self.project,
            ConfigScope::Global => &self.global,
        }
    }

    fn tree_mut(&mut self, scope: ConfigScope) -> &mut Map<String, Value> {
        match scope {
            ConfigScope::Project => &mut self.project,
            ConfigScope::Global => &mut self.global,
        }
    }

    fn path(&self, scope: ConfigScope) -> &Path {
        match scope {
            ConfigScope::Project => &self.project_path,
            ConfigScope::Global => &self.global_path,
        }
    }
}

fn schema_for(scope: ConfigScope) -> &'static SchemaNode {
    match scope {
        ConfigScope::Project => &PROJECT_SCHEMA,
        ConfigScope::Global => &GLOBAL_SCHEMA,
    }
}

/// Reads a scope file into a tree. Any read or parse failure defaults to an
/// empty mapping: "no config file yet" is the normal first-run state.
fn read_tree(path: &Path) -> Map<String, Value> {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(tree) => tree,
            Err(e) => {
                log::debug!("Ignoring unparseable config '{}': {}", path.display(), e);
                Map::new()
            }
        },
        Err(e) => {
            log::debug!("No config at '{}': {}", path.display(), e);
            Map::new()
        }
    }
}

/// Walks the tree along `segments`, returning the leaf if every segment is
/// present.
fn get_at<'a>(tree: &'a Map<String, Value>, segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let value = tree.get(*first)?;
    if rest.is_empty() {
        Some(value)
    } else {
        get_at(value.as_object()?, rest)
    }
}

/// Assigns the leaf at `segments`, creating missing intermediates as empty
/// objects. A non-object intermediate is replaced, since the schema already
/// approved the deeper path.
fn set_at(tree: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        tree.insert((*first).to_string(), value);
        return;
    }
    let entry = tree
        .entry((*first).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    match entry.as_object_mut() {
        Some(child) => set_at(child, rest, value),
        None => {
            let mut child = Map::new();
            set_at(&mut child, rest, value);
            *entry = Value::Object(child);
        }
    }
}

/// Removes the leaf at `segments`. Missing intermediates mean the key is
/// already unset, so the walk simply stops.
fn unset_at(tree: &mut Map<String, Value>, segments: &[&str]) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        tree.remove(*first);
        return;
    }
    if let Some(child) = tree.get_mut(*first).and_then(Value::as_object_mut) {
        unset_at(child, rest);
    }
}

// MARK: --- UNIT TESTS ---
