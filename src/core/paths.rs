// src/core/paths.rs

use crate::constants::{GLOBAL_CONFIG_DIRNAME, GLOBAL_CONFIG_FILENAME};
use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref MDB_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Errors locating or creating the per-user mdb directory.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Returns the path to the mdb configuration directory (`~/.config/mdb`).
/// Creates it if it doesn't exist.
///
/// This function is memoized: the first call computes and caches the path,
/// subsequent calls return the cached value instantly.
pub fn get_mdb_config_dir() -> Result<PathBuf, PathError> {
    let mut cached_path_guard = MDB_CONFIG_DIR.lock().unwrap();

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(GLOBAL_CONFIG_DIRNAME);

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached_path_guard = Some(config_path.clone());

    Ok(config_path)
}

/// Returns the path to the global `.mdb` config file inside the mdb
/// configuration directory.
pub fn get_global_config_path() -> Result<PathBuf, PathError> {
    get_mdb_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILENAME))
}
