// src/core/mod.rs

pub mod config_store;
pub mod context;
pub mod flags;
pub mod paths;
