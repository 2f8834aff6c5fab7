// src/cli/handlers/mod.rs

pub mod config;
pub mod help;
pub mod version;
