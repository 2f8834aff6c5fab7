// src/cli/mod.rs

pub mod classifier;
pub mod dispatcher;
pub mod handlers;
