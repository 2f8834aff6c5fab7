// src/lib.rs

//! mdb: a command-line client for managing hosted web projects.

pub mod cli;
pub mod constants;
pub mod core;
