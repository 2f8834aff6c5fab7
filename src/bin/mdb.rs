// src/bin/mdb.rs

use anyhow::Result;
use colored::*;
use mdb::{
    cli::{classifier, dispatcher},
    core::context::CommandContext,
};
use std::env;

/// The main entry point of the `mdb` application.
/// It sets up logging, classifies the argument vector, dispatches to the
/// registered handler, and performs centralized error handling.
fn main() {
    env_logger::init();

    let argv: Vec<String> = env::args().collect();
    if let Err(e) = run_cli(&argv) {
        // Every failure unwinds here and is reported as one message.
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(argv: &[String]) -> Result<()> {
    let invocation = classifier::classify(argv)?;
    log::debug!("Classified invocation: {:?}", invocation);

    let cwd = env::current_dir()?;
    let mut ctx = CommandContext::new(invocation, &cwd)?;
    dispatcher::dispatch(&mut ctx)
}
