// src/cli/handlers/help.rs

use crate::{
    cli::classifier::{COMMANDS, ENTITIES},
    constants::CLI_NAME,
    core::context::CommandContext,
};
use anyhow::Result;
use colored::*;

/// Prints the usage summary: the general grammar, the entity vocabulary,
/// and the commands that work without an entity.
pub fn handle(_ctx: &mut CommandContext) -> Result<()> {
    println!("{}", build_help());
    Ok(())
}

fn build_help() -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} — manage your hosted web projects\n\n",
        CLI_NAME.cyan().bold()
    ));
    out.push_str(&format!("{}\n", "USAGE".yellow().bold()));
    out.push_str(&format!(
        "  {} [entity] <command> [args...] [flags...]\n",
        CLI_NAME
    ));
    out.push_str(&format!(
        "  {} -v | --version    {} -h | --help\n\n",
        CLI_NAME, CLI_NAME
    ));

    out.push_str(&format!("{}\n", "ENTITIES".yellow().bold()));
    out.push_str(&format!("  {}\n\n", ENTITIES.join(", ").cyan()));

    out.push_str(&format!("{}\n", "COMMANDS".yellow().bold()));
    out.push_str(&format!("  {}\n\n", COMMANDS.join(", ").cyan()));

    out.push_str(&format!("{}\n", "EXAMPLES".yellow().bold()));
    out.push_str(&format!("  {} starter ls\n", CLI_NAME));
    out.push_str(&format!("  {} backend logs my-api\n", CLI_NAME));
    out.push_str(&format!("  {} config domain example.mdbgo.io\n", CLI_NAME));
    out.push_str(&format!("  {} config domain --unset\n", CLI_NAME));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_mentions_grammar_and_vocabularies() {
        colored::control::set_override(false);
        let help = build_help();
        assert!(help.contains("mdb [entity] <command> [args...] [flags...]"));
        assert!(help.contains("wordpress"));
        assert!(help.contains("publish"));
    }
}
