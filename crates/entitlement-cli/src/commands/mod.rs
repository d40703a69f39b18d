//! CLI command definitions and dispatch.

pub mod apply;
pub mod list;

use clap::{Parser, Subcommand};

/// entctl: translate entitlements into container security profiles.
#[derive(Parser, Debug)]
#[command(name = "entctl", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered entitlements.
    List(list::ListArgs),
    /// Apply entitlements to a base profile and print the result.
    Apply(apply::ApplyArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::List(args) => list::execute(&args),
        Command::Apply(args) => apply::execute(args),
    }
}
