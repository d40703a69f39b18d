//! `entctl list`: List registered entitlements.

use clap::Args;
use entitlement_defaults::catalog::Catalog;

use crate::output;

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print full identifiers only.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Executes the `list` command.
///
/// # Errors
///
/// Returns an error if the built-in catalog cannot be constructed.
pub fn execute(args: &ListArgs) -> anyhow::Result<()> {
    let catalog = Catalog::builtin()?;
    if args.quiet {
        for id in catalog.ids() {
            println!("{id}");
        }
        return Ok(());
    }

    println!("ENTITLEMENT\tDOMAIN\tID");
    for ent in &catalog {
        println!("{}", output::entitlement_row(ent)?);
    }
    Ok(())
}
