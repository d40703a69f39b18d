//! `entctl apply`: Apply entitlements and print the resulting profile.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use entitlement_common::config::EntitlementsConfig;
use entitlement_common::error::{EntitlementError, Result};
use entitlement_common::types::FailurePolicy;
use entitlement_core::context::Context;
use entitlement_core::profile::OciProfile;
use entitlement_defaults::catalog::Catalog;

use crate::output;

/// Arguments for the `apply` command.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Entitlement identifiers to enforce, in order (e.g. `security.confined`).
    pub entitlements: Vec<String>,

    /// JSON file holding the starting profile. Defaults to an empty profile.
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// JSON configuration file. Command-line values take precedence.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip entitlements that fail instead of aborting.
    #[arg(long)]
    pub skip_failed: bool,

    /// Pretty-print the resulting profile.
    #[arg(long)]
    pub pretty: bool,
}

/// Settings after merging the configuration file with command-line flags.
#[derive(Debug, PartialEq, Eq)]
struct ApplyPlan {
    entitlements: Vec<String>,
    policy: FailurePolicy,
    base: Option<PathBuf>,
}

fn plan(args: ApplyArgs, config: EntitlementsConfig) -> ApplyPlan {
    ApplyPlan {
        entitlements: if args.entitlements.is_empty() {
            config.entitlements
        } else {
            args.entitlements
        },
        policy: if args.skip_failed {
            FailurePolicy::Skip
        } else {
            config.failure_policy
        },
        base: args.base.or(config.base_profile),
    }
}

/// Reads a starting profile from a JSON file.
fn load_profile(path: &Path) -> Result<OciProfile> {
    let content = std::fs::read_to_string(path).map_err(|source| EntitlementError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Executes the `apply` command.
///
/// # Errors
///
/// Returns an error if the configuration or base profile cannot be loaded,
/// an entitlement is unknown, or enforcement fails under the abort policy.
pub fn execute(args: ApplyArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => EntitlementsConfig::from_file(path)?,
        None => EntitlementsConfig::default(),
    };
    let pretty = args.pretty;
    let plan = plan(args, config);

    let profile = match &plan.base {
        Some(path) => load_profile(path)
            .with_context(|| format!("failed to load base profile {}", path.display()))?,
        None => OciProfile::new(),
    };

    tracing::info!(
        entitlements = ?plan.entitlements,
        policy = %plan.policy,
        "applying entitlements"
    );
    let catalog = Catalog::builtin()?;
    let ctx = catalog.enforce_chain(
        plan.entitlements.as_slice(),
        Context::new(profile),
        plan.policy,
    )?;
    let profile = ctx
        .into_payload::<OciProfile>()
        .map_err(|ctx| anyhow::anyhow!("chain produced a {} payload", ctx.payload_type()))?;

    println!("{}", output::render_profile(&profile, pretty)?);
    Ok(())
}
