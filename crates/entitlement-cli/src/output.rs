//! Formatted output helpers for CLI commands.

use entitlement_common::error::Result;
use entitlement_core::entitlement::Entitlement;
use entitlement_core::profile::OciProfile;

/// Renders a profile as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_profile(profile: &OciProfile, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(profile)
    } else {
        serde_json::to_string(profile)
    }
}

/// Formats one tab-separated `list` row.
///
/// # Errors
///
/// Returns an error if the entitlement has no domain or identifier.
pub fn entitlement_row(ent: &Entitlement) -> Result<String> {
    Ok(format!(
        "{}\t{}\t{}",
        ent.full_id(),
        ent.domain()?,
        ent.identifier()?
    ))
}
