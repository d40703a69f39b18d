//! Domain primitive types used across the entitlements workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a chain of enforcements does when one entitlement fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failure and surface its error.
    #[default]
    Abort,
    /// Log the failure, keep the last good context, and continue.
    Skip,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_policy_defaults_to_abort() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Abort);
    }

    #[test]
    fn failure_policy_serializes_lowercase() {
        let json = serde_json::to_string(&FailurePolicy::Skip).unwrap();
        assert_eq!(json, "\"skip\"");
        let back: FailurePolicy = serde_json::from_str("\"abort\"").unwrap();
        assert_eq!(back, FailurePolicy::Abort);
    }
}
