//! Configuration model for applying entitlements.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EntitlementError, Result};
use crate::types::FailurePolicy;

/// Which entitlements to enforce, and how.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitlementsConfig {
    /// Full identifiers to enforce, in order.
    pub entitlements: Vec<String>,
    /// Behavior when an entitlement in the chain fails.
    pub failure_policy: FailurePolicy,
    /// Optional JSON document holding the starting profile.
    pub base_profile: Option<PathBuf>,
}

impl EntitlementsConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| EntitlementError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn from_file_reads_all_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "entitlements": ["security.admin", "security.memory-lock"],
                "failure_policy": "skip",
                "base_profile": "/etc/entitlements/base.json"
            }}"#
        )
        .unwrap();

        let config = EntitlementsConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.entitlements,
            vec!["security.admin", "security.memory-lock"]
        );
        assert_eq!(config.failure_policy, FailurePolicy::Skip);
        assert_eq!(
            config.base_profile.as_deref(),
            Some(Path::new("/etc/entitlements/base.json"))
        );
    }

    #[test]
    fn from_file_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "entitlements": ["security.view"] }}"#).unwrap();

        let config = EntitlementsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert!(config.base_profile.is_none());
    }

    #[test]
    fn from_file_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = EntitlementsConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, EntitlementError::Io { .. }), "got: {err}");
    }

    #[test]
    fn from_file_invalid_json_is_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "entitlements = []").unwrap();
        let err = EntitlementsConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, EntitlementError::Serialization { .. }));
    }
}
