//! Unified error type for the entitlements workspace.
//!
//! Every fallible operation names the entitlement it failed on, so a
//! broken policy in a longer chain can be traced back to its identifier.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum EntitlementError {
    /// An entitlement identifier string is malformed.
    #[error("invalid entitlement identifier \"{input}\": {reason}")]
    Parse {
        /// The rejected identifier string.
        input: String,
        /// Why the identifier was rejected.
        reason: &'static str,
    },

    /// The entitlement has an identifier but no domain.
    #[error("no domain found for entitlement {id}")]
    MissingDomain {
        /// Identifier of the entitlement.
        id: String,
    },

    /// The entitlement has an empty identifier.
    #[error("no identifier found for current entitlement")]
    MissingIdentifier,

    /// The entitlement has neither a domain nor an identifier.
    #[error("no domain or identifier found for current entitlement")]
    MissingDomainOrIdentifier,

    /// `enforce` was called on an entitlement without an enforcement callback.
    #[error("invalid enforcement callback for entitlement {entitlement}")]
    MissingEnforcementCallback {
        /// Full identifier of the entitlement.
        entitlement: String,
    },

    /// The context payload does not implement the profile contract expected
    /// by the entitlement.
    #[error("entitlement {entitlement} cannot be enforced: context payload is not a {expected}")]
    ProfileTypeMismatch {
        /// Full identifier of the entitlement.
        entitlement: String,
        /// Name of the expected profile type.
        expected: &'static str,
    },

    /// An entitlement with the same full identifier is already registered.
    #[error("entitlement {entitlement} is already registered")]
    DuplicateEntitlement {
        /// Full identifier of the duplicate.
        entitlement: String,
    },

    /// No entitlement with this full identifier is registered.
    #[error("unknown entitlement: {entitlement}")]
    UnknownEntitlement {
        /// Requested full identifier.
        entitlement: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EntitlementError>;
