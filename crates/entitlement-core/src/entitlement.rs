//! Entitlements: named, enforceable units of security policy.
//!
//! Only the void kind exists today. It carries no value of its own, only
//! an identifier and an enforcement function.

use entitlement_common::constants::ID_SEPARATOR;
use entitlement_common::error::{EntitlementError, Result};

use crate::context::Context;
use crate::parser::parse_void_entitlement;

/// Pure transform from one enforcement context to the next.
pub type EnforceFn = fn(&Context) -> Result<Context>;

/// An entitlement of any kind.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Entitlement {
    /// Entitlement without an associated value.
    Void(VoidEntitlement),
}

impl Entitlement {
    /// Domain path joined with `.`.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is empty.
    pub fn domain(&self) -> Result<String> {
        match self {
            Self::Void(ent) => ent.domain(),
        }
    }

    /// Trailing identifier segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty.
    pub fn identifier(&self) -> Result<&str> {
        match self {
            Self::Void(ent) => ent.identifier(),
        }
    }

    /// Value carried by the entitlement. Always empty for void entitlements.
    #[must_use]
    pub const fn value(&self) -> &str {
        match self {
            Self::Void(ent) => ent.value(),
        }
    }

    /// Full `domain.id` identifier.
    #[must_use]
    pub fn full_id(&self) -> String {
        match self {
            Self::Void(ent) => ent.full_id(),
        }
    }

    /// Applies the entitlement to `ctx`, producing a new context.
    ///
    /// # Errors
    ///
    /// Propagates the enforcement error unchanged.
    pub fn enforce(&self, ctx: &Context) -> Result<Context> {
        match self {
            Self::Void(ent) => ent.enforce(ctx),
        }
    }
}

impl From<VoidEntitlement> for Entitlement {
    fn from(ent: VoidEntitlement) -> Self {
        Self::Void(ent)
    }
}

/// Entitlement identified by name alone, such as `security.confined`.
#[derive(Debug, Clone)]
pub struct VoidEntitlement {
    domain: Vec<String>,
    id: String,
    enforce: Option<EnforceFn>,
}

impl VoidEntitlement {
    /// Parses `full_name` and binds it to `enforce`.
    ///
    /// # Errors
    ///
    /// Returns [`EntitlementError::Parse`] if `full_name` is malformed.
    pub fn new(full_name: &str, enforce: EnforceFn) -> Result<Self> {
        Self::with_callback(full_name, Some(enforce))
    }

    /// Parses `full_name` and binds an optional enforcement function.
    ///
    /// An entitlement without one fails every `enforce` call.
    ///
    /// # Errors
    ///
    /// Returns [`EntitlementError::Parse`] if `full_name` is malformed.
    pub fn with_callback(full_name: &str, enforce: Option<EnforceFn>) -> Result<Self> {
        let (domain, id) = parse_void_entitlement(full_name)?;
        Ok(Self {
            domain,
            id,
            enforce,
        })
    }

    /// Domain path joined with `.`.
    ///
    /// # Errors
    ///
    /// Returns [`EntitlementError::MissingDomain`] naming the identifier, or
    /// [`EntitlementError::MissingDomainOrIdentifier`] when both are empty.
    pub fn domain(&self) -> Result<String> {
        if self.domain.is_empty() {
            return Err(match self.identifier() {
                Ok(id) => EntitlementError::MissingDomain { id: id.to_owned() },
                Err(_) => EntitlementError::MissingDomainOrIdentifier,
            });
        }
        Ok(self.domain.join(&ID_SEPARATOR.to_string()))
    }

    /// Trailing identifier segment.
    ///
    /// # Errors
    ///
    /// Returns [`EntitlementError::MissingIdentifier`] if it is empty.
    pub fn identifier(&self) -> Result<&str> {
        if self.id.is_empty() {
            return Err(EntitlementError::MissingIdentifier);
        }
        Ok(&self.id)
    }

    /// Always empty: void entitlements carry no value.
    #[must_use]
    pub const fn value(&self) -> &'static str {
        ""
    }

    /// Full `domain.id` identifier, with empty parts left blank.
    #[must_use]
    pub fn full_id(&self) -> String {
        format!(
            "{}{ID_SEPARATOR}{}",
            self.domain().unwrap_or_default(),
            self.identifier().unwrap_or_default()
        )
    }

    /// Applies the enforcement function to `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`EntitlementError::MissingEnforcementCallback`] before doing
    /// anything else if no function is bound, otherwise propagates the
    /// function's error unchanged.
    pub fn enforce(&self, ctx: &Context) -> Result<Context> {
        let Some(enforce) = self.enforce else {
            return Err(EntitlementError::MissingEnforcementCallback {
                entitlement: self.full_id(),
            });
        };
        tracing::debug!(entitlement = %self.full_id(), "enforcing entitlement");
        enforce(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::unnecessary_wraps)]
    fn double(ctx: &Context) -> Result<Context> {
        let n = ctx.payload::<u32>().copied().unwrap_or_default();
        Ok(Context::new(n * 2))
    }

    fn always_fails(_ctx: &Context) -> Result<Context> {
        Err(EntitlementError::UnknownEntitlement {
            entitlement: "from.callback".into(),
        })
    }

    #[test]
    fn accessors_round_trip_identifier() {
        let ent = VoidEntitlement::new("security.confined", double).unwrap();
        assert_eq!(ent.domain().unwrap(), "security");
        assert_eq!(ent.identifier().unwrap(), "confined");
        assert_eq!(ent.full_id(), "security.confined");
    }

    #[test]
    fn nested_domain_is_joined() {
        let ent = VoidEntitlement::new("network.egress.allow", double).unwrap();
        assert_eq!(ent.domain().unwrap(), "network.egress");
    }

    #[test]
    fn value_is_always_empty() {
        let ent: Entitlement = VoidEntitlement::new("security.view", double).unwrap().into();
        assert_eq!(ent.value(), "");
    }

    #[test]
    fn malformed_identifier_fails_construction() {
        let err = VoidEntitlement::new("confined", double).unwrap_err();
        assert!(matches!(err, EntitlementError::Parse { .. }));
    }

    #[test]
    fn enforce_delegates_to_callback() {
        let ent = VoidEntitlement::new("test.double", double).unwrap();
        let ctx = ent.enforce(&Context::new(21_u32)).unwrap();
        assert_eq!(ctx.payload::<u32>(), Some(&42));
    }

    #[test]
    fn enforce_propagates_callback_error() {
        let ent = VoidEntitlement::new("test.fails", always_fails).unwrap();
        let err = ent.enforce(&Context::new(())).unwrap_err();
        assert!(err.to_string().contains("from.callback"), "got: {err}");
    }

    #[test]
    fn enforce_without_callback_names_entitlement() {
        let ent = VoidEntitlement::with_callback("test.nocheck", None).unwrap();
        let err = ent.enforce(&Context::new(())).unwrap_err();
        assert!(matches!(err, EntitlementError::MissingEnforcementCallback { .. }));
        assert!(err.to_string().contains("test.nocheck"), "got: {err}");
    }

    #[test]
    fn empty_domain_error_names_identifier() {
        let ent = VoidEntitlement {
            domain: Vec::new(),
            id: "orphan".into(),
            enforce: None,
        };
        let err = ent.domain().unwrap_err();
        assert!(matches!(err, EntitlementError::MissingDomain { ref id } if id == "orphan"));
    }

    #[test]
    fn empty_domain_and_identifier_is_generic_error() {
        let ent = VoidEntitlement {
            domain: Vec::new(),
            id: String::new(),
            enforce: None,
        };
        assert!(matches!(
            ent.domain().unwrap_err(),
            EntitlementError::MissingDomainOrIdentifier
        ));
        assert!(matches!(
            ent.identifier().unwrap_err(),
            EntitlementError::MissingIdentifier
        ));
    }
}
