//! Explicit entitlement registry.
//!
//! Callers build a [`Catalog`] once and pass it where entitlements are
//! resolved. There is no process-wide instance.

use std::collections::BTreeMap;

use entitlement_common::error::{EntitlementError, Result};
use entitlement_common::types::FailurePolicy;
use entitlement_core::context::Context;
use entitlement_core::entitlement::Entitlement;

use crate::security;

/// Entitlements keyed by full identifier, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Entitlement>,
    index: BTreeMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in security entitlements, in the
    /// order `confined`, `view`, `admin`, `memory-lock`.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in fails to construct or register.
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        for ent in security::builtin_entitlements()? {
            catalog.register(ent)?;
        }
        tracing::debug!(count = catalog.len(), "built-in catalog ready");
        Ok(catalog)
    }

    /// Adds an entitlement.
    ///
    /// # Errors
    ///
    /// Returns [`EntitlementError::DuplicateEntitlement`] if its full
    /// identifier is already registered.
    pub fn register(&mut self, ent: Entitlement) -> Result<()> {
        let full_id = ent.full_id();
        if self.index.contains_key(&full_id) {
            return Err(EntitlementError::DuplicateEntitlement {
                entitlement: full_id,
            });
        }
        let _ = self.index.insert(full_id, self.entries.len());
        self.entries.push(ent);
        Ok(())
    }

    /// Looks up an entitlement by full identifier.
    #[must_use]
    pub fn get(&self, full_id: &str) -> Option<&Entitlement> {
        self.index.get(full_id).and_then(|&i| self.entries.get(i))
    }

    /// Looks up an entitlement, failing if it is not registered.
    ///
    /// # Errors
    ///
    /// Returns [`EntitlementError::UnknownEntitlement`] if absent.
    pub fn resolve(&self, full_id: &str) -> Result<&Entitlement> {
        self.get(full_id)
            .ok_or_else(|| EntitlementError::UnknownEntitlement {
                entitlement: full_id.to_owned(),
            })
    }

    /// Full identifiers in registration order.
    pub fn ids(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(Entitlement::full_id)
    }

    /// Iterates registered entitlements in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entitlement> {
        self.entries.iter()
    }

    /// Number of registered entitlements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enforces `ids` in order, starting from `ctx`.
    ///
    /// Every identifier is resolved before any enforcement runs. Under
    /// [`FailurePolicy::Skip`] a failing entitlement is logged and the chain
    /// continues from the last good context.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier is unknown, or under
    /// [`FailurePolicy::Abort`] the first enforcement error.
    pub fn enforce_chain<S: AsRef<str>>(
        &self,
        ids: &[S],
        ctx: Context,
        policy: FailurePolicy,
    ) -> Result<Context> {
        let chain = ids
            .iter()
            .map(|id| self.resolve(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(entitlements = chain.len(), %policy, "enforcing entitlement chain");
        let mut ctx = ctx;
        for ent in chain {
            match ent.enforce(&ctx) {
                Ok(next) => ctx = next,
                Err(e) if policy == FailurePolicy::Skip => {
                    tracing::warn!(
                        entitlement = %ent.full_id(),
                        error = %e,
                        "skipping failed entitlement"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!("entitlement chain complete");
        Ok(ctx)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Entitlement;
    type IntoIter = std::slice::Iter<'a, Entitlement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use entitlement_common::constants::{
        CAP_IPC_LOCK, CAP_SYS_ADMIN, SECURITY_ADMIN, SECURITY_CONFINED, SECURITY_MEMORY_LOCK,
        SECURITY_VIEW,
    };
    use entitlement_core::entitlement::VoidEntitlement;
    use entitlement_core::profile::{OciProfile, SecurityProfile};

    use super::*;

    fn profile_of(ctx: &Context) -> &OciProfile {
        ctx.payload::<OciProfile>().unwrap()
    }

    #[test]
    fn builtin_registers_four_in_order() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.ids().collect::<Vec<_>>(),
            vec![
                SECURITY_CONFINED,
                SECURITY_VIEW,
                SECURITY_ADMIN,
                SECURITY_MEMORY_LOCK
            ]
        );
        assert!(catalog.get("security.admin").is_some());
        assert!(catalog.get("security.root").is_none());
    }

    #[test]
    fn register_rejects_duplicate() {
        let mut catalog = Catalog::builtin().unwrap();
        let err = catalog.register(security::admin().unwrap()).unwrap_err();
        assert!(matches!(err, EntitlementError::DuplicateEntitlement { .. }));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn unknown_id_fails_before_any_enforcement() {
        let catalog = Catalog::builtin().unwrap();
        let err = catalog
            .enforce_chain(
                &[SECURITY_ADMIN, "security.root"],
                Context::new(OciProfile::new()),
                FailurePolicy::Skip,
            )
            .unwrap_err();
        assert!(err.to_string().contains("security.root"), "got: {err}");
    }

    #[test]
    fn chain_order_matters() {
        let catalog = Catalog::builtin().unwrap();

        let ctx = catalog
            .enforce_chain(
                &[SECURITY_CONFINED, SECURITY_ADMIN],
                Context::new(OciProfile::new()),
                FailurePolicy::Abort,
            )
            .unwrap();
        assert!(profile_of(&ctx).has_cap(CAP_SYS_ADMIN));

        let ctx = catalog
            .enforce_chain(
                &[SECURITY_ADMIN, SECURITY_CONFINED],
                Context::new(OciProfile::new()),
                FailurePolicy::Abort,
            )
            .unwrap();
        assert!(!profile_of(&ctx).has_cap(CAP_SYS_ADMIN));
    }

    #[test]
    fn abort_policy_surfaces_first_failure() {
        let mut catalog = Catalog::builtin().unwrap();
        catalog
            .register(VoidEntitlement::with_callback("test.nocheck", None).unwrap().into())
            .unwrap();
        let err = catalog
            .enforce_chain(
                &["test.nocheck", SECURITY_MEMORY_LOCK],
                Context::new(OciProfile::new()),
                FailurePolicy::Abort,
            )
            .unwrap_err();
        assert!(matches!(err, EntitlementError::MissingEnforcementCallback { .. }));
    }

    #[test]
    fn skip_policy_continues_from_last_good_context() {
        let mut catalog = Catalog::builtin().unwrap();
        catalog
            .register(VoidEntitlement::with_callback("test.nocheck", None).unwrap().into())
            .unwrap();
        let mut start = OciProfile::new();
        start.add_caps(&["CAP_CHOWN"]);
        let ctx = catalog
            .enforce_chain(
                &["test.nocheck", SECURITY_MEMORY_LOCK],
                Context::new(start),
                FailurePolicy::Skip,
            )
            .unwrap();
        let profile = profile_of(&ctx);
        assert!(profile.has_cap("CAP_CHOWN"));
        assert!(profile.has_cap(CAP_IPC_LOCK));
    }

    #[test]
    fn empty_chain_returns_context_unchanged() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        let ids: [&str; 0] = [];
        let ctx = catalog
            .enforce_chain(&ids, Context::new(7_u32), FailurePolicy::Abort)
            .unwrap();
        assert_eq!(ctx.payload::<u32>(), Some(&7));
    }
}
