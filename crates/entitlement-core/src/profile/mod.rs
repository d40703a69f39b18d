//! The security profile contract and its concrete OCI-shaped model.
//!
//! Entitlement enforcement is written against [`SecurityProfile`] only.
//! Capability and syscall names are opaque strings: nothing here checks
//! them against a kernel capability table.

pub mod oci;
pub mod seccomp;

pub use self::oci::OciProfile;
pub use self::seccomp::{ArgCondition, ConditionalRules, SeccompOperator};

/// Mutations an entitlement may apply to a container security profile.
///
/// All operations are idempotent set edits. Removing an absent name is a
/// no-op, adding a present one is a no-op.
pub trait SecurityProfile {
    /// Adds capabilities to the granted set.
    fn add_caps(&mut self, caps: &[&str]);

    /// Removes capabilities from the granted set.
    fn remove_caps(&mut self, caps: &[&str]);

    /// Records syscalls as blocked.
    ///
    /// A syscall that is both blocked and allowed is left for the target
    /// runtime's precedence rules to resolve.
    fn block_syscalls(&mut self, syscalls: &[&str]);

    /// Records syscalls as unconditionally allowed.
    fn allow_syscalls(&mut self, syscalls: &[&str]);

    /// Records syscalls as allowed only when every listed argument
    /// condition holds.
    fn allow_syscalls_with_args(&mut self, rules: &ConditionalRules);
}
