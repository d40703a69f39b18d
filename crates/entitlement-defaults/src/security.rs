//! Built-in security entitlements.
//!
//! | Entitlement | Effect |
//! |---|---|
//! | `security.confined` | drops privileged capabilities, blocks tracing and identity syscalls, allows `prctl` except bounding-set read and drop |
//! | `security.view` | like `confined` but keeps `CAP_DAC_READ_SEARCH` and only denies bounding-set drop |
//! | `security.admin` | grants privileged capabilities and allows the syscalls `confined` blocks |
//! | `security.memory-lock` | grants `CAP_IPC_LOCK` and allows the memory-locking syscalls |
//!
//! The name lists below are the security contract. Duplicates present in
//! them are kept as written so the audit log shows the exact request.

use entitlement_common::constants::{
    CAP_DAC_OVERRIDE, CAP_DAC_READ_SEARCH, CAP_FSETID, CAP_IPC_LOCK, CAP_LINUX_IMMUTABLE,
    CAP_MAC_ADMIN, CAP_MAC_OVERRIDE, CAP_SETFCAP, CAP_SETGID, CAP_SETPCAP, CAP_SETUID,
    CAP_SYS_ADMIN, CAP_SYS_MODULE, CAP_SYS_PTRACE, CAP_SYS_RAWIO, CAP_SYSLOG, PR_CAPBSET_DROP,
    PR_CAPBSET_READ, SECURITY_ADMIN, SECURITY_CONFINED, SECURITY_MEMORY_LOCK, SECURITY_VIEW,
    SYS_ARCH_PRCTL, SYS_MADVISE, SYS_MLOCK, SYS_MLOCK2, SYS_MLOCKALL, SYS_MUNLOCK,
    SYS_MUNLOCKALL, SYS_PERSONALITY, SYS_PRCTL, SYS_PTRACE, SYS_SETGID, SYS_SETUID,
};
use entitlement_common::error::{EntitlementError, Result};
use entitlement_core::context::Context;
use entitlement_core::entitlement::{Entitlement, VoidEntitlement};
use entitlement_core::profile::{ArgCondition, ConditionalRules, OciProfile, SecurityProfile};

/// Capabilities removed by `security.confined`. `CAP_SETFCAP` appears twice.
pub const CONFINED_CAPS_TO_REMOVE: &[&str] = &[
    CAP_MAC_ADMIN,
    CAP_MAC_OVERRIDE,
    CAP_DAC_OVERRIDE,
    CAP_DAC_READ_SEARCH,
    CAP_SETFCAP,
    CAP_SETFCAP,
    CAP_SETUID,
    CAP_SETGID,
    CAP_SYS_PTRACE,
    CAP_FSETID,
    CAP_SYS_MODULE,
    CAP_SYSLOG,
    CAP_SYS_RAWIO,
    CAP_SYS_ADMIN,
    CAP_LINUX_IMMUTABLE,
];

/// Syscalls blocked by `security.confined`. `personality` appears twice.
pub const CONFINED_SYSCALLS_TO_BLOCK: &[&str] = &[
    SYS_PTRACE,
    SYS_ARCH_PRCTL,
    SYS_PERSONALITY,
    SYS_PERSONALITY,
    SYS_SETUID,
    SYS_SETGID,
    SYS_PRCTL,
    SYS_MADVISE,
];

/// Capabilities removed by `security.view`.
pub const VIEW_CAPS_TO_REMOVE: &[&str] = &[
    CAP_SYS_ADMIN,
    CAP_SYS_PTRACE,
    CAP_SETUID,
    CAP_SETGID,
    CAP_SETPCAP,
    CAP_SETFCAP,
    CAP_MAC_ADMIN,
    CAP_MAC_OVERRIDE,
    CAP_DAC_OVERRIDE,
    CAP_FSETID,
    CAP_SYS_MODULE,
    CAP_SYSLOG,
    CAP_SYS_RAWIO,
    CAP_LINUX_IMMUTABLE,
];

/// Capabilities added by `security.view`.
pub const VIEW_CAPS_TO_ADD: &[&str] = &[CAP_DAC_READ_SEARCH];

/// Syscalls blocked by `security.view`.
pub const VIEW_SYSCALLS_TO_BLOCK: &[&str] = &[
    SYS_PTRACE,
    SYS_ARCH_PRCTL,
    SYS_PERSONALITY,
    SYS_SETUID,
    SYS_SETGID,
    SYS_PRCTL,
    SYS_MADVISE,
];

/// Capabilities added by `security.admin`.
pub const ADMIN_CAPS_TO_ADD: &[&str] = &[
    CAP_MAC_ADMIN,
    CAP_MAC_OVERRIDE,
    CAP_DAC_OVERRIDE,
    CAP_DAC_READ_SEARCH,
    CAP_SETPCAP,
    CAP_SETFCAP,
    CAP_SETUID,
    CAP_SETGID,
    CAP_SYS_PTRACE,
    CAP_FSETID,
    CAP_SYS_MODULE,
    CAP_SYSLOG,
    CAP_SYS_RAWIO,
    CAP_SYS_ADMIN,
    CAP_LINUX_IMMUTABLE,
];

/// Syscalls allowed by `security.admin`.
pub const ADMIN_SYSCALLS_TO_ALLOW: &[&str] = &[
    SYS_PTRACE,
    SYS_ARCH_PRCTL,
    SYS_PERSONALITY,
    SYS_SETUID,
    SYS_SETGID,
    SYS_PRCTL,
    SYS_MADVISE,
];

/// Capabilities added by `security.memory-lock`.
pub const MEMORY_LOCK_CAPS_TO_ADD: &[&str] = &[CAP_IPC_LOCK];

/// Syscalls allowed by `security.memory-lock`.
pub const MEMORY_LOCK_SYSCALLS_TO_ALLOW: &[&str] = &[
    SYS_MLOCK,
    SYS_MUNLOCK,
    SYS_MLOCK2,
    SYS_MLOCKALL,
    SYS_MUNLOCKALL,
];

/// `prctl` allowed only when option (argument 0) is none of `denied_options`.
fn prctl_allowed_except(denied_options: &[u64]) -> ConditionalRules {
    [(
        SYS_PRCTL,
        denied_options
            .iter()
            .map(|&option| ArgCondition::not_equal(0, option))
            .collect::<Vec<_>>(),
    )]
    .into_iter()
    .collect()
}

/// Applies the `security.confined` edits to any profile.
pub fn apply_confined<P: SecurityProfile + ?Sized>(profile: &mut P) {
    profile.remove_caps(CONFINED_CAPS_TO_REMOVE);
    profile.block_syscalls(CONFINED_SYSCALLS_TO_BLOCK);
    profile.allow_syscalls_with_args(&prctl_allowed_except(&[PR_CAPBSET_DROP, PR_CAPBSET_READ]));
    // TODO: deny read-write access to sensitive filesystem paths once
    // profiles carry AppArmor rules.
}

/// Applies the `security.view` edits to any profile.
pub fn apply_view<P: SecurityProfile + ?Sized>(profile: &mut P) {
    profile.remove_caps(VIEW_CAPS_TO_REMOVE);
    profile.add_caps(VIEW_CAPS_TO_ADD);
    profile.block_syscalls(VIEW_SYSCALLS_TO_BLOCK);
    profile.allow_syscalls_with_args(&prctl_allowed_except(&[PR_CAPBSET_DROP]));
}

/// Applies the `security.admin` edits to any profile.
pub fn apply_admin<P: SecurityProfile + ?Sized>(profile: &mut P) {
    profile.add_caps(ADMIN_CAPS_TO_ADD);
    profile.allow_syscalls(ADMIN_SYSCALLS_TO_ALLOW);
}

/// Applies the `security.memory-lock` edits to any profile.
pub fn apply_memory_lock<P: SecurityProfile + ?Sized>(profile: &mut P) {
    profile.add_caps(MEMORY_LOCK_CAPS_TO_ADD);
    profile.allow_syscalls(MEMORY_LOCK_SYSCALLS_TO_ALLOW);
}

/// Returns the context's profile, or a mismatch error naming `entitlement`.
fn oci_profile_check<'a>(ctx: &'a Context, entitlement: &str) -> Result<&'a OciProfile> {
    ctx.payload::<OciProfile>()
        .ok_or_else(|| EntitlementError::ProfileTypeMismatch {
            entitlement: entitlement.to_owned(),
            expected: "OciProfile",
        })
}

/// Copies the profile out of `ctx`, applies `edit`, and wraps the result.
///
/// The input context is never modified, so a failed check leaves it as it was.
fn enforce_on_copy(ctx: &Context, entitlement: &str, edit: fn(&mut OciProfile)) -> Result<Context> {
    let mut profile = oci_profile_check(ctx, entitlement)?.clone();
    edit(&mut profile);
    Ok(Context::new(profile))
}

fn enforce_confined(ctx: &Context) -> Result<Context> {
    enforce_on_copy(ctx, SECURITY_CONFINED, apply_confined::<OciProfile>)
}

fn enforce_view(ctx: &Context) -> Result<Context> {
    enforce_on_copy(ctx, SECURITY_VIEW, apply_view::<OciProfile>)
}

fn enforce_admin(ctx: &Context) -> Result<Context> {
    enforce_on_copy(ctx, SECURITY_ADMIN, apply_admin::<OciProfile>)
}

fn enforce_memory_lock(ctx: &Context) -> Result<Context> {
    enforce_on_copy(ctx, SECURITY_MEMORY_LOCK, apply_memory_lock::<OciProfile>)
}

/// `security.confined`: a workload with no privileged access.
///
/// # Errors
///
/// Returns an error if the identifier fails to parse.
pub fn confined() -> Result<Entitlement> {
    VoidEntitlement::new(SECURITY_CONFINED, enforce_confined).map(Entitlement::from)
}

/// `security.view`: a workload that may read, but not change, the host view.
///
/// # Errors
///
/// Returns an error if the identifier fails to parse.
pub fn view() -> Result<Entitlement> {
    VoidEntitlement::new(SECURITY_VIEW, enforce_view).map(Entitlement::from)
}

/// `security.admin`: a workload with full administrative privileges.
///
/// # Errors
///
/// Returns an error if the identifier fails to parse.
pub fn admin() -> Result<Entitlement> {
    VoidEntitlement::new(SECURITY_ADMIN, enforce_admin).map(Entitlement::from)
}

/// `security.memory-lock`: a workload that may lock memory pages.
///
/// # Errors
///
/// Returns an error if the identifier fails to parse.
pub fn memory_lock() -> Result<Entitlement> {
    VoidEntitlement::new(SECURITY_MEMORY_LOCK, enforce_memory_lock).map(Entitlement::from)
}

/// All built-in security entitlements, in registration order.
///
/// # Errors
///
/// Returns the first construction error.
pub fn builtin_entitlements() -> Result<Vec<Entitlement>> {
    Ok(vec![confined()?, view()?, admin()?, memory_lock()?])
}
