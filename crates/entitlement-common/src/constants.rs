//! Well-known names shared by the profile model and the built-in catalog.
//!
//! Capability names use the OCI runtime-spec spelling (`CAP_*`). Syscall
//! names use the kernel spelling found in seccomp profiles.

/// Domain of the built-in security entitlements.
pub const SECURITY_DOMAIN: &str = "security";

/// Full identifier of the `security.confined` entitlement.
pub const SECURITY_CONFINED: &str = "security.confined";
/// Full identifier of the `security.view` entitlement.
pub const SECURITY_VIEW: &str = "security.view";
/// Full identifier of the `security.admin` entitlement.
pub const SECURITY_ADMIN: &str = "security.admin";
/// Full identifier of the `security.memory-lock` entitlement.
pub const SECURITY_MEMORY_LOCK: &str = "security.memory-lock";

/// Separator between domain segments and the identifier.
pub const ID_SEPARATOR: char = '.';

// Capabilities

/// Override mandatory access control.
pub const CAP_MAC_ADMIN: &str = "CAP_MAC_ADMIN";
/// Allow MAC configuration or state changes.
pub const CAP_MAC_OVERRIDE: &str = "CAP_MAC_OVERRIDE";
/// Bypass file read, write, and execute permission checks.
pub const CAP_DAC_OVERRIDE: &str = "CAP_DAC_OVERRIDE";
/// Bypass file read and directory read/execute permission checks.
pub const CAP_DAC_READ_SEARCH: &str = "CAP_DAC_READ_SEARCH";
/// Modify process capabilities.
pub const CAP_SETPCAP: &str = "CAP_SETPCAP";
/// Set file capabilities.
pub const CAP_SETFCAP: &str = "CAP_SETFCAP";
/// Make arbitrary manipulations of process UIDs.
pub const CAP_SETUID: &str = "CAP_SETUID";
/// Make arbitrary manipulations of process GIDs.
pub const CAP_SETGID: &str = "CAP_SETGID";
/// Trace arbitrary processes.
pub const CAP_SYS_PTRACE: &str = "CAP_SYS_PTRACE";
/// Keep set-user-ID and set-group-ID bits on modified files.
pub const CAP_FSETID: &str = "CAP_FSETID";
/// Load and unload kernel modules.
pub const CAP_SYS_MODULE: &str = "CAP_SYS_MODULE";
/// Perform privileged `syslog(2)` operations.
pub const CAP_SYSLOG: &str = "CAP_SYSLOG";
/// Perform raw I/O port operations.
pub const CAP_SYS_RAWIO: &str = "CAP_SYS_RAWIO";
/// Perform a range of system administration operations.
pub const CAP_SYS_ADMIN: &str = "CAP_SYS_ADMIN";
/// Set immutable and append-only file attributes.
pub const CAP_LINUX_IMMUTABLE: &str = "CAP_LINUX_IMMUTABLE";
/// Lock memory.
pub const CAP_IPC_LOCK: &str = "CAP_IPC_LOCK";

// Syscalls

/// `ptrace(2)`.
pub const SYS_PTRACE: &str = "ptrace";
/// `arch_prctl(2)`.
pub const SYS_ARCH_PRCTL: &str = "arch_prctl";
/// `personality(2)`.
pub const SYS_PERSONALITY: &str = "personality";
/// `setuid(2)`.
pub const SYS_SETUID: &str = "setuid";
/// `setgid(2)`.
pub const SYS_SETGID: &str = "setgid";
/// `prctl(2)`.
pub const SYS_PRCTL: &str = "prctl";
/// `madvise(2)`.
pub const SYS_MADVISE: &str = "madvise";
/// `mlock(2)`.
pub const SYS_MLOCK: &str = "mlock";
/// `munlock(2)`.
pub const SYS_MUNLOCK: &str = "munlock";
/// `mlock2(2)`.
pub const SYS_MLOCK2: &str = "mlock2";
/// `mlockall(2)`.
pub const SYS_MLOCKALL: &str = "mlockall";
/// `munlockall(2)`.
pub const SYS_MUNLOCKALL: &str = "munlockall";

// prctl(2) options, from <linux/prctl.h>

/// `PR_CAPBSET_READ`: read a capability from the bounding set.
pub const PR_CAPBSET_READ: u64 = 23;
/// `PR_CAPBSET_DROP`: drop a capability from the bounding set.
pub const PR_CAPBSET_DROP: u64 = 24;
