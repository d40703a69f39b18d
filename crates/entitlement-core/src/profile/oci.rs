//! OCI-shaped security profile.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::SecurityProfile;
use super::seccomp::ConditionalRules;

/// Capability set and seccomp syscall rules for one container.
///
/// Serializes to JSON so a base profile can be loaded from disk and the
/// enforced result handed to a runtime-specific encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OciProfile {
    /// Granted capabilities.
    pub capabilities: BTreeSet<String>,
    /// Syscalls denied by the seccomp filter.
    pub blocked_syscalls: BTreeSet<String>,
    /// Syscalls allowed without conditions.
    pub allowed_syscalls: BTreeSet<String>,
    /// Syscalls allowed only when their argument conditions hold.
    pub conditional_syscalls: ConditionalRules,
}

impl OciProfile {
    /// Creates a profile with no capabilities and no syscall rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `cap` is in the granted set.
    #[must_use]
    pub fn has_cap(&self, cap: &str) -> bool {
        self.capabilities.contains(cap)
    }

    /// Whether `syscall` is recorded as blocked.
    #[must_use]
    pub fn is_blocked(&self, syscall: &str) -> bool {
        self.blocked_syscalls.contains(syscall)
    }

    /// Whether `syscall` is recorded as unconditionally allowed.
    #[must_use]
    pub fn is_allowed(&self, syscall: &str) -> bool {
        self.allowed_syscalls.contains(syscall)
    }
}

fn insert_all(set: &mut BTreeSet<String>, names: &[&str]) {
    set.extend(names.iter().map(|name| (*name).to_owned()));
}

impl SecurityProfile for OciProfile {
    fn add_caps(&mut self, caps: &[&str]) {
        tracing::debug!(?caps, "adding capabilities");
        insert_all(&mut self.capabilities, caps);
    }

    fn remove_caps(&mut self, caps: &[&str]) {
        tracing::debug!(?caps, "removing capabilities");
        for cap in caps {
            let _ = self.capabilities.remove(*cap);
        }
    }

    fn block_syscalls(&mut self, syscalls: &[&str]) {
        tracing::debug!(?syscalls, "blocking syscalls");
        insert_all(&mut self.blocked_syscalls, syscalls);
    }

    fn allow_syscalls(&mut self, syscalls: &[&str]) {
        tracing::debug!(?syscalls, "allowing syscalls");
        insert_all(&mut self.allowed_syscalls, syscalls);
    }

    fn allow_syscalls_with_args(&mut self, rules: &ConditionalRules) {
        tracing::debug!(?rules, "allowing syscalls with argument conditions");
        self.conditional_syscalls.merge(rules);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::seccomp::ArgCondition;

    #[test]
    fn add_caps_is_idempotent() {
        let mut profile = OciProfile::new();
        profile.add_caps(&["CAP_CHOWN", "CAP_CHOWN"]);
        profile.add_caps(&["CAP_CHOWN"]);
        assert_eq!(profile.capabilities.len(), 1);
        assert!(profile.has_cap("CAP_CHOWN"));
    }

    #[test]
    fn remove_absent_cap_is_noop() {
        let mut profile = OciProfile::new();
        profile.add_caps(&["CAP_KILL"]);
        profile.remove_caps(&["CAP_SYS_ADMIN"]);
        assert_eq!(profile.capabilities.len(), 1);
        profile.remove_caps(&["CAP_KILL", "CAP_KILL"]);
        assert!(profile.capabilities.is_empty());
    }

    #[test]
    fn block_and_allow_are_recorded_independently() {
        let mut profile = OciProfile::new();
        profile.block_syscalls(&["ptrace"]);
        profile.allow_syscalls(&["ptrace", "mlock"]);
        assert!(profile.is_blocked("ptrace"));
        assert!(profile.is_allowed("ptrace"));
        assert!(profile.is_allowed("mlock"));
        assert!(!profile.is_blocked("mlock"));
    }

    #[test]
    fn allow_with_args_merges_into_existing_rules() {
        let mut profile = OciProfile::new();
        let first: ConditionalRules = [("prctl", vec![ArgCondition::not_equal(0, 24)])]
            .into_iter()
            .collect();
        let second: ConditionalRules = [(
            "prctl",
            vec![ArgCondition::not_equal(0, 24), ArgCondition::not_equal(0, 23)],
        )]
        .into_iter()
        .collect();
        profile.allow_syscalls_with_args(&first);
        profile.allow_syscalls_with_args(&second);
        assert_eq!(profile.conditional_syscalls.get("prctl").map(<[_]>::len), Some(2));
    }

    #[test]
    fn deserializes_partial_document() {
        let profile: OciProfile =
            serde_json::from_str(r#"{ "capabilities": ["CAP_CHOWN", "CAP_KILL"] }"#).unwrap();
        assert!(profile.has_cap("CAP_KILL"));
        assert!(profile.allowed_syscalls.is_empty());
        assert!(profile.conditional_syscalls.is_empty());
    }
}
