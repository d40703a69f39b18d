//! Seccomp argument conditions for conditionally allowed syscalls.
//!
//! The shapes mirror the OCI runtime-spec `LinuxSeccompArg` so they can be
//! handed to a runtime without translation.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Comparison applied to a syscall argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeccompOperator {
    /// `arg != value`.
    #[serde(rename = "SCMP_CMP_NE")]
    NotEqual,
    /// `arg < value`.
    #[serde(rename = "SCMP_CMP_LT")]
    LessThan,
    /// `arg <= value`.
    #[serde(rename = "SCMP_CMP_LE")]
    LessEqual,
    /// `arg == value`.
    #[serde(rename = "SCMP_CMP_EQ")]
    EqualTo,
    /// `arg >= value`.
    #[serde(rename = "SCMP_CMP_GE")]
    GreaterEqual,
    /// `arg > value`.
    #[serde(rename = "SCMP_CMP_GT")]
    GreaterThan,
    /// `arg & value == value_two`.
    #[serde(rename = "SCMP_CMP_MASKED_EQ")]
    MaskedEqual,
}

/// A single predicate over one syscall argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgCondition {
    /// Zero-based argument position.
    pub index: u32,
    /// Operand compared against the argument.
    pub value: u64,
    /// Second operand, only used by [`SeccompOperator::MaskedEqual`].
    #[serde(default, rename = "valueTwo")]
    pub value_two: u64,
    /// Comparison operator.
    pub op: SeccompOperator,
}

impl ArgCondition {
    /// Condition that holds when argument `index` differs from `value`.
    #[must_use]
    pub const fn not_equal(index: u32, value: u64) -> Self {
        Self {
            index,
            value,
            value_two: 0,
            op: SeccompOperator::NotEqual,
        }
    }

    /// Evaluates the condition against a syscall's argument values.
    ///
    /// Returns `false` when the argument index is out of range.
    #[must_use]
    pub fn matches(&self, args: &[u64]) -> bool {
        let Some(&arg) = usize::try_from(self.index)
            .ok()
            .and_then(|i| args.get(i))
        else {
            return false;
        };
        match self.op {
            SeccompOperator::NotEqual => arg != self.value,
            SeccompOperator::LessThan => arg < self.value,
            SeccompOperator::LessEqual => arg <= self.value,
            SeccompOperator::EqualTo => arg == self.value,
            SeccompOperator::GreaterEqual => arg >= self.value,
            SeccompOperator::GreaterThan => arg > self.value,
            SeccompOperator::MaskedEqual => arg & self.value == self.value_two,
        }
    }
}

/// Ordered multimap from syscall name to the conditions that must all hold
/// for the syscall to be allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionalRules(BTreeMap<String, Vec<ArgCondition>>);

impl ConditionalRules {
    /// Creates an empty rule set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Appends a condition for `syscall` unless an identical one is present.
    ///
    /// Returns `true` if the condition was added.
    pub fn insert(&mut self, syscall: impl Into<String>, condition: ArgCondition) -> bool {
        let conditions = self.0.entry(syscall.into()).or_default();
        if conditions.contains(&condition) {
            return false;
        }
        conditions.push(condition);
        true
    }

    /// Unions every syscall's conditions from `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for (syscall, conditions) in &other.0 {
            for condition in conditions {
                let _ = self.insert(syscall.as_str(), *condition);
            }
        }
    }

    /// Returns the conditions recorded for `syscall`.
    #[must_use]
    pub fn get(&self, syscall: &str) -> Option<&[ArgCondition]> {
        self.0.get(syscall).map(Vec::as_slice)
    }

    /// Whether a call to `syscall` with `args` satisfies every recorded
    /// condition. Syscalls without conditions are not permitted here.
    #[must_use]
    pub fn permits(&self, syscall: &str, args: &[u64]) -> bool {
        self.get(syscall)
            .is_some_and(|conditions| conditions.iter().all(|c| c.matches(args)))
    }

    /// Iterates syscalls and their conditions in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<ArgCondition>> {
        self.0.iter()
    }

    /// Number of syscalls with conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no syscall has conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<ArgCondition>)> for ConditionalRules {
    fn from_iter<I: IntoIterator<Item = (S, Vec<ArgCondition>)>>(iter: I) -> Self {
        let mut rules = Self::new();
        for (syscall, conditions) in iter {
            let syscall = syscall.into();
            for condition in conditions {
                let _ = rules.insert(syscall.as_str(), condition);
            }
        }
        rules
    }
}

impl<'a> IntoIterator for &'a ConditionalRules {
    type Item = (&'a String, &'a Vec<ArgCondition>);
    type IntoIter = btree_map::Iter<'a, String, Vec<ArgCondition>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
