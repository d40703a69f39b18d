//! Entitlement identifier parsing.
//!
//! An identifier has the form `domain[.subdomain...].id`. The last segment
//! is the identifier, every segment before it forms the domain path in
//! order.

use std::fmt;
use std::str::FromStr;

use entitlement_common::constants::ID_SEPARATOR;
use entitlement_common::error::{EntitlementError, Result};

/// A parsed entitlement identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntitlementId {
    domain: Vec<String>,
    id: String,
}

impl EntitlementId {
    /// Returns the domain path segments, outermost first.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Returns the trailing identifier segment.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Splits the identifier into its domain path and trailing identifier.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, String) {
        (self.domain, self.id)
    }
}

impl fmt::Display for EntitlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.domain {
            write!(f, "{segment}{ID_SEPARATOR}")?;
        }
        write!(f, "{}", self.id)
    }
}

impl FromStr for EntitlementId {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self> {
        parse_entitlement_id(s)
    }
}

fn parse_err(input: &str, reason: &'static str) -> EntitlementError {
    EntitlementError::Parse {
        input: input.to_owned(),
        reason,
    }
}

/// Parses a full entitlement name into a domain path and identifier.
///
/// # Errors
///
/// Returns [`EntitlementError::Parse`] if the input is empty, has no
/// domain, or contains an empty segment.
pub fn parse_entitlement_id(full_name: &str) -> Result<EntitlementId> {
    if full_name.is_empty() {
        return Err(parse_err(full_name, "identifier is empty"));
    }

    let mut segments: Vec<String> = Vec::new();
    for segment in full_name.split(ID_SEPARATOR) {
        if segment.is_empty() {
            return Err(parse_err(full_name, "identifier contains an empty segment"));
        }
        segments.push(segment.to_owned());
    }

    let Some(id) = segments.pop() else {
        return Err(parse_err(full_name, "identifier is empty"));
    };
    if segments.is_empty() {
        return Err(parse_err(full_name, "identifier has no domain"));
    }

    Ok(EntitlementId {
        domain: segments,
        id,
    })
}

/// Parses a void entitlement name into `(domain, id)`.
///
/// # Errors
///
/// Returns [`EntitlementError::Parse`] under the same conditions as
/// [`parse_entitlement_id`].
pub fn parse_void_entitlement(full_name: &str) -> Result<(Vec<String>, String)> {
    parse_entitlement_id(full_name).map(EntitlementId::into_parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_two_segments() {
        let (domain, id) = parse_void_entitlement("security.confined").unwrap();
        assert_eq!(domain, vec!["security"]);
        assert_eq!(id, "confined");
    }

    #[test]
    fn parse_keeps_domain_order() {
        let parsed = parse_entitlement_id("network.egress.dns.allow").unwrap();
        assert_eq!(parsed.domain(), ["network", "egress", "dns"]);
        assert_eq!(parsed.id(), "allow");
    }

    #[test]
    fn parse_identifier_with_dash() {
        let parsed = parse_entitlement_id("security.memory-lock").unwrap();
        assert_eq!(parsed.id(), "memory-lock");
    }

    #[test]
    fn parse_empty_fails() {
        let err = parse_entitlement_id("").unwrap_err();
        assert!(err.to_string().contains("empty"), "got: {err}");
    }

    #[test]
    fn parse_without_separator_fails() {
        let err = parse_entitlement_id("confined").unwrap_err();
        assert!(err.to_string().contains("no domain"), "got: {err}");
    }

    #[test]
    fn parse_empty_segments_fail() {
        for input in [".confined", "security.", "security..confined", ".", ".."] {
            let err = parse_entitlement_id(input).unwrap_err();
            assert!(
                matches!(err, EntitlementError::Parse { .. }),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn display_rejoins_segments() {
        let parsed: EntitlementId = "a.b.c".parse().unwrap();
        assert_eq!(parsed.to_string(), "a.b.c");
    }
}
