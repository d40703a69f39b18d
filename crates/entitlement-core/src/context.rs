//! Enforcement context threaded through a chain of entitlements.
//!
//! The payload is opaque to the context. Enforcement functions look for
//! the concrete type they can edit and fail when it is something else.

use std::any::{Any, type_name};
use std::fmt;

/// Carrier for the value an entitlement chain transforms.
///
/// Each successful enforcement yields a new context. The previous one is
/// never mutated.
pub struct Context {
    payload: Box<dyn Any + Send>,
    payload_type: &'static str,
}

impl Context {
    /// Wraps a payload, usually a security profile.
    #[must_use]
    pub fn new<P: Any + Send>(payload: P) -> Self {
        Self {
            payload: Box::new(payload),
            payload_type: type_name::<P>(),
        }
    }

    /// Returns the payload if it has type `P`.
    #[must_use]
    pub fn payload<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref::<P>()
    }

    /// Whether the payload has type `P`.
    #[must_use]
    pub fn holds<P: Any>(&self) -> bool {
        self.payload.is::<P>()
    }

    /// Type name of the payload, for diagnostics.
    #[must_use]
    pub const fn payload_type(&self) -> &'static str {
        self.payload_type
    }

    /// Unwraps the payload, handing the context back unchanged if it does
    /// not have type `P`.
    ///
    /// # Errors
    ///
    /// Returns `self` when the payload is not a `P`.
    pub fn into_payload<P: Any>(self) -> Result<P, Self> {
        let payload_type = self.payload_type;
        self.payload
            .downcast::<P>()
            .map(|boxed| *boxed)
            .map_err(|payload| Self {
                payload,
                payload_type,
            })
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("payload_type", &self.payload_type)
            .finish_non_exhaustive()
    }
}
