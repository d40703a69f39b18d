//! # entitlement-defaults
//!
//! The built-in `security.*` entitlements and the [`Catalog`](catalog::Catalog)
//! registry that resolves identifiers and enforces them in order.

pub mod catalog;
pub mod security;
