//! # entitlement-common
//!
//! Shared error definitions, well-known capability and syscall names,
//! configuration models, and small domain types used across the
//! entitlements workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
