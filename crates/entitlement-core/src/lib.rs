//! # entitlement-core
//!
//! Building blocks for translating named entitlements into security
//! profile edits.
//!
//! This crate provides:
//! - **Parser**: dotted identifiers such as `security.confined` into a
//!   domain path and a trailing identifier.
//! - **Profile**: the [`SecurityProfile`](profile::SecurityProfile) contract,
//!   the concrete [`OciProfile`](profile::OciProfile), and the seccomp
//!   argument-condition model.
//! - **Context**: the carrier threading a payload through a chain of
//!   enforcements.
//! - **Entitlement**: void entitlements binding an identifier to an
//!   enforcement function.
//!
//! Nothing here talks to the kernel. The output is a declarative profile
//! that a container runtime applies.

pub mod context;
pub mod entitlement;
pub mod parser;
pub mod profile;
