//! # qd-core
//!
//! Core types and error definitions shared by every qada crate.
//!
//! This crate holds the error taxonomy (validation vs. conflict), the
//! `ensure!` / `fail!` early-return macros, and the small identifier and
//! counting aliases used across the workspace.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// A count of whole calendar days.
pub type Days = u32;

/// A signed adjustment applied to a counter.
pub type Delta = i64;

/// Identifier of the person an obligation ledger belongs to.
///
/// The chat layer keys people by a numeric account id; the calculator only
/// needs it to be a stable, hashable key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "person#{}", self.0)
    }
}

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
