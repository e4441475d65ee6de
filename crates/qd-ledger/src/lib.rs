//! # qd-ledger
//!
//! Obligation categories and the owed / fulfilled counters kept for each of
//! them.
//!
//! A [`CounterBook`] is one person's set of counters and implements the
//! aggregate operations (`initialize`, `add_fulfilled`, `add_owed`,
//! `reset`).  A [`Ledger`] keys books by person and serialises every
//! mutation, which is the boundary a persistent record store plugs into.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// The per-person counter aggregate.
pub mod book;

/// Prayer kinds and obligation categories.
pub mod category;

/// A single owed / fulfilled counter.
pub mod counter;

/// Thread-safe keyed store of counter books.
pub mod ledger;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use book::{CounterBook, ResetScope};
pub use category::{Category, PrayerKind};
pub use counter::ObligationCounter;
pub use ledger::Ledger;
