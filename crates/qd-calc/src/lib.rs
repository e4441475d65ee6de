//! # qd-calc
//!
//! The obligation-period calculator.
//!
//! Given a person's biographical dates and, for women, their recorded cycle
//! durations and childbirths, the calculator works out how many of each
//! prayer and how many fasting days per lunar fasting month are owed:
//!
//! 1. [`partition`] splits the obligation range at each childbirth into cycle
//!    segments and fully exempt postpartum spans.
//! 2. [`exemption`] subtracts the estimated cycle and postpartum days, once
//!    for the prayer range and once per approximate fasting month
//!    ([`lunar`]).
//! 3. [`calculator`] ties both together and feeds the counter book.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// End-to-end calculation from a person record to owed counts.
pub mod calculator;

/// Calculator configuration.
pub mod config;

/// Prayer and fasting exemption accounting.
pub mod exemption;

/// Cycle profiles, childbirth records, and their validation.
pub mod history;

/// Fixed-length approximation of the yearly lunar fasting month.
pub mod lunar;

/// Splitting a date range at childbirth events.
pub mod partition;

/// Person record and typed partial updates.
pub mod person;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calculator::{ObligationCalculator, Obligations};
pub use config::CalculatorConfig;
pub use exemption::{compute_fast_days, compute_prayer_days, FastBlock, FastDays, PrayerDays};
pub use history::{CycleHistory, CycleProfile, PostpartumEvent};
pub use lunar::LunarCalendar;
pub use partition::{partition, Partition, PostpartumSpan, Segment};
pub use person::{Gender, Person, PersonPatch};
