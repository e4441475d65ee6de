//! # qada
//!
//! Missed-obligation tracking: how many prayers and fasting days a person
//! owes, and how many of them have been made up since.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on it rather than on the individual
//! `qd-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use qada::prelude::*;
//!
//! let calc = ObligationCalculator::new(CalculatorConfig::default()).unwrap();
//! let person = Person::new(
//!     "2011-01-01".parse().unwrap(),
//!     Gender::Female,
//!     "2020-07-01".parse().unwrap(),
//! )
//! .unwrap();
//! let history = CycleHistory::new(
//!     vec![CycleProfile::new(0, 6)],
//!     vec![],
//!     calc.config(),
//! )
//! .unwrap();
//!
//! let ledger = Ledger::new();
//! let id = PersonId(1);
//! calc.recalculate_into(&ledger, id, &person, &history).unwrap();
//! ledger.add_fulfilled(id, Category::Prayer(PrayerKind::Fajr), 6);
//!
//! let fajr = ledger.counter(id, Category::Prayer(PrayerKind::Fajr));
//! assert_eq!(fajr.total_owed(), 146);
//! assert_eq!(fajr.remaining(), 140);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions and shared aliases.
pub use qd_core as core;

/// Dates, date ranges, and ages.
pub use qd_time as time;

/// Obligation categories, counters, and the ledger store.
pub use qd_ledger as ledger;

/// Interval partitioning, exemption rules, and the calculator.
pub use qd_calc as calc;

/// The types most callers need.
pub mod prelude {
    pub use qd_calc::{
        CalculatorConfig, CycleHistory, CycleProfile, Gender, ObligationCalculator, Obligations,
        Person, PersonPatch, PostpartumEvent,
    };
    pub use qd_core::{Error, PersonId, Result};
    pub use qd_ledger::{Category, CounterBook, Ledger, ObligationCounter, PrayerKind, ResetScope};
    pub use qd_time::{Date, DateRange};
}
