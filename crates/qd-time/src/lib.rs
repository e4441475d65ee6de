//! # qd-time
//!
//! Date, date-range, and age utilities.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Age computation and age-of-majority dates.
pub mod age;

/// `Date` type.
pub mod date;

/// `DateRange`: a half-open interval of dates.
pub mod range;

/// `TimeUnit`: days, weeks, months, years.
pub mod time_unit;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use age::{age_in_years, majority_date, Age};
pub use date::Date;
pub use range::DateRange;
pub use time_unit::TimeUnit;
