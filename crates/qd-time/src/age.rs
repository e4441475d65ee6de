//! Age computation.
//!
//! An [`Age`] is a calendar-aware years/months/days difference.  Day
//! underflow borrows the length of the month preceding the later date, and
//! month underflow borrows a year, so leap years and uneven month lengths
//! come out right.
//!
//! The age of religious majority is reached on the birthday that completes
//! the configured number of years ([`majority_date`]).

use qd_core::errors::{Error, Result};

use crate::date::{days_in_month, Date};
use crate::time_unit::TimeUnit;

/// A person's age as whole years, months, and days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age {
    /// Completed years.
    pub years: u32,
    /// Completed months beyond `years` (0–11).
    pub months: u32,
    /// Days beyond `months` (0–30).
    pub days: u32,
}

impl Age {
    /// Age on `on` of someone born on `birth`.
    ///
    /// Returns an error if `on` precedes `birth`.
    pub fn between(birth: Date, on: Date) -> Result<Self> {
        if on < birth {
            return Err(Error::validation(
                "birth_date",
                format!("{birth} is after {on}"),
            ));
        }
        let (by, bm, bd) = birth.ymd();
        let (ty, tm, td) = on.ymd();
        let mut years = ty as i32 - by as i32;
        let mut months = tm as i32 - bm as i32;
        let mut days = td as i32 - bd as i32;

        if days < 0 {
            months -= 1;
            let (prev_year, prev_month) = if tm == 1 { (ty - 1, 12) } else { (ty, tm - 1) };
            days += days_in_month(prev_year, prev_month) as i32;
        }
        if months < 0 {
            years -= 1;
            months += 12;
        }

        Ok(Age {
            years: years as u32,
            months: months as u32,
            days: days as u32,
        })
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Completed years on `on` of someone born on `birth`.
pub fn age_in_years(birth: Date, on: Date) -> Result<u32> {
    Age::between(birth, on).map(|a| a.years)
}

/// The date on which someone born on `birth` completes `years` years.
///
/// A 29 February birthday reaches majority on 28 February of non-leap years.
pub fn majority_date(birth: Date, years: u8) -> Result<Date> {
    birth.advance(i32::from(years), TimeUnit::Years)
}
