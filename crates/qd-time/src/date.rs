//! `Date` type.
//!
//! Dates are stored as a serial number of days so that day differencing and
//! interval arithmetic are plain integer operations.
//!
//! # Serial number convention
//! * Serial 0 is used as the "null date" sentinel.
//! * Serial 1 = January 1, 1900.
//! * The valid date range is 1900-01-01 to 2199-12-31.
//!
//! Text input from the onboarding dialogue is parsed with `chrono`, and dates
//! convert to and from [`chrono::NaiveDate`] for hosts that already use it.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use qd_core::errors::{Error, Result};

use crate::time_unit::TimeUnit;

/// A calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Date(i32);

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// The null date sentinel (serial 0).
    pub const NULL: Date = Date(0);

    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    /// Text formats accepted by [`FromStr`].
    const INPUT_FORMATS: [&'static str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    ///
    /// Returns an error if `serial <= 0` (which would be the null sentinel or
    /// before the epoch) or out of range.
    pub fn from_serial(serial: i32) -> Result<Self> {
        if serial <= 0 {
            return Err(Error::Date("serial number must be positive".into()));
        }
        let d = Date(serial);
        if d > Self::MAX {
            return Err(Error::Date(format!("serial {serial} exceeds maximum date")));
        }
        Ok(d)
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1900..=2199).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [1900, 2199]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    /// Build a date in a `const` context.
    ///
    /// # Panics
    /// Panics (at compile time when used in a constant) if the date is
    /// invalid.  Use [`Date::from_ymd`] for runtime input.
    pub const fn from_ymd_const(year: u16, month: u8, day: u8) -> Self {
        assert!(year >= 1900 && year <= 2199, "year out of range");
        assert!(month >= 1 && month <= 12, "month out of range");
        assert!(
            day >= 1 && day <= days_in_month(year, month),
            "day out of range"
        );
        Date(serial_from_ymd(year, month, day))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return `true` if this is the null date sentinel.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return `(year, month, day)` in one decomposition.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.0)
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self.0.checked_add(n).unwrap_or(0);
        if serial <= 0 || Date(serial) > Self::MAX {
            return Err(Error::Date(format!(
                "date arithmetic: {self} + {n} days is out of range"
            )));
        }
        Ok(Date(serial))
    }

    /// Advance by `n` days, clamping the result to [`Date::MIN`]..=[`Date::MAX`].
    pub fn saturating_add_days(self, n: i32) -> Self {
        let serial = self.0.saturating_add(n);
        Date(serial.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Advance by a period expressed in the given time unit.
    ///
    /// Month and year steps clamp to the end of the target month, so
    /// 29 February plus one year is 28 February.
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Days => self.add_days(n),
            TimeUnit::Weeks => self.add_days(n * 7),
            TimeUnit::Months => {
                let (y, m, d) = ymd_from_serial(self.0);
                let total_months = m as i32 + n;
                // Normalise months to 1–12
                let full_years = total_months.div_euclid(12);
                let rem_months = total_months.rem_euclid(12);
                let (new_m, extra_y) = if rem_months == 0 {
                    (12u8, full_years - 1)
                } else {
                    (rem_months as u8, full_years)
                };
                let new_y = y as i32 + extra_y;
                if !(1900..=2199).contains(&new_y) {
                    return Err(Error::Date(format!("year {new_y} out of range")));
                }
                let new_y = new_y as u16;
                let new_d = d.min(days_in_month(new_y, new_m));
                Ok(Date(serial_from_ymd(new_y, new_m, new_d)))
            }
            TimeUnit::Years => self.advance(n * 12, TimeUnit::Months),
        }
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        *self = self.add_days(rhs).expect("date addition overflow");
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl TryFrom<NaiveDate> for Date {
    type Error = Error;

    fn try_from(d: NaiveDate) -> Result<Self> {
        let year = u16::try_from(d.year())
            .map_err(|_| Error::Date(format!("year {} out of range [1900, 2199]", d.year())))?;
        Date::from_ymd(year, d.month() as u8, d.day() as u8)
    }
}

impl From<Date> for NaiveDate {
    fn from(d: Date) -> Self {
        let (y, m, day) = ymd_from_serial(d.0);
        // Every valid serial maps onto a real calendar day.
        NaiveDate::from_ymd_opt(y as i32, m as u32, day as u32).unwrap_or_default()
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parse `YYYY-MM-DD`, `DD.MM.YYYY`, or `DD/MM/YYYY`.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        Self::INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
            .ok_or_else(|| Error::Date(format!("cannot parse {text:?} as a date")))
            .and_then(Date::try_from)
    }
}

impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "null date");
        }
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "Date(null)");
        }
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month >= 1 && month <= 12);
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    }
}

/// Convert (year, month, day) to a serial number.
///
/// Serial 1 = 1900-01-01.
const fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let y = year as i32;
    let m = month as i32;
    let d = day as i32;

    // Days in years 1900..year
    let mut serial = (y - 1900) * 365;
    // Leap years in [1900, year); 1900 itself is not a leap year
    serial += (y - 1901) / 4 - (y - 1901) / 100 + (y - 1601) / 400;
    // Days in months 1..m for the current year
    serial += MONTH_OFFSET[m as usize - 1] as i32;
    if m > 2 && is_leap_year(year) {
        serial += 1;
    }
    serial += d;
    serial
}

/// Decompose a serial number into (year, month, day).
fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    // Estimate year
    let mut y = (serial / 365 + 1900) as u16;
    // Adjust until serial falls within the year
    loop {
        let start_of_year = serial_from_ymd(y, 1, 1);
        if serial < start_of_year {
            y -= 1;
        } else if serial >= serial_from_ymd(y + 1, 1, 1) {
            y += 1;
        } else {
            break;
        }
    }
    let start_of_year = serial_from_ymd(y, 1, 1);
    let doy = serial - start_of_year + 1; // 1-based
    let mut m = 1u8;
    let mut remaining = doy;
    loop {
        let days = days_in_month(y, m) as i32;
        if remaining <= days {
            break;
        }
        remaining -= days;
        m += 1;
    }
    (y, m, remaining as u8)
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// ── Tests ─────────────────────────────────────────────────────────────────────
