//! Fixed-length approximation of the yearly lunar fasting month.
//!
//! The fasting month of year `y` is taken to be a block of
//! `lunar_month_days` days starting at the reference month/day placed in
//! year `y`, moved `lunar_annual_shift_days` earlier for each year after the
//! reference year (later for each year before it).  No moon sighting or
//! astronomical calendar is involved, and owed counts depend on this exact
//! rule, so it must not be replaced by a "more accurate" calendar.
//!
//! Far from the reference year the block drifts across the Gregorian year
//! boundary (the block labelled 2031 begins in December 2030).  Blocks stay
//! keyed by the year they were computed for, which keeps keys unique.
//!
//! Only blocks that fall wholly inside the supported date range
//! (1900-01-01 to 2199-12-31) exist.  Blocks keyed before 1900 would fall
//! in 1900 to 1903, so those years have no fasting block.

use qd_core::errors::{Error, Result};
use qd_time::{Date, DateRange, TimeUnit};

use crate::config::CalculatorConfig;

/// Generator of approximate fasting-month blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarCalendar {
    reference: Date,
    month_days: u32,
    annual_shift_days: u32,
}

impl LunarCalendar {
    /// Create a calendar anchored at `reference`.
    pub fn new(reference: Date, month_days: u32, annual_shift_days: u32) -> Self {
        Self {
            reference,
            month_days,
            annual_shift_days,
        }
    }

    /// Calendar described by `config`.
    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::new(
            config.lunar_reference,
            config.lunar_month_days,
            config.lunar_annual_shift_days,
        )
    }

    /// Length of every block.
    pub fn month_days(&self) -> u32 {
        self.month_days
    }

    /// The unclipped block for `year`.
    ///
    /// # Errors
    /// [`Error::Date`] if the block falls outside the supported date range
    /// or the month length and shift are too large to place it.
    pub fn fasting_block(&self, year: u16) -> Result<DateRange> {
        let distance = i32::from(year) - i32::from(self.reference.year());
        let shift = i32::try_from(self.annual_shift_days)
            .ok()
            .and_then(|days| days.checked_mul(distance))
            .ok_or_else(|| {
                Error::Date(format!(
                    "annual shift of {} days cannot be applied to {year}",
                    self.annual_shift_days
                ))
            })?;
        let month_days = i32::try_from(self.month_days)
            .map_err(|_| Error::Date(format!("month of {} days is too long", self.month_days)))?;
        let start = self
            .reference
            .advance(distance, TimeUnit::Years)?
            .add_days(-shift)?;
        let end = start.add_days(month_days)?;
        Ok(DateRange::new(start, end))
    }

    /// Every block intersecting `range`, clipped to it, in ascending order.
    ///
    /// Years whose block cannot be placed inside the supported date range
    /// are skipped.
    pub fn blocks_overlapping(&self, range: DateRange) -> Vec<(u16, DateRange)> {
        let mut out = Vec::new();
        if range.is_empty() {
            return out;
        }

        // Drift can put an earlier year's block inside this Gregorian year.
        let mut year = range.start.year();
        while let Some(prev) = year.checked_sub(1) {
            match self.fasting_block(prev) {
                Ok(block) if block.end > range.start => year = prev,
                _ => break,
            }
        }

        while let Ok(block) = self.fasting_block(year) {
            if block.start >= range.end {
                break;
            }
            if let Some(clipped) = block.intersect(&range) {
                out.push((year, clipped));
            }
            match year.checked_add(1) {
                Some(next) => year = next,
                None => break,
            }
        }
        out
    }
}
