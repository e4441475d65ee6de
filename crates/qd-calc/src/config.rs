//! Calculator configuration.
//!
//! Every tunable constant of the calculation lives in [`CalculatorConfig`],
//! which is passed to [`ObligationCalculator::new`](crate::ObligationCalculator::new)
//! explicitly.  Tests can therefore run the same inputs against different
//! bounds without touching shared state.

use qd_core::ensure;
use qd_core::errors::Result;
use qd_time::Date;

use crate::person::Gender;

/// Constants consumed by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Age (years) at which a man's obligations begin.
    pub majority_age_male: u8,
    /// Age (years) at which a woman's obligations begin.
    pub majority_age_female: u8,
    /// Smallest accepted average cycle duration (days).
    pub min_cycle_days: u32,
    /// Largest accepted average cycle duration (days); also caps the
    /// per-month exemption.
    pub max_cycle_days: u32,
    /// Largest accepted postpartum duration (days).
    pub max_postpartum_days: u32,
    /// Length of the approximate month one cycle is counted against.
    pub approx_month_days: u32,
    /// Start of the fasting month in a known year; every other year's month
    /// is derived from it.
    pub lunar_reference: Date,
    /// Length of the approximate fasting month (days).
    pub lunar_month_days: u32,
    /// Days the fasting month moves earlier each solar year.
    pub lunar_annual_shift_days: u32,
}

impl CalculatorConfig {
    /// Fasting month start of 2023 (Gregorian 23 March).
    pub const DEFAULT_LUNAR_REFERENCE: Date = Date::from_ymd_const(2023, 3, 23);

    /// Age of majority for `gender`.
    pub fn majority_age(&self, gender: Gender) -> u8 {
        match gender {
            Gender::Male => self.majority_age_male,
            Gender::Female => self.majority_age_female,
        }
    }

    /// Set the majority ages.
    pub fn with_majority_ages(mut self, male: u8, female: u8) -> Self {
        self.majority_age_male = male;
        self.majority_age_female = female;
        self
    }

    /// Set the accepted cycle duration bounds.
    pub fn with_cycle_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_cycle_days = min;
        self.max_cycle_days = max;
        self
    }

    /// Set the longest accepted postpartum duration.
    pub fn with_max_postpartum_days(mut self, days: u32) -> Self {
        self.max_postpartum_days = days;
        self
    }

    /// Set the lunar calibration date.
    pub fn with_lunar_reference(mut self, reference: Date) -> Self {
        self.lunar_reference = reference;
        self
    }

    /// Set the fasting month length and its yearly shift.
    pub fn with_lunar_month(mut self, month_days: u32, annual_shift_days: u32) -> Self {
        self.lunar_month_days = month_days;
        self.lunar_annual_shift_days = annual_shift_days;
        self
    }

    /// Reject inconsistent settings.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.majority_age_male > 0 && self.majority_age_female > 0,
            "majority_age",
            "ages of majority must be positive"
        );
        ensure!(
            self.min_cycle_days > 0 && self.min_cycle_days <= self.max_cycle_days,
            "cycle_bounds",
            "expected 0 < min <= max, got [{}, {}]",
            self.min_cycle_days,
            self.max_cycle_days
        );
        ensure!(
            self.approx_month_days > 0,
            "approx_month_days",
            "must be positive"
        );
        ensure!(
            self.lunar_month_days > 0 && self.lunar_month_days <= 366,
            "lunar_month_days",
            "must be between 1 and 366, got {}",
            self.lunar_month_days
        );
        ensure!(
            self.lunar_annual_shift_days < 365,
            "lunar_annual_shift_days",
            "must be less than a year, got {}",
            self.lunar_annual_shift_days
        );
        ensure!(
            !self.lunar_reference.is_null(),
            "lunar_reference",
            "reference date is not set"
        );
        Ok(())
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            majority_age_male: 12,
            majority_age_female: 9,
            min_cycle_days: 3,
            max_cycle_days: 10,
            max_postpartum_days: 40,
            approx_month_days: 30,
            lunar_reference: Self::DEFAULT_LUNAR_REFERENCE,
            lunar_month_days: 30,
            lunar_annual_shift_days: 11,
        }
    }
}
