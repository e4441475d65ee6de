//! Person record and typed partial updates.
//!
//! A [`Person`] carries the biographical dates the obligation ranges are
//! derived from.  Edits arrive as a [`PersonPatch`]: a fixed set of optional
//! fields that is validated against the whole patched record before any of
//! it is committed.

use qd_core::ensure;
use qd_core::errors::Result;
use qd_time::{majority_date, Date, DateRange};

use crate::config::CalculatorConfig;

/// Biological sex, which selects the age of majority and whether cycle
/// exemptions apply.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Gender {
    /// Return `true` if cycle and postpartum exemptions apply.
    pub fn has_exemptions(&self) -> bool {
        matches!(self, Gender::Female)
    }
}

/// Biographical dates of the person whose obligations are computed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Person {
    birth_date: Date,
    gender: Gender,
    prayer_start: Date,
    fasting_start: Option<Date>,
}

impl Person {
    /// Create a person record.
    ///
    /// `prayer_start` is the date regular observance began; obligations are
    /// owed from the age of majority up to that date.
    pub fn new(birth_date: Date, gender: Gender, prayer_start: Date) -> Result<Self> {
        let person = Self {
            birth_date,
            gender,
            prayer_start,
            fasting_start: None,
        };
        person.validate()?;
        Ok(person)
    }

    /// Use a separate start-of-observance date for fasting.
    pub fn with_fasting_start(self, fasting_start: Date) -> Result<Self> {
        let person = Self {
            fasting_start: Some(fasting_start),
            ..self
        };
        person.validate()?;
        Ok(person)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.prayer_start >= self.birth_date,
            "prayer_start",
            "{} is before the birth date {}",
            self.prayer_start,
            self.birth_date
        );
        if let Some(fasting_start) = self.fasting_start {
            ensure!(
                fasting_start >= self.birth_date,
                "fasting_start",
                "{} is before the birth date {}",
                fasting_start,
                self.birth_date
            );
        }
        Ok(())
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Date of birth.
    pub fn birth_date(&self) -> Date {
        self.birth_date
    }

    /// Gender.
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Start of regular prayer.
    pub fn prayer_start(&self) -> Date {
        self.prayer_start
    }

    /// Start of regular fasting (defaults to the prayer start).
    pub fn fasting_start(&self) -> Date {
        self.fasting_start.unwrap_or(self.prayer_start)
    }

    // ── Derived ranges ───────────────────────────────────────────────────

    /// The day obligations begin.
    pub fn majority_date(&self, config: &CalculatorConfig) -> Result<Date> {
        majority_date(self.birth_date, config.majority_age(self.gender))
    }

    /// Range over which prayers are owed; empty if observance began before
    /// majority.
    pub fn prayer_range(&self, config: &CalculatorConfig) -> Result<DateRange> {
        Ok(DateRange::new(self.majority_date(config)?, self.prayer_start))
    }

    /// Range over which fasting is owed.
    pub fn fasting_range(&self, config: &CalculatorConfig) -> Result<DateRange> {
        Ok(DateRange::new(self.majority_date(config)?, self.fasting_start()))
    }

    // ── Updates ──────────────────────────────────────────────────────────

    /// Apply `patch` atomically: either every patched field changes or, if
    /// the result would be invalid, none does.
    pub fn apply(&mut self, patch: &PersonPatch) -> Result<()> {
        let candidate = Person {
            birth_date: patch.birth_date.unwrap_or(self.birth_date),
            gender: patch.gender.unwrap_or(self.gender),
            prayer_start: patch.prayer_start.unwrap_or(self.prayer_start),
            fasting_start: patch.fasting_start.unwrap_or(self.fasting_start),
        };
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }
}

/// A set of field updates for a [`Person`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    birth_date: Option<Date>,
    gender: Option<Gender>,
    prayer_start: Option<Date>,
    fasting_start: Option<Option<Date>>,
}

impl PersonPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the birth date.
    pub fn birth_date(mut self, date: Date) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Change the gender.
    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Change the prayer observance start.
    pub fn prayer_start(mut self, date: Date) -> Self {
        self.prayer_start = Some(date);
        self
    }

    /// Set a separate fasting observance start.
    pub fn fasting_start(mut self, date: Date) -> Self {
        self.fasting_start = Some(Some(date));
        self
    }

    /// Make fasting follow the prayer start again.
    pub fn clear_fasting_start(mut self) -> Self {
        self.fasting_start = Some(None);
        self
    }

    /// Return `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
