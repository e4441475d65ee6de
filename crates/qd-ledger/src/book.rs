//! The per-person counter aggregate.
//!
//! `CounterBook` is an ordered map from [`Category`] to
//! [`ObligationCounter`].  A category that has never been written reads as
//! a zero counter, and the `add_*` operations create it on first use.

use std::collections::BTreeMap;

use qd_core::errors::{Error, Result};
use qd_core::Delta;
use tracing::warn;

use crate::category::{Category, PrayerKind};
use crate::counter::ObligationCounter;

/// Which rows a [`CounterBook::reset`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResetScope {
    /// A single category.
    Category(Category),
    /// Every prayer category.
    Prayers,
    /// Every fasting-year category.
    Fasts,
    /// Everything (the user-initiated wipe).
    All,
}

impl ResetScope {
    fn covers(&self, category: &Category) -> bool {
        match self {
            ResetScope::Category(c) => c == category,
            ResetScope::Prayers => category.is_prayer(),
            ResetScope::Fasts => category.is_fast(),
            ResetScope::All => true,
        }
    }
}

/// One person's obligation counters.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CounterBook {
    rows: BTreeMap<Category, ObligationCounter>,
}

impl std::iter::FromIterator<(Category, ObligationCounter)> for CounterBook {
    fn from_iter<I: IntoIterator<Item = (Category, ObligationCounter)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl CounterBook {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row is stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a row exists for `category`.
    pub fn contains(&self, category: &Category) -> bool {
        self.rows.contains_key(category)
    }

    /// The counter for `category`; a zero counter if no row exists.
    pub fn get(&self, category: &Category) -> ObligationCounter {
        self.rows.get(category).copied().unwrap_or_default()
    }

    /// Shorthand for `get(&Category::Prayer(kind))`.
    pub fn prayer(&self, kind: PrayerKind) -> ObligationCounter {
        self.get(&Category::Prayer(kind))
    }

    /// Iterate over stored rows in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &ObligationCounter)> {
        self.rows.iter()
    }

    /// Fasting years with a stored row, ascending.
    pub fn fast_years(&self) -> Vec<u16> {
        self.rows
            .keys()
            .filter_map(|c| match c {
                Category::Fast { year } => Some(*year),
                Category::Prayer(_) => None,
            })
            .collect()
    }

    // ── Summaries ────────────────────────────────────────────────────────

    /// Sum of `remaining` over every row.
    pub fn total_remaining(&self) -> u64 {
        self.remaining_where(|_| true)
    }

    /// Sum of `remaining` over prayer rows.
    pub fn prayer_remaining(&self) -> u64 {
        self.remaining_where(Category::is_prayer)
    }

    /// Sum of `remaining` over fasting rows.
    pub fn fast_remaining(&self) -> u64 {
        self.remaining_where(Category::is_fast)
    }

    fn remaining_where(&self, pred: impl Fn(&Category) -> bool) -> u64 {
        self.rows
            .iter()
            .filter(|(c, _)| pred(*c))
            .map(|(_, counter)| u64::from(counter.remaining()))
            .sum()
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Create the row or overwrite its `total_owed`, keeping `fulfilled`.
    ///
    /// Re-running a calculation must not erase progress already marked.
    pub fn initialize(&mut self, category: Category, owed: u32) -> ObligationCounter {
        let row = self.rows.entry(category).or_default();
        row.set_owed(owed);
        *row
    }

    /// Create a zero row if none exists; an existing row is left untouched.
    pub fn ensure(&mut self, category: Category) -> ObligationCounter {
        *self.rows.entry(category).or_default()
    }

    /// Apply a signed `delta` to `fulfilled`, saturating at zero.
    ///
    /// Never fails: an oversized decrement leaves `fulfilled` at 0.
    pub fn add_fulfilled(&mut self, category: Category, delta: Delta) -> ObligationCounter {
        let row = self.rows.entry(category).or_default();
        row.shift_fulfilled(delta);
        *row
    }

    /// Apply a signed `delta` to `total_owed`.
    ///
    /// # Errors
    /// [`Error::Conflict`] if the new total would be smaller than
    /// `fulfilled`; [`Error::OutOfRange`] if it would overflow.  The row is
    /// unchanged on error.
    pub fn add_owed(&mut self, category: Category, delta: Delta) -> Result<ObligationCounter> {
        let current = self.get(&category);
        let owed = i64::from(current.total_owed()).saturating_add(delta);
        if owed < i64::from(current.fulfilled()) {
            warn!(
                %category,
                owed = current.total_owed(),
                fulfilled = current.fulfilled(),
                delta,
                "rejected owed adjustment below fulfilled"
            );
            return Err(Error::Conflict {
                category: category.to_string(),
                total_owed: current.total_owed(),
                fulfilled: current.fulfilled(),
                delta,
            });
        }
        let owed = u32::try_from(owed)
            .map_err(|_| Error::out_of_range("total_owed", owed, 0, u32::MAX))?;
        Ok(self.initialize(category, owed))
    }

    /// Remove the rows covered by `scope`, returning how many were removed.
    pub fn reset(&mut self, scope: ResetScope) -> usize {
        let before = self.rows.len();
        self.rows.retain(|c, _| !scope.covers(c));
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAJR: Category = Category::Prayer(PrayerKind::Fajr);

    #[test]
    fn missing_rows_read_as_zero() {
        let book = CounterBook::new();
        assert_eq!(book.get(&FAJR), ObligationCounter::default());
        assert!(!book.contains(&FAJR));
    }

    #[test]
    fn initialize_preserves_fulfilled() {
        let mut book = CounterBook::new();
        book.initialize(FAJR, 100);
        book.add_fulfilled(FAJR, 30);
        let row = book.initialize(FAJR, 120);
        assert_eq!(row.total_owed(), 120);
        assert_eq!(row.fulfilled(), 30);
        assert_eq!(row.remaining(), 90);
    }

    #[test]
    fn ensure_does_not_overwrite() {
        let mut book = CounterBook::new();
        book.add_owed(Category::Prayer(PrayerKind::AsrTravel), 4).unwrap();
        let row = book.ensure(Category::Prayer(PrayerKind::AsrTravel));
        assert_eq!(row.total_owed(), 4);
        assert_eq!(book.ensure(FAJR), ObligationCounter::default());
        assert!(book.contains(&FAJR));
    }

    #[test]
    fn owed_overflow_is_out_of_range() {
        let mut book = CounterBook::new();
        book.initialize(FAJR, u32::MAX);
        let err = book.add_owed(FAJR, 1).unwrap_err();
        assert_eq!(err.field(), Some("total_owed"));
        assert_eq!(book.get(&FAJR).total_owed(), u32::MAX);
    }

    #[test]
    fn scoped_reset() {
        let mut book = CounterBook::new();
        book.initialize(FAJR, 1);
        book.initialize(Category::Prayer(PrayerKind::Isha), 1);
        book.initialize(Category::Fast { year: 2019 }, 30);
        book.initialize(Category::Fast { year: 2020 }, 30);

        assert_eq!(book.reset(ResetScope::Category(FAJR)), 1);
        assert_eq!(book.reset(ResetScope::Category(FAJR)), 0);
        assert_eq!(book.reset(ResetScope::Fasts), 2);
        assert_eq!(book.fast_years(), Vec::<u16>::new());
        assert_eq!(book.reset(ResetScope::All), 1);
        assert!(book.is_empty());
    }
}
