//! Thread-safe keyed store of counter books.
//!
//! [`Ledger`] is the in-process stand-in for the keyed record store.  Each
//! operation locks the store, reads the person's book, mutates it, and writes
//! it back before releasing the lock, so two racing taps on the same
//! category can never lose an update.
//!
//! [`Ledger::transaction`] runs a closure against a copy of the book and
//! commits only if it succeeds; a whole calculate-then-persist unit goes
//! through it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use qd_core::errors::Result;
use qd_core::{Delta, PersonId};
use tracing::{debug, info};

use crate::book::{CounterBook, ResetScope};
use crate::category::Category;
use crate::counter::ObligationCounter;

/// Counter books keyed by person.
#[derive(Debug, Default)]
pub struct Ledger {
    books: Mutex<HashMap<PersonId, CounterBook>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // Every book mutation leaves a consistent book, so a poisoned lock still
    // guards valid data.
    fn lock(&self) -> MutexGuard<'_, HashMap<PersonId, CounterBook>> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the person's book, or `None` if nothing is stored.
    pub fn snapshot(&self, person: PersonId) -> Option<CounterBook> {
        self.lock().get(&person).cloned()
    }

    /// The person's counter for `category` (zero if absent).
    pub fn counter(&self, person: PersonId, category: Category) -> ObligationCounter {
        self.lock()
            .get(&person)
            .map(|book| book.get(&category))
            .unwrap_or_default()
    }

    /// Number of people with a stored book.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no book is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// See [`CounterBook::initialize`].
    pub fn initialize(&self, person: PersonId, category: Category, owed: u32) -> ObligationCounter {
        self.lock()
            .entry(person)
            .or_default()
            .initialize(category, owed)
    }

    /// See [`CounterBook::add_fulfilled`].
    pub fn add_fulfilled(
        &self,
        person: PersonId,
        category: Category,
        delta: Delta,
    ) -> ObligationCounter {
        let row = self
            .lock()
            .entry(person)
            .or_default()
            .add_fulfilled(category, delta);
        debug!(%person, %category, delta, remaining = row.remaining(), "fulfilled adjusted");
        row
    }

    /// See [`CounterBook::add_owed`].
    pub fn add_owed(
        &self,
        person: PersonId,
        category: Category,
        delta: Delta,
    ) -> Result<ObligationCounter> {
        let row = self
            .lock()
            .entry(person)
            .or_default()
            .add_owed(category, delta)?;
        debug!(%person, %category, delta, owed = row.total_owed(), "owed adjusted");
        Ok(row)
    }

    /// See [`CounterBook::reset`].  A full reset drops the person's book.
    pub fn reset(&self, person: PersonId, scope: ResetScope) -> usize {
        let mut books = self.lock();
        let removed = match scope {
            ResetScope::All => books.remove(&person).map_or(0, |book| book.len()),
            _ => books
                .get_mut(&person)
                .map_or(0, |book| book.reset(scope)),
        };
        info!(%person, ?scope, removed, "counters reset");
        removed
    }

    /// Run `f` on a copy of the person's book and store the copy only if `f`
    /// succeeds.  The lock is held throughout, so the unit is atomic.
    pub fn transaction<R>(
        &self,
        person: PersonId,
        f: impl FnOnce(&mut CounterBook) -> Result<R>,
    ) -> Result<R> {
        let mut books = self.lock();
        let mut draft = books.get(&person).cloned().unwrap_or_default();
        let out = f(&mut draft)?;
        books.insert(person, draft);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::PrayerKind;

    const ALICE: PersonId = PersonId(1);
    const FAJR: Category = Category::Prayer(PrayerKind::Fajr);

    #[test]
    fn failed_transaction_leaves_state_unchanged() {
        let ledger = Ledger::new();
        ledger.initialize(ALICE, FAJR, 10);
        ledger.add_fulfilled(ALICE, FAJR, 10);

        let result = ledger.transaction(ALICE, |book| {
            book.initialize(Category::Fast { year: 2020 }, 30);
            book.add_owed(FAJR, -1)
        });
        assert!(result.unwrap_err().is_conflict());

        let book = ledger.snapshot(ALICE).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(&FAJR).total_owed(), 10);
    }

    #[test]
    fn full_reset_drops_the_book() {
        let ledger = Ledger::new();
        ledger.initialize(ALICE, FAJR, 10);
        ledger.initialize(ALICE, Category::Fast { year: 2020 }, 30);
        assert_eq!(ledger.reset(ALICE, ResetScope::All), 2);
        assert!(ledger.snapshot(ALICE).is_none());
        assert!(ledger.is_empty());
        assert_eq!(ledger.reset(PersonId(99), ResetScope::Prayers), 0);
    }
}
