//! A single owed / fulfilled counter.

/// Owed and fulfilled counts for one category.
///
/// `remaining` is derived on every read and never stored, so the two stored
/// fields cannot drift apart from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ObligationCounter {
    total_owed: u32,
    fulfilled: u32,
}

impl ObligationCounter {
    /// Create a counter with the given owed count and nothing fulfilled.
    pub fn new(total_owed: u32) -> Self {
        Self {
            total_owed,
            fulfilled: 0,
        }
    }

    /// Number of units owed.
    pub fn total_owed(&self) -> u32 {
        self.total_owed
    }

    /// Number of units marked as fulfilled.
    pub fn fulfilled(&self) -> u32 {
        self.fulfilled
    }

    /// `max(0, total_owed - fulfilled)`.
    pub fn remaining(&self) -> u32 {
        self.total_owed.saturating_sub(self.fulfilled)
    }

    /// Return `true` once nothing remains.
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    pub(crate) fn set_owed(&mut self, owed: u32) {
        self.total_owed = owed;
    }

    /// Apply `delta` to `fulfilled`, saturating at zero (and at `u32::MAX`).
    pub(crate) fn shift_fulfilled(&mut self, delta: i64) {
        self.fulfilled = saturate(i64::from(self.fulfilled).saturating_add(delta));
    }
}

fn saturate(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_never_negative() {
        let mut c = ObligationCounter::new(3);
        c.shift_fulfilled(5);
        assert_eq!(c.fulfilled(), 5);
        assert_eq!(c.remaining(), 0);
        assert!(c.is_complete());
    }

    #[test]
    fn fulfilled_saturates() {
        let mut c = ObligationCounter::new(10);
        c.shift_fulfilled(5);
        c.shift_fulfilled(-1000);
        assert_eq!(c.fulfilled(), 0);
        assert_eq!(c.remaining(), 10);
        c.shift_fulfilled(i64::MAX);
        assert_eq!(c.fulfilled(), u32::MAX);
    }
}
