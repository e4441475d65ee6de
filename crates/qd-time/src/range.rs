//! `DateRange`: a half-open `[start, end)` span of calendar days.
//!
//! Ranges are allowed to be empty or inverted; such ranges simply contain no
//! days.  Every day count derived from a range is therefore non-negative.

use crate::date::Date;

/// A half-open interval of dates, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DateRange {
    /// First day inside the range.
    pub start: Date,
    /// First day after the range.
    pub end: Date,
}

impl DateRange {
    /// Create a range.  `end <= start` yields an empty range, not an error.
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Number of days in the range (0 if empty or inverted).
    pub fn days(&self) -> u32 {
        (self.end - self.start).max(0) as u32
    }

    /// Return `true` if the range contains no days.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Return `true` if `date` lies in `[start, end)`.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }

    /// Intersection with `other`, or `None` if they share no day.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let clipped = DateRange::new(self.start.max(other.start), self.end.min(other.end));
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Number of days shared with `other`.
    pub fn overlap_days(&self, other: &DateRange) -> u32 {
        self.intersect(other).map_or(0, |r| r.days())
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn inverted_range_is_empty() {
        let r = DateRange::new(date(2020, 2, 1), date(2020, 1, 1));
        assert!(r.is_empty());
        assert_eq!(r.days(), 0);
        assert!(!r.contains(date(2020, 1, 15)));
    }

    #[test]
    fn intersection() {
        let a = DateRange::new(date(2020, 1, 1), date(2020, 3, 1));
        let b = DateRange::new(date(2020, 2, 1), date(2020, 4, 1));
        let c = a.intersect(&b).unwrap();
        assert_eq!(c, DateRange::new(date(2020, 2, 1), date(2020, 3, 1)));
        assert_eq!(a.overlap_days(&b), 29);

        let touching = DateRange::new(date(2020, 3, 1), date(2020, 3, 5));
        assert_eq!(a.intersect(&touching), None);
        assert_eq!(a.overlap_days(&touching), 0);
    }

    #[test]
    fn display_is_half_open() {
        let r = DateRange::new(date(2019, 1, 1), date(2019, 12, 1));
        assert_eq!(r.to_string(), "[2019-01-01, 2019-12-01)");
    }
}
