//! Prayer kinds and obligation categories.

use std::str::FromStr;

use qd_core::errors::{Error, Result};
use qd_core::fail;

/// A kind of prayer that can be owed.
///
/// The first six are the five daily prayers plus the night (witr) prayer;
/// they accrue from date ranges.  The travel-shortened variants are never
/// derived from dates and only grow through manual entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PrayerKind {
    /// Dawn prayer.
    Fajr,
    /// Noon prayer.
    Dhuhr,
    /// Afternoon prayer.
    Asr,
    /// Sunset prayer.
    Maghrib,
    /// Night prayer.
    Isha,
    /// Supplementary night prayer.
    Witr,
    /// Noon prayer, shortened while travelling.
    DhuhrTravel,
    /// Afternoon prayer, shortened while travelling.
    AsrTravel,
    /// Night prayer, shortened while travelling.
    IshaTravel,
}

impl PrayerKind {
    /// Every prayer kind, daily ones first.
    pub const ALL: [PrayerKind; 9] = [
        PrayerKind::Fajr,
        PrayerKind::Dhuhr,
        PrayerKind::Asr,
        PrayerKind::Maghrib,
        PrayerKind::Isha,
        PrayerKind::Witr,
        PrayerKind::DhuhrTravel,
        PrayerKind::AsrTravel,
        PrayerKind::IshaTravel,
    ];

    /// The prayers owed for every non-exempt day.
    pub const DAILY: [PrayerKind; 6] = [
        PrayerKind::Fajr,
        PrayerKind::Dhuhr,
        PrayerKind::Asr,
        PrayerKind::Maghrib,
        PrayerKind::Isha,
        PrayerKind::Witr,
    ];

    /// The travel-shortened variants.
    pub const TRAVEL: [PrayerKind; 3] = [
        PrayerKind::DhuhrTravel,
        PrayerKind::AsrTravel,
        PrayerKind::IshaTravel,
    ];

    /// Return `true` for a travel-shortened variant.
    pub fn is_travel(&self) -> bool {
        matches!(
            self,
            PrayerKind::DhuhrTravel | PrayerKind::AsrTravel | PrayerKind::IshaTravel
        )
    }

    /// The regular prayer a travel variant shortens (identity otherwise).
    pub fn base(&self) -> PrayerKind {
        match self {
            PrayerKind::DhuhrTravel => PrayerKind::Dhuhr,
            PrayerKind::AsrTravel => PrayerKind::Asr,
            PrayerKind::IshaTravel => PrayerKind::Isha,
            other => *other,
        }
    }

    /// Stable lowercase key.
    pub fn key(&self) -> &'static str {
        match self {
            PrayerKind::Fajr => "fajr",
            PrayerKind::Dhuhr => "dhuhr",
            PrayerKind::Asr => "asr",
            PrayerKind::Maghrib => "maghrib",
            PrayerKind::Isha => "isha",
            PrayerKind::Witr => "witr",
            PrayerKind::DhuhrTravel => "dhuhr_travel",
            PrayerKind::AsrTravel => "asr_travel",
            PrayerKind::IshaTravel => "isha_travel",
        }
    }
}

impl std::fmt::Display for PrayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PrayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PrayerKind::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| Error::validation("prayer", format!("unknown prayer kind {s:?}")))
    }
}

/// One obligation category tracked for a person.
///
/// Categories order prayers before fasting years, fasting years ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// A prayer kind.
    Prayer(PrayerKind),
    /// The fasting days of one lunar fasting month, keyed by its year.
    Fast {
        /// Year of the fasting month.
        year: u16,
    },
}

impl Category {
    /// Return `true` for prayer categories.
    pub fn is_prayer(&self) -> bool {
        matches!(self, Category::Prayer(_))
    }

    /// Return `true` for fasting-year categories.
    pub fn is_fast(&self) -> bool {
        matches!(self, Category::Fast { .. })
    }
}

impl From<PrayerKind> for Category {
    fn from(kind: PrayerKind) -> Self {
        Category::Prayer(kind)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Prayer(kind) => write!(f, "{kind}"),
            Category::Fast { year } => write!(f, "fast:{year}"),
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse the [`Display`](std::fmt::Display) form: `fajr`, `fast:2019`, …
    fn from_str(s: &str) -> Result<Self> {
        match s.strip_prefix("fast:") {
            Some(text) => match text.parse() {
                Ok(year) => Ok(Category::Fast { year }),
                Err(_) => fail!("category", "bad fasting year {text:?}"),
            },
            None => s.parse().map(Category::Prayer),
        }
    }
}

// Categories serialise as their display string so they can key JSON objects.
impl serde::Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_and_travel_partition_all() {
        assert!(PrayerKind::DAILY.iter().all(|k| !k.is_travel()));
        assert!(PrayerKind::TRAVEL.iter().all(|k| k.is_travel()));
        assert_eq!(
            PrayerKind::DAILY.len() + PrayerKind::TRAVEL.len(),
            PrayerKind::ALL.len()
        );
        assert_eq!(PrayerKind::IshaTravel.base(), PrayerKind::Isha);
        assert_eq!(PrayerKind::Fajr.base(), PrayerKind::Fajr);
    }

    #[test]
    fn category_text_form() {
        for kind in PrayerKind::ALL {
            let c = Category::from(kind);
            assert_eq!(c.to_string().parse::<Category>().unwrap(), c);
        }
        let fast = Category::Fast { year: 2019 };
        assert_eq!(fast.to_string(), "fast:2019");
        assert_eq!("fast:2019".parse::<Category>().unwrap(), fast);
        let err = "fast:abc".parse::<Category>().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("category"));
        assert!("tahajjud".parse::<Category>().is_err());
    }

    #[test]
    fn prayers_sort_before_fasts() {
        let mut cats = vec![
            Category::Fast { year: 2001 },
            Category::Prayer(PrayerKind::Witr),
            Category::Fast { year: 2000 },
            Category::Prayer(PrayerKind::Fajr),
        ];
        cats.sort();
        assert_eq!(
            cats,
            vec![
                Category::Prayer(PrayerKind::Fajr),
                Category::Prayer(PrayerKind::Witr),
                Category::Fast { year: 2000 },
                Category::Fast { year: 2001 },
            ]
        );
    }
}
