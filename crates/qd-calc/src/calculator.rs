//! End-to-end calculation from a person record to owed counts.

use qd_core::errors::Result;
use qd_core::{Days, PersonId};
use qd_ledger::{Category, CounterBook, Ledger, PrayerKind};
use qd_time::DateRange;
use tracing::info;

use crate::config::CalculatorConfig;
use crate::exemption::{compute_fast_days, compute_prayer_days, FastDays, PrayerDays};
use crate::history::CycleHistory;
use crate::lunar::LunarCalendar;
use crate::partition::partition;
use crate::person::Person;

/// Computed owed counts for one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obligations {
    /// Range over which prayers are owed.
    pub prayer_range: DateRange,
    /// Range over which fasting is owed.
    pub fasting_range: DateRange,
    /// Prayer day counts.
    pub prayer: PrayerDays,
    /// Fasting day counts per year.
    pub fasting: FastDays,
}

impl Obligations {
    /// Owed count for every computed category: the six daily prayers, then
    /// one entry per fasting year.
    pub fn counters(&self) -> Vec<(Category, Days)> {
        let prayers = PrayerKind::DAILY
            .iter()
            .map(|&kind| (Category::Prayer(kind), self.prayer.owed_days));
        let fasts = self
            .fasting
            .blocks
            .iter()
            .map(|(&year, block)| (Category::Fast { year }, block.owed_days));
        prayers.chain(fasts).collect()
    }

    /// Write the owed counts into `book`.
    ///
    /// Computed categories are (re)initialized, which keeps their fulfilled
    /// counts.  Fasting years already in the book that this calculation no
    /// longer derives drop to zero owed, also keeping what was fulfilled.
    /// Travel variants are only created if missing: they grow by manual
    /// entry and a recalculation never overwrites them.
    pub fn apply_to(&self, book: &mut CounterBook) {
        for year in book.fast_years() {
            if !self.fasting.blocks.contains_key(&year) {
                book.initialize(Category::Fast { year }, 0);
            }
        }
        for (category, owed) in self.counters() {
            book.initialize(category, owed);
        }
        for kind in PrayerKind::TRAVEL {
            book.ensure(Category::Prayer(kind));
        }
    }
}

/// Runs the partition and exemption steps under one configuration.
///
/// # Example
/// ```
/// use qd_calc::{CalculatorConfig, CycleHistory, Gender, ObligationCalculator, Person};
/// use qd_time::Date;
///
/// let calc = ObligationCalculator::new(CalculatorConfig::default()).unwrap();
/// let person = Person::new(
///     Date::from_ymd(1995, 1, 1).unwrap(),
///     Gender::Male,
///     Date::from_ymd(2010, 1, 1).unwrap(),
/// )
/// .unwrap();
/// let owed = calc.calculate(&person, &CycleHistory::empty()).unwrap();
/// assert_eq!(owed.prayer.owed_days, 1096);
/// ```
#[derive(Debug, Clone)]
pub struct ObligationCalculator {
    config: CalculatorConfig,
    calendar: LunarCalendar,
}

impl ObligationCalculator {
    /// Create a calculator after validating `config`.
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        let calendar = LunarCalendar::from_config(&config);
        Ok(Self { config, calendar })
    }

    /// The configuration in use.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// The fasting-month calendar in use.
    pub fn calendar(&self) -> &LunarCalendar {
        &self.calendar
    }

    /// Compute the owed counts for `person`.
    ///
    /// `history` is revalidated against this calculator's bounds.  It is
    /// ignored for men.
    ///
    /// # Errors
    /// Validation errors from `history`, or a date error if the majority
    /// date falls outside the supported range.
    pub fn calculate(&self, person: &Person, history: &CycleHistory) -> Result<Obligations> {
        let empty = CycleHistory::empty();
        let history = if person.gender().has_exemptions() {
            history.validate(&self.config)?;
            history
        } else {
            &empty
        };

        let prayer_range = person.prayer_range(&self.config)?;
        let fasting_range = person.fasting_range(&self.config)?;

        let prayer_partition = partition(prayer_range, history.events())?;
        let prayer = compute_prayer_days(
            prayer_range,
            prayer_partition.segments(),
            history.profiles(),
            prayer_partition.postpartum_days(),
            &self.config,
        );

        let fasting_partition = if fasting_range == prayer_range {
            prayer_partition
        } else {
            partition(fasting_range, history.events())?
        };
        let fasting = compute_fast_days(
            fasting_range,
            &fasting_partition,
            history.profiles(),
            &self.calendar,
            &self.config,
        );

        info!(
            gender = ?person.gender(),
            %prayer_range,
            prayer_owed = prayer.owed_days,
            fasting_years = fasting.blocks.len(),
            fasting_owed = fasting.total_owed(),
            "obligations calculated"
        );
        Ok(Obligations {
            prayer_range,
            fasting_range,
            prayer,
            fasting,
        })
    }

    /// Calculate and persist into `ledger` as one unit.
    ///
    /// Nothing is written if the calculation fails.
    pub fn recalculate_into(
        &self,
        ledger: &Ledger,
        id: PersonId,
        person: &Person,
        history: &CycleHistory,
    ) -> Result<Obligations> {
        ledger.transaction(id, |book| {
            let obligations = self.calculate(person, history)?;
            obligations.apply_to(book);
            Ok(obligations)
        })
    }
}
