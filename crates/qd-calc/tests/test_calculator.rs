//! End-to-end tests: person record in, counter book out.

use qd_calc::{
    CalculatorConfig, CycleHistory, CycleProfile, Gender, ObligationCalculator, Person,
    PersonPatch, PostpartumEvent,
};
use qd_core::PersonId;
use qd_ledger::{Category, CounterBook, Ledger, PrayerKind, ResetScope};
use qd_time::{Date, DateRange};

const ID: PersonId = PersonId(7);

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn calculator() -> ObligationCalculator {
    ObligationCalculator::new(CalculatorConfig::default()).unwrap()
}

fn prayer(kind: PrayerKind) -> Category {
    Category::Prayer(kind)
}

/// Majority on 2020-01-01, regular observance from 2020-07-01.
fn woman() -> (Person, CycleHistory) {
    let person = Person::new(date(2011, 1, 1), Gender::Female, date(2020, 7, 1)).unwrap();
    let history = CycleHistory::new(
        vec![CycleProfile::new(0, 6)],
        vec![],
        &CalculatorConfig::default(),
    )
    .unwrap();
    (person, history)
}

#[test]
fn male_scenario() {
    let person = Person::new(date(1995, 1, 1), Gender::Male, date(2010, 1, 1)).unwrap();
    let owed = calculator()
        .calculate(&person, &CycleHistory::empty())
        .unwrap();

    assert_eq!(
        owed.prayer_range,
        DateRange::new(date(2007, 1, 1), date(2010, 1, 1))
    );
    let mut book = CounterBook::new();
    owed.apply_to(&mut book);
    for kind in PrayerKind::DAILY {
        assert_eq!(book.prayer(kind).total_owed(), 1096, "{kind}");
    }
    for kind in PrayerKind::TRAVEL {
        assert!(book.contains(&prayer(kind)));
        assert_eq!(book.prayer(kind).total_owed(), 0);
    }
    assert_eq!(book.fast_years(), vec![2007, 2008, 2009]);
    assert_eq!(book.fast_remaining(), 90);
    assert_eq!(book.prayer_remaining(), 6 * 1096);
}

#[test]
fn female_scenario() {
    let (person, history) = woman();
    let owed = calculator().calculate(&person, &history).unwrap();
    assert_eq!(owed.prayer.range_days, 182);
    assert_eq!(owed.prayer.exempt_days, 36);
    assert_eq!(owed.prayer.owed_days, 146);
    // The 2020 block (25 April to 25 May) lies wholly inside the range.
    assert_eq!(owed.fasting.owed_for(2020), Some(24));
    assert_eq!(owed.fasting.blocks.len(), 1);
}

#[test]
fn separate_fasting_start() {
    let (person, history) = woman();
    let person = person.with_fasting_start(date(2020, 5, 1)).unwrap();
    let owed = calculator().calculate(&person, &history).unwrap();
    assert_eq!(owed.prayer.owed_days, 146);
    assert_eq!(
        owed.fasting_range,
        DateRange::new(date(2020, 1, 1), date(2020, 5, 1))
    );
    // Six block days in range, one cycle day estimated among them.
    assert_eq!(owed.fasting.owed_for(2020), Some(6));
}

#[test]
fn observance_before_majority_owes_nothing() {
    let person = Person::new(date(2000, 1, 1), Gender::Male, date(2010, 1, 1)).unwrap();
    let owed = calculator()
        .calculate(&person, &CycleHistory::empty())
        .unwrap();
    assert_eq!(owed.prayer.owed_days, 0);
    assert!(owed.fasting.is_empty());
    assert!(owed.counters().iter().all(|&(_, n)| n == 0));
}

#[test]
fn recalculation_keeps_progress_and_manual_entries() {
    let calc = calculator();
    let ledger = Ledger::new();
    let (mut person, history) = woman();

    calc.recalculate_into(&ledger, ID, &person, &history).unwrap();
    ledger.add_fulfilled(ID, prayer(PrayerKind::Fajr), 40);
    ledger
        .add_owed(ID, prayer(PrayerKind::DhuhrTravel), 12)
        .unwrap();

    person
        .apply(&PersonPatch::new().prayer_start(date(2021, 1, 1)))
        .unwrap();
    let owed = calc.recalculate_into(&ledger, ID, &person, &history).unwrap();
    assert_eq!(owed.prayer.range_days, 366);

    let fajr = ledger.counter(ID, prayer(PrayerKind::Fajr));
    assert_eq!(fajr.total_owed(), owed.prayer.owed_days);
    assert_eq!(fajr.fulfilled(), 40);
    assert_eq!(
        ledger
            .counter(ID, prayer(PrayerKind::DhuhrTravel))
            .total_owed(),
        12
    );
}

#[test]
fn earlier_start_clears_fast_years_no_longer_owed() {
    let calc = calculator();
    let ledger = Ledger::new();
    let mut person = Person::new(date(1995, 1, 1), Gender::Male, date(2010, 1, 1)).unwrap();
    let history = CycleHistory::empty();

    calc.recalculate_into(&ledger, ID, &person, &history).unwrap();
    ledger.add_fulfilled(ID, Category::Fast { year: 2009 }, 5);

    person
        .apply(&PersonPatch::new().prayer_start(date(2008, 1, 1)))
        .unwrap();
    let owed = calc.recalculate_into(&ledger, ID, &person, &history).unwrap();
    assert_eq!(owed.fasting.blocks.keys().copied().collect::<Vec<_>>(), [2007]);

    let book = ledger.snapshot(ID).unwrap();
    assert_eq!(book.fast_remaining(), owed.fasting.total_owed());
    assert_eq!(book.fast_remaining(), 30);
    let stale = book.get(&Category::Fast { year: 2009 });
    assert_eq!(stale.total_owed(), 0);
    assert_eq!(stale.fulfilled(), 5);
    assert_eq!(book.get(&Category::Fast { year: 2008 }).total_owed(), 0);
}

#[test]
fn failed_recalculation_writes_nothing() {
    let calc = calculator();
    let ledger = Ledger::new();
    let (person, history) = woman();
    calc.recalculate_into(&ledger, ID, &person, &history).unwrap();
    let before = ledger.snapshot(ID).unwrap();

    // Valid under looser bounds, rejected by this calculator.
    let loose = CalculatorConfig::default().with_max_postpartum_days(60);
    let bad_history = CycleHistory::new(
        vec![CycleProfile::new(0, 6)],
        vec![PostpartumEvent::new(1, date(2020, 2, 1), 60)],
        &loose,
    )
    .unwrap();
    let err = calc
        .recalculate_into(&ledger, ID, &person, &bad_history)
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(ledger.snapshot(ID).unwrap(), before);
}

#[test]
fn wipe_then_recalculate() {
    let calc = calculator();
    let ledger = Ledger::new();
    let (person, history) = woman();
    calc.recalculate_into(&ledger, ID, &person, &history).unwrap();
    ledger.add_fulfilled(ID, prayer(PrayerKind::Isha), 10);

    assert_eq!(ledger.reset(ID, ResetScope::Fasts), 1);
    assert_eq!(ledger.snapshot(ID).unwrap().fast_remaining(), 0);

    ledger.reset(ID, ResetScope::All);
    calc.recalculate_into(&ledger, ID, &person, &history).unwrap();
    let book = ledger.snapshot(ID).unwrap();
    assert_eq!(book.prayer(PrayerKind::Isha).fulfilled(), 0);
    assert_eq!(book.prayer(PrayerKind::Isha).remaining(), 146);
    assert_eq!(book.len(), 9 + 1);
}

#[test]
fn config_round_trips_through_json() {
    let config = CalculatorConfig::default().with_lunar_month(29, 11);
    let json = serde_json::to_string(&config).unwrap();
    let back: CalculatorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    assert!(json.contains(r#""lunar_reference":"2023-03-23""#));
}
