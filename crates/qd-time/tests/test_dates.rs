//! Integration tests for `Date`, `DateRange`, and the age helpers.

use proptest::prelude::*;

use qd_time::date::{days_in_month, is_leap_year};
use qd_time::{age_in_years, majority_date, Date, DateRange, TimeUnit};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

// ─── Date consistency ─────────────────────────────────────────────────────────

#[test]
fn consecutive_serials_are_consecutive_days() {
    let mut d = date(1990, 1, 1);
    let end = date(2030, 1, 1);
    while d < end {
        let next = d + 1;
        let (y, m, day) = d.ymd();
        let (ny, nm, nday) = next.ymd();
        if day == days_in_month(y, m) {
            assert_eq!(nday, 1, "{d} -> {next}");
            if m == 12 {
                assert_eq!((ny, nm), (y + 1, 1), "{d} -> {next}");
            } else {
                assert_eq!((ny, nm), (y, m + 1), "{d} -> {next}");
            }
        } else {
            assert_eq!((ny, nm, nday), (y, m, day + 1), "{d} -> {next}");
        }
        d = next;
    }
}

#[test]
fn year_lengths() {
    for y in 1900..2199u16 {
        let len = date(y + 1, 1, 1) - date(y, 1, 1);
        let expected = if is_leap_year(y) { 366 } else { 365 };
        assert_eq!(len, expected, "length of {y}");
    }
}

#[test]
fn known_day_counts() {
    assert_eq!(date(2007, 1, 1).days_between(date(2010, 1, 1)), 1096);
    assert_eq!(date(2020, 1, 1).days_between(date(2020, 7, 1)), 182);
    assert_eq!(date(2019, 6, 1) + 40, date(2019, 7, 11));
}

#[test]
fn advance_by_units() {
    let d = date(2023, 1, 31);
    assert_eq!(d.advance(1, TimeUnit::Months).unwrap(), date(2023, 2, 28));
    assert_eq!(d.advance(2, TimeUnit::Weeks).unwrap(), date(2023, 2, 14));
    assert_eq!(d.advance(-1, TimeUnit::Years).unwrap(), date(2022, 1, 31));
    assert!(date(2199, 6, 1).advance(1, TimeUnit::Years).is_err());
}

// ─── Serialisation ────────────────────────────────────────────────────────────

#[test]
fn serde_uses_iso_strings() {
    let r = DateRange::new(date(2019, 1, 1), date(2019, 12, 1));
    let json = serde_json::to_string(&r).unwrap();
    assert_eq!(json, r#"{"start":"2019-01-01","end":"2019-12-01"}"#);
    let back: DateRange = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);

    let bad = serde_json::from_str::<Date>(r#""2019-13-01""#);
    assert!(bad.is_err());
}

// ─── Age ──────────────────────────────────────────────────────────────────────

#[test]
fn majority_is_reached_on_the_birthday() {
    let birth = date(1995, 1, 1);
    let majority = majority_date(birth, 12).unwrap();
    assert_eq!(majority, date(2007, 1, 1));
    assert_eq!(age_in_years(birth, majority).unwrap(), 12);
    assert_eq!(age_in_years(birth, majority - 1).unwrap(), 11);
}

// ─── Properties ───────────────────────────────────────────────────────────────

fn arb_date() -> impl Strategy<Value = Date> {
    (1..=Date::MAX.serial()).prop_map(|s| Date::from_serial(s).unwrap())
}

proptest! {
    #[test]
    fn ymd_roundtrip(d in arb_date()) {
        let (y, m, day) = d.ymd();
        prop_assert_eq!(Date::from_ymd(y, m, day).unwrap(), d);
    }

    #[test]
    fn text_roundtrip(d in arb_date()) {
        prop_assert_eq!(d.to_string().parse::<Date>().unwrap(), d);
    }

    #[test]
    fn range_days_never_negative(a in arb_date(), b in arb_date()) {
        let r = DateRange::new(a, b);
        prop_assert_eq!(r.days() as i64, i64::from((b - a).max(0)));
        prop_assert_eq!(r.is_empty(), r.days() == 0);
    }
}
