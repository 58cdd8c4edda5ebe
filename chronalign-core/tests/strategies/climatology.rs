use chrono::{TimeZone, Utc};
use chronalign_core::{AlignError, ClimatologyAlignment, GroupOfDates, ProviderKey};

use crate::helpers::{dt, group};

#[test]
fn keeps_month_and_time_without_hour() {
    let s = ClimatologyAlignment::new(2000, 15, None).unwrap();
    let requested = group(&[dt(2021, 3, 15, 12), dt(2019, 3, 15, 18)]);

    let pairs: Vec<_> = s.transform(&requested).unwrap().collect();

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].fetch.dates(), &[dt(2000, 3, 15, 12)]);
    assert_eq!(pairs[0].replicate.dates(), &[dt(2021, 3, 15, 12)]);
    assert_eq!(pairs[1].fetch.dates(), &[dt(2000, 3, 15, 18)]);
    assert_eq!(pairs[1].replicate.dates(), &[dt(2019, 3, 15, 18)]);
}

#[test]
fn hour_zeroes_minutes_and_seconds() {
    let s = ClimatologyAlignment::new(2000, 1, Some(6)).unwrap();
    let d = Utc.with_ymd_and_hms(2022, 7, 20, 17, 45, 30).unwrap();

    assert_eq!(s.reference_date(d).unwrap(), dt(2000, 7, 1, 6));
}

#[test]
fn dates_sharing_a_reference_are_grouped() {
    let s = ClimatologyAlignment::new(2000, 1, Some(0)).unwrap();
    let requested = group(&[
        dt(2021, 5, 3, 6),
        dt(2021, 6, 3, 6),
        dt(2019, 5, 28, 18),
    ]);

    let pairs: Vec<_> = s.transform(&requested).unwrap().collect();

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].fetch.dates(), &[dt(2000, 5, 1, 0)]);
    assert_eq!(
        pairs[0].replicate.dates(),
        &[dt(2021, 5, 3, 6), dt(2019, 5, 28, 18)]
    );
    assert_eq!(pairs[1].fetch.dates(), &[dt(2000, 6, 1, 0)]);
}

#[test]
fn reference_is_idempotent() {
    let s = ClimatologyAlignment::new(2004, 29, Some(12)).unwrap();
    let once = s.reference_date(dt(2021, 2, 3, 9)).unwrap();
    assert_eq!(once, dt(2004, 2, 29, 12));
    assert_eq!(s.reference_date(once).unwrap(), once);
}

#[test]
fn impossible_calendar_day_is_invalid_arg() {
    let s = ClimatologyAlignment::new(2001, 29, None).unwrap();
    let err = s.reference_date(dt(2020, 2, 10, 0)).unwrap_err();
    assert!(matches!(err, AlignError::InvalidArg(_)), "{err:?}");

    let s = ClimatologyAlignment::new(2000, 31, None).unwrap();
    assert!(s.transform(&group(&[dt(2020, 4, 2, 0)])).is_err());
}

#[test]
fn empty_request_yields_no_pair() {
    let s = ClimatologyAlignment::new(2000, 1, None).unwrap();
    let pairs = s
        .transform(&GroupOfDates::empty(ProviderKey::anonymous()))
        .unwrap();
    assert_eq!(pairs.count(), 0);
}

#[test]
fn out_of_range_options_are_configuration_errors() {
    assert!(ClimatologyAlignment::new(2000, 0, None).unwrap_err().is_configuration());
    assert!(ClimatologyAlignment::new(2000, 32, None).unwrap_err().is_configuration());
    assert!(ClimatologyAlignment::new(2000, 1, Some(24)).unwrap_err().is_configuration());
}
