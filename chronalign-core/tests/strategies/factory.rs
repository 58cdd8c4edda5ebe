use chrono::TimeDelta;
use chronalign_core::{
    AlignError, AlignmentConfig, AlignmentMode, AlignmentStrategy, ClosestOptions,
};
use serde_json::json;

use crate::helpers::{Archive, dt, field, group};

#[test]
fn closest_defaults() {
    let s = AlignmentStrategy::from_mode("closest", &serde_json::Value::Null).unwrap();
    match &s {
        AlignmentStrategy::Closest(c) => {
            assert_eq!(c.frequency(), TimeDelta::hours(1));
            assert_eq!(c.maximum(), TimeDelta::days(30));
            assert!(!c.skip_all_nans());
        }
        other => panic!("unexpected strategy {other}"),
    }
    assert_eq!(s.to_string(), "closest(frequency=1h, maximum=30d, skip_all_nans=false)");
}

#[test]
fn every_mode_is_constructible() {
    let cases = [
        ("closest", json!({"frequency": "6h", "maximum": "2d", "skip_all_nans": true})),
        ("climatology", json!({"year": 2000, "day": 1, "hour": 0})),
        ("constant", json!({"date": "2020-01-01T00:00:00Z"})),
        ("constant", json!({})),
    ];
    for (mode, options) in cases {
        let s = AlignmentStrategy::from_mode(mode, &options).unwrap();
        assert_eq!(s.mode().as_str(), mode);
    }
}

#[test]
fn unknown_mode_is_configuration_error() {
    let err = AlignmentStrategy::from_mode("nearest", &json!({})).unwrap_err();
    assert!(matches!(err, AlignError::Configuration(_)));
}

#[test]
fn bad_options_are_configuration_errors() {
    let cases = [
        ("closest", json!({"frequency": "1y"})),
        ("closest", json!({"frequency": "0h"})),
        ("closest", json!({"frequency": "-1h"})),
        ("closest", json!({"maximum": "-1d"})),
        ("closest", json!({"frequency": "1s", "maximum": "1000w"})),
        ("closest", json!({"skip_all_nans": "yes"})),
        ("closest", json!({"window": "1d"})),
        ("climatology", json!({"day": 1})),
        ("climatology", json!({"year": 2000, "day": 40})),
        ("climatology", json!({"year": 2000, "day": 1, "hour": 25})),
        ("constant", json!({"date": "not a date"})),
        ("constant", json!({"when": "2020-01-01T00:00:00Z"})),
    ];
    for (mode, options) in cases {
        let err = AlignmentStrategy::from_mode(mode, &options).unwrap_err();
        assert!(err.is_configuration(), "{mode} {options}: {err:?}");
    }
}

#[test]
fn integer_frequency_counts_hours() {
    let s = AlignmentStrategy::from_mode("closest", &json!({"frequency": 3})).unwrap();
    let AlignmentStrategy::Closest(c) = s else {
        panic!("expected closest");
    };
    assert_eq!(c.frequency(), TimeDelta::hours(3));
}

#[tokio::test]
async fn typed_config_drives_the_same_strategy() {
    let cfg = AlignmentConfig::Closest(ClosestOptions {
        frequency: "1h".into(),
        maximum: "6h".into(),
        skip_all_nans: false,
    });
    let mut s = AlignmentStrategy::from_config(&cfg).unwrap();
    assert_eq!(s.mode(), AlignmentMode::Closest);

    let archive = Archive::new().with(field(dt(2021, 1, 1, 3), vec![1.0]));
    let pairs: Vec<_> = s
        .transform(&archive, &group(&[dt(2021, 1, 1, 0), dt(2021, 1, 1, 6)]))
        .await
        .unwrap()
        .collect();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].fetch.dates(), &[dt(2021, 1, 1, 3)]);
}

#[tokio::test]
async fn climatology_and_constant_never_touch_the_source() {
    let archive = Archive::new();
    let requested = group(&[dt(2021, 3, 15, 12)]);

    let mut s = AlignmentStrategy::from_mode("climatology", &json!({"year": 2000, "day": 15})).unwrap();
    assert_eq!(s.transform(&archive, &requested).await.unwrap().len(), 1);

    let mut s = AlignmentStrategy::from_mode("constant", &json!(null)).unwrap();
    assert_eq!(s.transform(&archive, &requested).await.unwrap().len(), 1);

    assert!(archive.calls().is_empty());
}
