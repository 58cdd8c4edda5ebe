use chronalign::{AlignError, AlignmentConfig, RepeatedDates};
use chronalign_core::ClimatologyOptions;

use crate::helpers::{dt, field, group, scripted};

#[tokio::test]
async fn each_reference_date_is_fetched_once_and_retimed() {
    let (source, controller) = scripted(
        "clim",
        vec![
            field("sst", dt(2000, 3, 15, 12), vec![12.0]),
            field("sst", dt(2000, 3, 15, 18), vec![18.0]),
        ],
    )
    .await;
    let action = RepeatedDates::builder()
        .source(source)
        .alignment(AlignmentConfig::Climatology(ClimatologyOptions {
            year: 2000,
            day: 15,
            hour: None,
        }))
        .build()
        .unwrap();

    let joined = action
        .select(&group(&[dt(2021, 3, 15, 12), dt(2019, 3, 15, 18)]))
        .await
        .unwrap();

    assert_eq!(joined.len(), 2);
    assert_eq!(joined.results()[0].fetch_group().dates(), &[dt(2000, 3, 15, 12)]);
    assert_eq!(joined.results()[1].fetch_group().dates(), &[dt(2000, 3, 15, 18)]);

    let fields = joined.datasource().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].valid_datetime(), Some(dt(2021, 3, 15, 12)));
    assert_eq!(fields[0].values(), &[12.0]);
    assert_eq!(fields[1].valid_datetime(), Some(dt(2019, 3, 15, 18)));
    assert_eq!(fields[1].values(), &[18.0]);

    assert_eq!(controller.requests().await.len(), 2);
}

#[tokio::test]
async fn missing_reference_date_propagates_source_error() {
    let (source, _controller) = scripted("clim", vec![]).await;
    let action = RepeatedDates::builder()
        .source(source)
        .mode("climatology", serde_json::json!({"year": 2000, "day": 1, "hour": 0}))
        .build()
        .unwrap();

    let err = action.select(&group(&[dt(2021, 5, 3, 6)])).await.unwrap_err();
    assert!(matches!(err, AlignError::NoData { .. }), "{err:?}");
}

#[tokio::test]
async fn impossible_reference_date_is_invalid_arg() {
    let (source, controller) = scripted("clim", vec![]).await;
    let action = RepeatedDates::builder()
        .source(source)
        .mode("climatology", serde_json::json!({"year": 2001, "day": 30}))
        .build()
        .unwrap();

    let err = action.select(&group(&[dt(2020, 2, 2, 0)])).await.unwrap_err();
    assert!(matches!(err, AlignError::InvalidArg(_)), "{err:?}");
    assert!(controller.requests().await.is_empty());
}
