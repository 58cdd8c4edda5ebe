use std::sync::Arc;

use chronalign::{DataSource, Join, RepeatedDates};
use serde_json::json;

use crate::helpers::{MockSource, dt, group, shared};

#[tokio::test]
async fn repeated_dates_over_repeated_dates() {
    // inner: constant forcing field; outer: climatology over it
    let inner = RepeatedDates::builder()
        .source(shared(MockSource::new().with_name("lsm").with_params(["lsm"])))
        .mode("constant", json!({"date": "2021-01-01T00:00:00Z"}))
        .build()
        .unwrap();
    let outer = RepeatedDates::builder()
        .source(Arc::new(inner))
        .mode("climatology", json!({"year": 1999, "day": 1, "hour": 0}))
        .build()
        .unwrap();

    let fields = outer
        .select(&group(&[dt(2021, 7, 14, 6), dt(2022, 7, 2, 12)]))
        .await
        .unwrap()
        .datasource()
        .unwrap();

    let dates: Vec<_> = fields.iter().map(|f| f.valid_datetime()).collect();
    assert_eq!(dates, vec![Some(dt(2021, 7, 14, 6)), Some(dt(2022, 7, 2, 12))]);
    let expected = chronalign_mock::synthetic_values("lsm", dt(2021, 1, 1, 0));
    assert!(fields.iter().all(|f| f.values() == expected.as_slice()));
}

#[tokio::test]
async fn join_of_aligned_sources() {
    let closest = RepeatedDates::builder()
        .source(shared(MockSource::new().with_name("era5")))
        .mode("closest", json!({"frequency": "1h", "maximum": "12h"}))
        .build()
        .unwrap();
    let constant = RepeatedDates::builder()
        .source(shared(MockSource::new().with_name("orog").with_params(["z"])))
        .mode("constant", json!({"date": "2021-01-01T00:00:00Z"}))
        .build()
        .unwrap();
    let join = Join::new(vec![Arc::new(closest), Arc::new(constant)]).unwrap();

    let requested = group(&[dt(2021, 1, 5, 1), dt(2021, 1, 5, 2)]);
    let res = join.select(&requested).await.unwrap();

    assert_eq!(res.len(), 4);
    assert!(
        res.datasource()
            .zip(requested.iter().chain(requested.iter()))
            .all(|(f, d)| f.valid_datetime() == Some(*d))
    );
}
