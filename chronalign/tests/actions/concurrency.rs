use std::collections::BTreeSet;
use std::sync::Arc;

use chronalign::RepeatedDates;
use serde_json::json;

use crate::helpers::{dt, field, group, scripted};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_selects_never_probe_a_date_twice() {
    let (source, controller) = scripted(
        "archive",
        vec![
            field("2t", dt(2021, 1, 1, 0), vec![0.0]),
            field("2t", dt(2021, 1, 1, 12), vec![12.0]),
        ],
    )
    .await;
    let action = Arc::new(
        RepeatedDates::builder()
            .source(source)
            .mode("closest", json!({"frequency": "1h", "maximum": "6h"}))
            .build()
            .unwrap(),
    );

    let requests = [
        group(&[dt(2021, 1, 1, 1)]),
        group(&[dt(2021, 1, 1, 2)]),
        group(&[dt(2021, 1, 1, 10)]),
        group(&[dt(2021, 1, 1, 11)]),
    ];
    let tasks: Vec<_> = requests
        .iter()
        .cloned()
        .map(|g| {
            let action = Arc::clone(&action);
            tokio::spawn(async move { action.select(&g).await })
        })
        .collect();
    for joined in futures::future::join_all(tasks).await {
        let fields = joined.expect("task").expect("select").datasource().unwrap();
        assert_eq!(fields.len(), 1);
    }

    let mut seen = BTreeSet::new();
    for probe in controller
        .requests()
        .await
        .iter()
        .filter(|g| g.partial_ok())
    {
        for d in probe {
            assert!(seen.insert(*d), "{d} probed twice");
        }
    }
    // 19h the day before through 17h
    assert_eq!(seen.len(), 23);
}
