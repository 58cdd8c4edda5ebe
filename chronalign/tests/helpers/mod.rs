#![allow(dead_code)]
// Re-export helpers so tests can `use crate::helpers::*;`

use std::collections::BTreeMap;
use std::sync::Arc;

use chronalign::{DataSource, GroupOfDates, ProviderKey};
use chronalign_core::{ArrayField, FieldRef, Timestamp};
pub use chronalign_mock::{
    DynamicMockController, DynamicMockSource, EmptyGroupBehavior, MockBehavior, MockSource,
};

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32) -> Timestamp {
    chrono::NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(hh, 0, 0))
        .expect("valid test date")
        .and_utc()
}

/// Build a group tagged with the test provider.
pub fn group(dates: &[Timestamp]) -> GroupOfDates {
    GroupOfDates::new(dates.to_vec(), ProviderKey::new("training")).expect("unique test dates")
}

/// A field for `param` at `date`.
pub fn field(param: &str, date: Timestamp, values: Vec<f64>) -> FieldRef {
    ArrayField::new(param, date, values).into_ref()
}

/// Wrap a mock in the trait object the builder expects.
pub fn shared(source: MockSource) -> Arc<dyn DataSource> {
    Arc::new(source)
}

/// A dynamic mock with `fields` scripted at their own valid dates.
///
/// Fields sharing a date are served together, in the order given.
pub async fn scripted(
    name: &'static str,
    fields: Vec<FieldRef>,
) -> (Arc<dyn DataSource>, DynamicMockController) {
    let (source, controller) = DynamicMockSource::new_with_controller(name);
    let mut by_date: BTreeMap<Timestamp, Vec<FieldRef>> = BTreeMap::new();
    for f in fields {
        let date = f.valid_datetime().expect("fixture field has a date");
        by_date.entry(date).or_default().push(f);
    }
    for (date, fields) in by_date {
        controller
            .set_behavior(date, MockBehavior::Return(fields))
            .await;
    }
    (source, controller)
}
