#![allow(dead_code)]
// Shared fixtures for the chronalign-core integration tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chronalign_core::{
    AlignError, ArrayField, DataSource, FetchResult, FieldRef, GroupOfDates, ProviderKey,
    Timestamp,
};

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32) -> Timestamp {
    chrono::NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(hh, 0, 0))
        .expect("valid test date")
        .and_utc()
}

/// Build a group from static test dates.
pub fn group(dates: &[Timestamp]) -> GroupOfDates {
    GroupOfDates::new(dates.to_vec(), ProviderKey::new("test")).expect("unique test dates")
}

/// One `2t` field at `date` with the given values.
pub fn field(date: Timestamp, values: Vec<f64>) -> FieldRef {
    ArrayField::new("2t", date, values).into_ref()
}

/// In-memory archive that records every group it is asked for.
pub struct Archive {
    fields: BTreeMap<Timestamp, Vec<FieldRef>>,
    calls: Mutex<Vec<GroupOfDates>>,
}

impl Archive {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, field: FieldRef) -> Self {
        let date = field.valid_datetime().expect("fixture field has a date");
        self.fields.entry(date).or_default().push(field);
        self
    }

    /// Every group passed to `select`, in call order.
    pub fn calls(&self) -> Vec<GroupOfDates> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl DataSource for Archive {
    fn name(&self) -> &str {
        "archive"
    }

    async fn select(&self, group: &GroupOfDates) -> Result<FetchResult, AlignError> {
        self.calls.lock().expect("calls lock").push(group.clone());
        let mut out = Vec::new();
        for date in group {
            match self.fields.get(date) {
                Some(fs) => out.extend(fs.iter().cloned()),
                None if group.partial_ok() => {}
                None => {
                    return Err(AlignError::no_data(format!(
                        "archive has nothing at {}",
                        date.to_rfc3339()
                    )));
                }
            }
        }
        Ok(FetchResult::new(group.clone(), out))
    }
}
