//! Deterministic in-memory data sources for chronalign tests and demos.
//!
//! - [`MockSource`]: a static synthetic archive with configurable coverage,
//!   holes, all-NaN dates, and latency.
//! - [`DynamicMockSource`]: a source whose answers are scripted per date by a
//!   [`DynamicMockController`] while the test runs.
use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use chronalign_core::{
    AlignError, ArrayField, DataSource, FetchResult, FieldRef, GroupOfDates, Timestamp,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};
pub use fixtures::values::{GRID_POINTS, synthetic as synthetic_values};

/// What a mock source does when asked for a group without any date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmptyGroupBehavior {
    /// Succeed with no field.
    #[default]
    ReturnEmpty,
    /// Fail with a source error.
    Fail,
}

/// Mock archive for CI-safe demos. Provides deterministic fields from static fixtures.
///
/// By default it holds `2t` every six hours through January 2021.
#[derive(Debug, Clone)]
pub struct MockSource {
    name: String,
    params: Vec<String>,
    dates: BTreeSet<Timestamp>,
    all_nans: BTreeSet<Timestamp>,
    failing: BTreeSet<Timestamp>,
    on_empty: EmptyGroupBehavior,
    latency: Option<Duration>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// The default archive.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "chronalign-mock".to_string(),
            params: vec!["2t".to_string()],
            dates: fixtures::archive::january_2021_six_hourly()
                .into_iter()
                .collect(),
            all_nans: BTreeSet::new(),
            failing: BTreeSet::new(),
            on_empty: EmptyGroupBehavior::default(),
            latency: None,
        }
    }

    /// Rename the source.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the archive coverage with exactly `dates`.
    #[must_use]
    pub fn with_dates(mut self, dates: impl IntoIterator<Item = Timestamp>) -> Self {
        self.dates = dates.into_iter().collect();
        self
    }

    /// Replace the parameters served for every date.
    #[must_use]
    pub fn with_params<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Punch holes in the coverage.
    #[must_use]
    pub fn without(mut self, dates: impl IntoIterator<Item = Timestamp>) -> Self {
        for d in dates {
            self.dates.remove(&d);
        }
        self
    }

    /// Serve all-NaN arrays at these dates.
    #[must_use]
    pub fn with_all_nans(mut self, dates: impl IntoIterator<Item = Timestamp>) -> Self {
        self.all_nans.extend(dates);
        self
    }

    /// Fail any request touching one of these dates.
    #[must_use]
    pub fn failing_at(mut self, dates: impl IntoIterator<Item = Timestamp>) -> Self {
        self.failing.extend(dates);
        self
    }

    /// Choose how an empty group is answered.
    #[must_use]
    pub const fn on_empty_group(mut self, behavior: EmptyGroupBehavior) -> Self {
        self.on_empty = behavior;
        self
    }

    /// Sleep this long before answering.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Dates the archive can serve.
    #[must_use]
    pub const fn dates(&self) -> &BTreeSet<Timestamp> {
        &self.dates
    }

    fn fields_at(&self, date: Timestamp) -> impl Iterator<Item = FieldRef> + '_ {
        let nans = self.all_nans.contains(&date);
        self.params.iter().map(move |p| {
            let values = if nans {
                fixtures::values::all_nans()
            } else {
                fixtures::values::synthetic(p, date)
            };
            ArrayField::new(p.clone(), date, values)
                .with_metadata("source", self.name.clone())
                .into_ref()
        })
    }
}

#[async_trait]
impl DataSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn select(&self, group: &GroupOfDates) -> Result<FetchResult, AlignError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if group.is_empty() {
            return match self.on_empty {
                EmptyGroupBehavior::ReturnEmpty => Ok(FetchResult::empty(group.clone())),
                EmptyGroupBehavior::Fail => Err(AlignError::source(
                    self.name.clone(),
                    "empty group of dates",
                )),
            };
        }

        let mut fields = Vec::new();
        for &date in group {
            if self.failing.contains(&date) {
                return Err(AlignError::source(
                    self.name.clone(),
                    format!("forced failure at {}", date.to_rfc3339()),
                ));
            }
            if self.dates.contains(&date) {
                fields.extend(self.fields_at(date));
            } else if !group.partial_ok() {
                return Err(AlignError::no_data(format!(
                    "{} has no data at {}",
                    self.name,
                    date.to_rfc3339()
                )));
            }
        }
        Ok(FetchResult::new(group.clone(), fields))
    }
}
