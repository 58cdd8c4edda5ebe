use async_trait::async_trait;

use crate::dates::GroupOfDates;
use crate::field::{FieldList, FieldRef};
use crate::AlignError;

/// A provider of fields for groups of dates.
///
/// Inner archive readers, alignment actions, and joins all implement this
/// trait so they can be nested freely.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable name used to tag errors and log records.
    fn name(&self) -> &str;

    /// Fetch every field available for the dates of `group`.
    ///
    /// When `group.partial_ok()` is set, dates without data are skipped
    /// silently. Otherwise implementations should fail on a missing date.
    ///
    /// # Errors
    /// Source-specific failures, usually `AlignError::Source` or
    /// `AlignError::NoData`.
    async fn select(&self, group: &GroupOfDates) -> Result<FetchResult, AlignError>;
}

/// What a source returned for one group of dates.
#[derive(Debug, Clone)]
pub struct FetchResult {
    group: GroupOfDates,
    fields: FieldList,
}

impl FetchResult {
    /// Pair the requested group with the fields fetched for it.
    #[must_use]
    pub const fn new(group: GroupOfDates, fields: FieldList) -> Self {
        Self { group, fields }
    }

    /// A result with no field.
    #[must_use]
    pub const fn empty(group: GroupOfDates) -> Self {
        Self::new(group, Vec::new())
    }

    /// The group this result answers.
    #[must_use]
    pub const fn group(&self) -> &GroupOfDates {
        &self.group
    }

    /// Fields in fetch order.
    pub fn datasource(&self) -> impl ExactSizeIterator<Item = &FieldRef> + '_ {
        self.fields.iter()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the source returned nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the result, keeping the fields.
    #[must_use]
    pub fn into_fields(self) -> FieldList {
        self.fields
    }
}
