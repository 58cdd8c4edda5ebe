use core::fmt;
use std::collections::BTreeSet;

use chrono::TimeDelta;

use crate::timeseries::frequency::{format_frequency, frequency_to_timedelta};
use crate::{AlignError, FrequencySpec, ProviderKey, Timestamp};

/// An ordered batch of unique dates requested from (or served by) a source.
///
/// The `provider` key identifies which dates provider produced the batch and
/// travels with every derived group. `partial_ok` tells the source that some
/// of the dates may legitimately be absent and should be skipped rather than
/// reported as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOfDates {
    dates: Vec<Timestamp>,
    provider: ProviderKey,
    partial_ok: bool,
}

impl GroupOfDates {
    /// Build a group from dates in the given order.
    ///
    /// # Errors
    /// Returns `AlignError::InvalidArg` if the same timestamp appears twice.
    pub fn new(dates: Vec<Timestamp>, provider: ProviderKey) -> Result<Self, AlignError> {
        let mut seen = BTreeSet::new();
        for d in &dates {
            if !seen.insert(*d) {
                return Err(AlignError::InvalidArg(format!(
                    "duplicate date {} in group",
                    d.to_rfc3339()
                )));
            }
        }
        Ok(Self {
            dates,
            provider,
            partial_ok: false,
        })
    }

    /// Build a group from dates already known to be unique.
    pub(crate) const fn from_unique(dates: Vec<Timestamp>, provider: ProviderKey) -> Self {
        Self {
            dates,
            provider,
            partial_ok: false,
        }
    }

    /// An empty group for the given provider.
    #[must_use]
    pub const fn empty(provider: ProviderKey) -> Self {
        Self::from_unique(Vec::new(), provider)
    }

    /// A group holding a single date.
    #[must_use]
    pub fn single(date: Timestamp, provider: ProviderKey) -> Self {
        Self::from_unique(vec![date], provider)
    }

    /// Set the `partial_ok` flag.
    #[must_use]
    pub const fn with_partial_ok(mut self, partial_ok: bool) -> Self {
        self.partial_ok = partial_ok;
        self
    }

    /// Dates in group order.
    #[must_use]
    pub fn dates(&self) -> &[Timestamp] {
        &self.dates
    }

    /// Opaque key of the provider that produced this group.
    #[must_use]
    pub const fn provider(&self) -> &ProviderKey {
        &self.provider
    }

    /// Whether a source may serve only part of this group.
    #[must_use]
    pub const fn partial_ok(&self) -> bool {
        self.partial_ok
    }

    /// Number of dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True when the group holds no date.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterate over the dates in group order.
    pub fn iter(&self) -> std::slice::Iter<'_, Timestamp> {
        self.dates.iter()
    }

    /// True when `date` belongs to the group.
    #[must_use]
    pub fn contains(&self, date: &Timestamp) -> bool {
        self.dates.contains(date)
    }
}

impl<'a> IntoIterator for &'a GroupOfDates {
    type Item = &'a Timestamp;
    type IntoIter = std::slice::Iter<'a, Timestamp>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}

impl fmt::Display for GroupOfDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GroupOfDates(")?;
        match self.dates.as_slice() {
            [] => f.write_str("[]")?,
            [only] => write!(f, "{}", only.to_rfc3339())?,
            [first, .., last] => write!(
                f,
                "{}..{} ({} dates)",
                first.to_rfc3339(),
                last.to_rfc3339(),
                self.dates.len()
            )?,
        }
        if self.partial_ok {
            f.write_str(", partial_ok")?;
        }
        f.write_str(")")
    }
}

/// A regular sequence of dates from `start` to `end` (inclusive).
///
/// Dates listed in `missing` are dropped from the enumeration. The range
/// hands out its dates in fixed-size [`GroupOfDates`] batches tagged with its
/// provider key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: Timestamp,
    end: Timestamp,
    frequency: TimeDelta,
    missing: BTreeSet<Timestamp>,
    provider: ProviderKey,
}

impl DateRange {
    /// Create a range stepping by `frequency`.
    ///
    /// # Errors
    /// Returns `AlignError::Configuration` if `frequency` is not positive or
    /// `end` precedes `start`.
    pub fn new(start: Timestamp, end: Timestamp, frequency: TimeDelta) -> Result<Self, AlignError> {
        if frequency <= TimeDelta::zero() {
            return Err(AlignError::configuration(format!(
                "date range frequency must be positive, got {}",
                format_frequency(frequency)
            )));
        }
        if end < start {
            return Err(AlignError::configuration(format!(
                "date range end {} is before start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self {
            start,
            end,
            frequency,
            missing: BTreeSet::new(),
            provider: ProviderKey::new("date-range"),
        })
    }

    /// Create a range from a configured frequency such as `"6h"`.
    ///
    /// # Errors
    /// Malformed frequency text plus the conditions of [`DateRange::new`].
    pub fn from_spec(
        start: Timestamp,
        end: Timestamp,
        frequency: &FrequencySpec,
    ) -> Result<Self, AlignError> {
        Self::new(start, end, frequency_to_timedelta(frequency)?)
    }

    /// Exclude the given dates from the enumeration.
    #[must_use]
    pub fn with_missing(mut self, missing: impl IntoIterator<Item = Timestamp>) -> Self {
        self.missing.extend(missing);
        self
    }

    /// Tag produced groups with `provider`.
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderKey) -> Self {
        self.provider = provider;
        self
    }

    /// Step between consecutive dates.
    #[must_use]
    pub const fn frequency(&self) -> TimeDelta {
        self.frequency
    }

    /// Dates excluded from the range.
    #[must_use]
    pub const fn missing(&self) -> &BTreeSet<Timestamp> {
        &self.missing
    }

    /// All dates of the range in ascending order, without the missing ones.
    #[must_use]
    pub fn dates(&self) -> Vec<Timestamp> {
        let mut out = Vec::new();
        let mut current = Some(self.start);
        while let Some(d) = current.filter(|d| *d <= self.end) {
            if !self.missing.contains(&d) {
                out.push(d);
            }
            current = d.checked_add_signed(self.frequency);
        }
        out
    }

    /// True when `date` is one of the range's dates.
    #[must_use]
    pub fn contains(&self, date: &Timestamp) -> bool {
        if *date < self.start || *date > self.end || self.missing.contains(date) {
            return false;
        }
        span_nanos(*date - self.start) % span_nanos(self.frequency) == 0
    }

    /// The dates of `group` that belong to the range, sorted ascending.
    ///
    /// The result keeps the provider and `partial_ok` flag of `group`.
    #[must_use]
    pub fn intersect(&self, group: &GroupOfDates) -> GroupOfDates {
        let mut dates: Vec<Timestamp> =
            group.iter().filter(|d| self.contains(d)).copied().collect();
        dates.sort_unstable();
        GroupOfDates::from_unique(dates, group.provider().clone())
            .with_partial_ok(group.partial_ok())
    }

    /// Split the dates into consecutive groups of at most `size` dates.
    ///
    /// # Errors
    /// Returns `AlignError::InvalidArg` when `size` is zero.
    pub fn groups(&self, size: usize) -> Result<Vec<GroupOfDates>, AlignError> {
        if size == 0 {
            return Err(AlignError::InvalidArg(
                "group size must be at least 1".to_string(),
            ));
        }
        Ok(self
            .dates()
            .chunks(size)
            .map(|chunk| GroupOfDates::from_unique(chunk.to_vec(), self.provider.clone()))
            .collect())
    }
}

fn span_nanos(span: TimeDelta) -> i128 {
    i128::from(span.num_seconds()) * 1_000_000_000 + i128::from(span.subsec_nanos())
}
