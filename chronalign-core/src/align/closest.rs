use std::collections::{BTreeMap, BTreeSet};

use chrono::TimeDelta;

use super::pair::{AlignmentPairs, group_by_target};
use crate::dates::GroupOfDates;
use crate::source::DataSource;
use crate::timeseries::frequency::{format_frequency, frequency_to_timedelta};
use crate::{AlignError, ClosestOptions, Timestamp};

/// Outcome of probing one candidate date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    NoData,
    AllNans,
    Ok,
}

impl Probe {
    const fn as_str(self) -> &'static str {
        match self {
            Self::NoData => "no-data",
            Self::AllNans => "all-nans",
            Self::Ok => "ok",
        }
    }
}

/// Upper bound on `maximum / frequency`, the candidate steps taken on each
/// side of a requested date.
pub const MAX_CANDIDATE_STEPS: i128 = 100_000;

fn span_nanos(span: TimeDelta) -> i128 {
    i128::from(span.num_seconds()) * 1_000_000_000 + i128::from(span.subsec_nanos())
}

/// Map every requested date to the nearest date the inner source can serve.
///
/// Candidates are enumerated around each requested date by stepping
/// `frequency` in both directions while staying within `maximum`. Dates that
/// were already probed are never fetched again by the same instance, and
/// dates known to hold data accumulate across calls.
#[derive(Debug, Clone)]
pub struct ClosestAlignment {
    frequency: TimeDelta,
    maximum: TimeDelta,
    skip_all_nans: bool,
    tried: BTreeSet<Timestamp>,
    found: BTreeSet<Timestamp>,
}

impl ClosestAlignment {
    /// Create a strategy from explicit spans.
    ///
    /// # Errors
    /// `AlignError::Configuration` when `frequency` is not positive,
    /// `maximum` is negative, or the window would take more than
    /// [`MAX_CANDIDATE_STEPS`] steps on either side.
    pub fn new(
        frequency: TimeDelta,
        maximum: TimeDelta,
        skip_all_nans: bool,
    ) -> Result<Self, AlignError> {
        if frequency <= TimeDelta::zero() {
            return Err(AlignError::configuration(format!(
                "closest: frequency must be positive, got {}",
                format_frequency(frequency)
            )));
        }
        if maximum < TimeDelta::zero() {
            return Err(AlignError::configuration(format!(
                "closest: maximum must not be negative, got {}",
                format_frequency(maximum)
            )));
        }
        let steps = span_nanos(maximum) / span_nanos(frequency);
        if steps > MAX_CANDIDATE_STEPS {
            return Err(AlignError::configuration(format!(
                "closest: maximum {} is {steps} steps of {}, at most {MAX_CANDIDATE_STEPS} allowed",
                format_frequency(maximum),
                format_frequency(frequency)
            )));
        }
        Ok(Self {
            frequency,
            maximum,
            skip_all_nans,
            tried: BTreeSet::new(),
            found: BTreeSet::new(),
        })
    }

    /// Create a strategy from configuration options.
    ///
    /// # Errors
    /// Malformed durations plus the conditions of [`ClosestAlignment::new`].
    pub fn from_options(opts: &ClosestOptions) -> Result<Self, AlignError> {
        Self::new(
            frequency_to_timedelta(&opts.frequency)?,
            frequency_to_timedelta(&opts.maximum)?,
            opts.skip_all_nans,
        )
    }

    /// Candidate step.
    #[must_use]
    pub const fn frequency(&self) -> TimeDelta {
        self.frequency
    }

    /// Half-width of the search window.
    #[must_use]
    pub const fn maximum(&self) -> TimeDelta {
        self.maximum
    }

    /// Whether all-NaN fields are ignored.
    #[must_use]
    pub const fn skip_all_nans(&self) -> bool {
        self.skip_all_nans
    }

    /// Every candidate date fetched so far.
    #[must_use]
    pub const fn tried(&self) -> &BTreeSet<Timestamp> {
        &self.tried
    }

    /// Every date known to hold usable data.
    #[must_use]
    pub const fn found(&self) -> &BTreeSet<Timestamp> {
        &self.found
    }

    /// Candidate dates around `requested`, sorted and without duplicates.
    #[must_use]
    pub fn candidates(&self, requested: &GroupOfDates) -> BTreeSet<Timestamp> {
        let mut out = BTreeSet::new();
        for &date in requested {
            let lo = date.checked_sub_signed(self.maximum);
            let hi = date.checked_add_signed(self.maximum);

            let mut cur = Some(date);
            while let Some(d) = cur.filter(|d| lo.is_none_or(|lo| *d >= lo)) {
                out.insert(d);
                cur = d.checked_sub_signed(self.frequency);
            }
            let mut cur = Some(date);
            while let Some(d) = cur.filter(|d| hi.is_none_or(|hi| *d <= hi)) {
                out.insert(d);
                cur = d.checked_add_signed(self.frequency);
            }
        }
        out
    }

    /// True when some found date lies within `maximum` of a requested date.
    #[must_use]
    pub fn covers(&self, requested: &GroupOfDates) -> bool {
        requested.iter().any(|&date| {
            let lo = date.checked_sub_signed(self.maximum).unwrap_or(Timestamp::MIN_UTC);
            let hi = date.checked_add_signed(self.maximum).unwrap_or(Timestamp::MAX_UTC);
            self.found.range(lo..=hi).next().is_some()
        })
    }

    /// The nearest found date to `date`; exact ties go to the earlier date.
    #[must_use]
    pub fn closest(&self, date: Timestamp) -> Option<Timestamp> {
        let below = self.found.range(..=date).next_back().copied();
        let above = self.found.range(date..).next().copied();
        match (below, above) {
            (Some(b), Some(a)) => {
                if date - b <= a - date {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (b, a) => b.or(a),
        }
    }

    /// Probe new candidates through `source`, then pair each requested date
    /// with its closest found date.
    ///
    /// # Errors
    /// - `AlignError::NoData` when the batch fetch returns no field and no
    ///   date found by earlier calls lies within `maximum` of a requested
    ///   date, or when no usable date has been found yet.
    /// - `AlignError::Data` when a returned field carries no valid instant.
    /// - Any error from `source`, unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "chronalign::align::closest::transform",
            skip(self, source, requested),
            fields(source = source.name(), requested = %requested),
        )
    )]
    pub async fn transform(
        &mut self,
        source: &dyn DataSource,
        requested: &GroupOfDates,
    ) -> Result<AlignmentPairs, AlignError> {
        if requested.is_empty() {
            return Ok(AlignmentPairs::none());
        }

        let to_try: Vec<Timestamp> = self
            .candidates(requested)
            .difference(&self.tried)
            .copied()
            .collect();
        let mut status: BTreeMap<Timestamp, Probe> =
            to_try.iter().map(|d| (*d, Probe::NoData)).collect();

        if to_try.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(source = source.name(), requested = %requested, "no new dates to try");
        } else {
            let batch = GroupOfDates::from_unique(to_try.clone(), requested.provider().clone())
                .with_partial_ok(true);
            let fetched = source.select(&batch).await?;
            self.tried.extend(to_try);

            if fetched.is_empty() && !self.covers(requested) {
                return Err(AlignError::no_data(format!(
                    "no data found for {requested} in {}",
                    source.name()
                )));
            }

            for field in fetched.datasource() {
                let date = field.valid_datetime().ok_or_else(|| {
                    AlignError::Data(format!(
                        "field from {} has no valid_datetime",
                        source.name()
                    ))
                })?;
                if self.skip_all_nans && field.is_all_missing() {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(date = %date.to_rfc3339(), "skipping field because all values are NaN");
                    // one usable field is enough for the date
                    if status.get(&date) != Some(&Probe::Ok) {
                        status.insert(date, Probe::AllNans);
                    }
                    continue;
                }
                status.insert(date, Probe::Ok);
                self.found.insert(date);
            }
        }

        if self.found.is_empty() {
            #[cfg(feature = "tracing")]
            for (date, probe) in &status {
                tracing::warn!(date = %date.to_rfc3339(), status = probe.as_str(), "closest candidate");
            }
            let all_nans = status.values().filter(|p| **p == Probe::AllNans).count();
            return Err(AlignError::no_data(format!(
                "no matching data found for {requested} in {} ({} candidates, {all_nans} {})",
                source.name(),
                status.len(),
                Probe::AllNans.as_str()
            )));
        }

        let mut chosen = Vec::with_capacity(requested.len());
        for &date in requested {
            // found is non-empty here
            if let Some(best) = self.closest(date) {
                chosen.push((date, best));
            }
        }
        let pairs = group_by_target(chosen, requested.provider());

        #[cfg(feature = "tracing")]
        tracing::debug!(pairs = pairs.len(), found = self.found.len(), "closest pairs");

        Ok(AlignmentPairs::new(pairs))
    }
}
