use chrono::{Datelike, NaiveDate, NaiveTime};

use super::pair::{AlignmentPairs, group_by_target};
use crate::dates::GroupOfDates;
use crate::{AlignError, ClimatologyOptions, Timestamp};

/// Map every requested date onto a fixed reference year and day of month.
///
/// The month is kept. With `hour` set, the time of day is replaced by that
/// hour on the dot; otherwise the requested time is kept. No data source is
/// consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimatologyAlignment {
    year: i32,
    day: u32,
    hour: Option<u32>,
}

impl ClimatologyAlignment {
    /// Create a strategy.
    ///
    /// # Errors
    /// `AlignError::Configuration` when `day` is outside `1..=31` or `hour`
    /// outside `0..=23`.
    pub fn new(year: i32, day: u32, hour: Option<u32>) -> Result<Self, AlignError> {
        if !(1..=31).contains(&day) {
            return Err(AlignError::configuration(format!(
                "climatology: day must be in 1..=31, got {day}"
            )));
        }
        if let Some(h) = hour.filter(|h| *h > 23) {
            return Err(AlignError::configuration(format!(
                "climatology: hour must be in 0..=23, got {h}"
            )));
        }
        Ok(Self { year, day, hour })
    }

    /// Create a strategy from configuration options.
    ///
    /// # Errors
    /// Same as [`ClimatologyAlignment::new`].
    pub fn from_options(opts: &ClimatologyOptions) -> Result<Self, AlignError> {
        Self::new(opts.year, opts.day, opts.hour)
    }

    /// Reference year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Reference day of month.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Reference hour, if any.
    #[must_use]
    pub const fn hour(&self) -> Option<u32> {
        self.hour
    }

    /// The reference date standing in for `date`.
    ///
    /// # Errors
    /// `AlignError::InvalidArg` when the substitution names a day that does
    /// not exist, such as 29 February of a common year or 31 April.
    pub fn reference_date(&self, date: Timestamp) -> Result<Timestamp, AlignError> {
        let day = NaiveDate::from_ymd_opt(self.year, date.month(), self.day).ok_or_else(|| {
            AlignError::InvalidArg(format!(
                "climatology: {:04}-{:02}-{:02} is not a valid date (from {})",
                self.year,
                date.month(),
                self.day,
                date.to_rfc3339()
            ))
        })?;
        let time = match self.hour {
            Some(h) => NaiveTime::from_hms_opt(h, 0, 0)
                .ok_or_else(|| AlignError::InvalidArg(format!("climatology: invalid hour {h}")))?,
            None => date.time(),
        };
        Ok(day.and_time(time).and_utc())
    }

    /// Pair each distinct reference date with the requested dates mapping to it.
    ///
    /// # Errors
    /// See [`ClimatologyAlignment::reference_date`].
    pub fn transform(&self, requested: &GroupOfDates) -> Result<AlignmentPairs, AlignError> {
        let chosen = requested
            .iter()
            .map(|&d| self.reference_date(d).map(|r| (d, r)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AlignmentPairs::new(group_by_target(
            chosen,
            requested.provider(),
        )))
    }
}
