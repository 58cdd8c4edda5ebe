use super::pair::{AlignmentPair, AlignmentPairs};
use crate::dates::GroupOfDates;
use crate::{ConstantOptions, Timestamp};

/// Broadcast one fixed date over the whole requested group.
///
/// Without a date, the fetch group is empty and the inner source decides what
/// an empty request yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstantAlignment {
    date: Option<Timestamp>,
}

impl ConstantAlignment {
    /// Create a strategy.
    #[must_use]
    pub const fn new(date: Option<Timestamp>) -> Self {
        Self { date }
    }

    /// Create a strategy from configuration options.
    #[must_use]
    pub const fn from_options(opts: &ConstantOptions) -> Self {
        Self::new(opts.date)
    }

    /// The configured date.
    #[must_use]
    pub const fn date(&self) -> Option<Timestamp> {
        self.date
    }

    /// Always exactly one pair, even for an empty request.
    #[must_use]
    pub fn transform(&self, requested: &GroupOfDates) -> AlignmentPairs {
        let provider = requested.provider().clone();
        let fetch = match self.date {
            Some(d) => GroupOfDates::single(d, provider),
            None => GroupOfDates::empty(provider),
        };
        AlignmentPairs::new(vec![AlignmentPair::new(fetch, requested.clone())])
    }
}
