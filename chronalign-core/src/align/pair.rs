use std::collections::HashMap;

use crate::dates::GroupOfDates;
use crate::{ProviderKey, Timestamp};

/// One unit of work produced by a strategy: fetch `fetch` once, then
/// re-timestamp the result onto every date of `replicate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentPair {
    /// Dates actually requested from the inner source.
    pub fetch: GroupOfDates,
    /// Requested dates the fetched data stands in for.
    pub replicate: GroupOfDates,
}

impl AlignmentPair {
    /// Build a pair.
    #[must_use]
    pub const fn new(fetch: GroupOfDates, replicate: GroupOfDates) -> Self {
        Self { fetch, replicate }
    }
}

/// The pairs produced by one `transform` call.
///
/// Built eagerly and consumed once, in emission order.
#[derive(Debug)]
pub struct AlignmentPairs {
    inner: std::vec::IntoIter<AlignmentPair>,
}

impl AlignmentPairs {
    pub(crate) fn new(pairs: Vec<AlignmentPair>) -> Self {
        Self {
            inner: pairs.into_iter(),
        }
    }

    pub(crate) fn none() -> Self {
        Self::new(Vec::new())
    }
}

impl Iterator for AlignmentPairs {
    type Item = AlignmentPair;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for AlignmentPairs {}

/// Group `requested` dates by the target picked for each.
///
/// Groups are emitted in order of first appearance of their target; dates
/// inside a group keep the requested order.
pub(crate) fn group_by_target<I>(pairs: I, provider: &ProviderKey) -> Vec<AlignmentPair>
where
    I: IntoIterator<Item = (Timestamp, Timestamp)>,
{
    let mut order: Vec<(Timestamp, Vec<Timestamp>)> = Vec::new();
    let mut index: HashMap<Timestamp, usize> = HashMap::new();
    for (requested, target) in pairs {
        match index.get(&target) {
            Some(&i) => order[i].1.push(requested),
            None => {
                index.insert(target, order.len());
                order.push((target, vec![requested]));
            }
        }
    }
    order
        .into_iter()
        .map(|(target, dates)| {
            AlignmentPair::new(
                GroupOfDates::single(target, provider.clone()),
                GroupOfDates::from_unique(dates, provider.clone()),
            )
        })
        .collect()
}
