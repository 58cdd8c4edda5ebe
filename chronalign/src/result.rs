use chronalign_core::{
    AlignError, FetchResult, FieldList, GroupOfDates, new_field_with_valid_datetime,
};

/// The data fetched for one alignment pair, re-timestamped on demand.
///
/// The fetched fields are shared, never mutated; every materialized field is
/// a re-timestamped view of one of them.
#[derive(Debug, Clone)]
pub struct AlignmentResult {
    fetched: FetchResult,
    replicate: GroupOfDates,
}

impl AlignmentResult {
    /// Pair a fetch result with the requested dates it stands in for.
    #[must_use]
    pub const fn new(fetched: FetchResult, replicate: GroupOfDates) -> Self {
        Self { fetched, replicate }
    }

    /// Dates that were actually fetched.
    #[must_use]
    pub const fn fetch_group(&self) -> &GroupOfDates {
        self.fetched.group()
    }

    /// Requested dates covered by this result.
    #[must_use]
    pub const fn replicate(&self) -> &GroupOfDates {
        &self.replicate
    }

    /// The raw inner source result.
    #[must_use]
    pub const fn fetched(&self) -> &FetchResult {
        &self.fetched
    }

    /// One field per fetched field and replicate date, fetched fields in the
    /// outer loop.
    ///
    /// # Errors
    /// `AlignError::NoInputData` when nothing would be materialized, either
    /// because the fetch returned no field or because the replicate group is
    /// empty.
    pub fn datasource(&self) -> Result<FieldList, AlignError> {
        let mut out = Vec::with_capacity(self.fetched.len() * self.replicate.len());
        for field in self.fetched.datasource() {
            for &date in &self.replicate {
                out.push(new_field_with_valid_datetime(field, date));
            }
        }
        if out.is_empty() {
            return Err(AlignError::no_input_data(format!(
                "repeated_dates: no input data found for {} (fetched {})",
                self.replicate,
                self.fetched.group()
            )));
        }
        Ok(out)
    }
}

/// The concatenation of every [`AlignmentResult`] produced for one request.
#[derive(Debug, Clone)]
pub struct JoinedResult {
    group: GroupOfDates,
    results: Vec<AlignmentResult>,
}

impl JoinedResult {
    /// Join per-pair results answering `group`.
    #[must_use]
    pub const fn new(group: GroupOfDates, results: Vec<AlignmentResult>) -> Self {
        Self { group, results }
    }

    /// The originally requested dates.
    #[must_use]
    pub const fn group(&self) -> &GroupOfDates {
        &self.group
    }

    /// Per-pair results in emission order.
    #[must_use]
    pub fn results(&self) -> &[AlignmentResult] {
        &self.results
    }

    /// Number of per-pair results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when no pair was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Materialize every per-pair result, in pair order.
    ///
    /// # Errors
    /// The first `AlignError::NoInputData` raised by a per-pair result.
    pub fn datasource(&self) -> Result<FieldList, AlignError> {
        let mut out = Vec::new();
        for r in &self.results {
            out.extend(r.datasource()?);
        }
        Ok(out)
    }

    /// Materialize into a [`FetchResult`] for the requested group.
    ///
    /// # Errors
    /// Same as [`JoinedResult::datasource`].
    pub fn into_fetch_result(self) -> Result<FetchResult, AlignError> {
        let fields = self.datasource()?;
        Ok(FetchResult::new(self.group, fields))
    }
}
