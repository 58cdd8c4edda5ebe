use std::sync::Arc;

use async_trait::async_trait;

use chronalign_core::{AlignError, DataSource, DateRange, FetchResult, GroupOfDates};

/// Action that routes each requested date to the source whose date range
/// holds it.
///
/// Every part sees only the requested dates inside its own range. Parts with
/// no such date are not called. Fields are concatenated in part order; a
/// request that matches no part yields an empty result.
pub struct Concat {
    parts: Vec<(DateRange, Arc<dyn DataSource>)>,
    name: String,
}

impl Concat {
    /// Concatenate `parts`, each served for the dates of its range.
    ///
    /// # Errors
    /// `AlignError::Configuration` when `parts` is empty.
    pub fn new(parts: Vec<(DateRange, Arc<dyn DataSource>)>) -> Result<Self, AlignError> {
        if parts.is_empty() {
            return Err(AlignError::configuration(
                "concat: no parts; add at least one date range and source",
            ));
        }
        let names: Vec<&str> = parts.iter().map(|(_, s)| s.name()).collect();
        let name = format!("concat({})", names.join(", "));
        Ok(Self { parts, name })
    }

    /// The configured parts in routing order.
    #[must_use]
    pub fn parts(&self) -> &[(DateRange, Arc<dyn DataSource>)] {
        &self.parts
    }
}

#[async_trait]
impl DataSource for Concat {
    fn name(&self) -> &str {
        &self.name
    }

    async fn select(&self, group: &GroupOfDates) -> Result<FetchResult, AlignError> {
        let mut fields = Vec::new();
        for (range, source) in &self.parts {
            let dates = range.intersect(group);
            if dates.is_empty() {
                continue;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(concat = %self.name, part = source.name(), dates = %dates, "concat part");
            fields.extend(source.select(&dates).await?.into_fields());
        }
        Ok(FetchResult::new(group.clone(), fields))
    }
}

impl core::fmt::Debug for Concat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Concat").field("name", &self.name).finish()
    }
}
