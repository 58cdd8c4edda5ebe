use std::sync::Arc;

use async_trait::async_trait;

use chronalign_core::{AlignError, DataSource, FetchResult, GroupOfDates};

/// Action that asks several sources for the same dates and concatenates
/// their fields, sources in registration order.
pub struct Join {
    sources: Vec<Arc<dyn DataSource>>,
    name: String,
}

impl Join {
    /// Join `sources`.
    ///
    /// # Errors
    /// `AlignError::Configuration` when `sources` is empty.
    pub fn new(sources: Vec<Arc<dyn DataSource>>) -> Result<Self, AlignError> {
        if sources.is_empty() {
            return Err(AlignError::configuration(
                "join: no sources; add at least one",
            ));
        }
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        let name = format!("join({})", names.join(", "));
        Ok(Self { sources, name })
    }

    /// The joined sources.
    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn DataSource>] {
        &self.sources
    }
}

#[async_trait]
impl DataSource for Join {
    fn name(&self) -> &str {
        &self.name
    }

    async fn select(&self, group: &GroupOfDates) -> Result<FetchResult, AlignError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(join = %self.name, group = %group, "join select");
        let mut fields = Vec::new();
        for source in &self.sources {
            fields.extend(source.select(group).await?.into_fields());
        }
        Ok(FetchResult::new(group.clone(), fields))
    }
}

impl core::fmt::Debug for Join {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Join").field("name", &self.name).finish()
    }
}
