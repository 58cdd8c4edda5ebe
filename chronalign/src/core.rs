use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use chronalign_core::{
    AlignError, AlignmentConfig, AlignmentMode, AlignmentStrategy, DataSource, FetchResult,
    GroupOfDates, RepeatedDatesConfig,
};

use crate::result::{AlignmentResult, JoinedResult};

/// Action that serves requested dates from the dates an inner source
/// actually has, as chosen by an alignment strategy.
///
/// The strategy sits behind an async mutex: one `select` at a time may run
/// its `transform`, so the memory of the closest strategy is never observed
/// half-updated.
pub struct RepeatedDates {
    pub(crate) source: Arc<dyn DataSource>,
    pub(crate) strategy: Mutex<AlignmentStrategy>,
    pub(crate) mode: AlignmentMode,
    pub(crate) fetch_timeout: Option<Duration>,
    name: String,
}

enum PendingAlignment {
    Typed(AlignmentConfig),
    Raw {
        mode: String,
        options: serde_json::Value,
    },
}

/// Builder for constructing a [`RepeatedDates`] action.
pub struct RepeatedDatesBuilder {
    source: Option<Arc<dyn DataSource>>,
    alignment: Option<PendingAlignment>,
    fetch_timeout: Option<Duration>,
}

impl Default for RepeatedDatesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RepeatedDatesBuilder {
    /// Create an empty builder. A source and an alignment are required.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source: None,
            alignment: None,
            fetch_timeout: None,
        }
    }

    /// Set the inner data source. Replaces any earlier one.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Use typed alignment configuration.
    #[must_use]
    pub fn alignment(mut self, config: AlignmentConfig) -> Self {
        self.alignment = Some(PendingAlignment::Typed(config));
        self
    }

    /// Use a mode name and a JSON object of options, as found in recipe files.
    ///
    /// Validation happens in [`RepeatedDatesBuilder::build`].
    #[must_use]
    pub fn mode(mut self, mode: impl Into<String>, options: serde_json::Value) -> Self {
        self.alignment = Some(PendingAlignment::Raw {
            mode: mode.into(),
            options,
        });
        self
    }

    /// Bound every inner fetch, including the probes of the closest strategy.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Apply a deserialized action configuration.
    #[must_use]
    pub fn config(self, cfg: RepeatedDatesConfig) -> Self {
        let b = self.alignment(cfg.alignment);
        match cfg.fetch_timeout_ms {
            Some(ms) => b.fetch_timeout(Duration::from_millis(ms)),
            None => b,
        }
    }

    /// Build the action.
    ///
    /// # Errors
    /// `AlignError::Configuration` when the source or the alignment is
    /// missing, or when the alignment options are invalid.
    pub fn build(self) -> Result<RepeatedDates, AlignError> {
        let source = self.source.ok_or_else(|| {
            AlignError::configuration("repeated_dates: no source; add one via source(...)")
        })?;
        let strategy = match self.alignment {
            Some(PendingAlignment::Typed(cfg)) => AlignmentStrategy::from_config(&cfg)?,
            Some(PendingAlignment::Raw { mode, options }) => {
                AlignmentStrategy::from_mode(&mode, &options)?
            }
            None => {
                return Err(AlignError::configuration(
                    "repeated_dates: no alignment; set one via alignment(...) or mode(...)",
                ));
            }
        };
        let name = format!("repeated_dates({}, {strategy})", source.name());
        Ok(RepeatedDates {
            mode: strategy.mode(),
            source,
            strategy: Mutex::new(strategy),
            fetch_timeout: self.fetch_timeout,
            name,
        })
    }
}

/// Inner source view that bounds each call with a timeout.
struct Bounded<'a> {
    inner: &'a dyn DataSource,
    timeout: Option<Duration>,
}

#[async_trait]
impl DataSource for Bounded<'_> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn select(&self, group: &GroupOfDates) -> Result<FetchResult, AlignError> {
        match self.timeout {
            Some(t) => RepeatedDates::fetch_with_timeout(self.inner, t, group).await,
            None => self.inner.select(group).await,
        }
    }
}

impl RepeatedDates {
    /// Start building a new action.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use chronalign::RepeatedDates;
    /// use serde_json::json;
    ///
    /// let action = RepeatedDates::builder()
    ///     .source(Arc::new(archive))
    ///     .mode("closest", json!({"frequency": "6h", "maximum": "2d"}))
    ///     .build()?;
    /// let fields = action.select(&group).await?.datasource()?;
    /// ```
    #[must_use]
    pub const fn builder() -> RepeatedDatesBuilder {
        RepeatedDatesBuilder::new()
    }

    /// The alignment mode in use.
    #[must_use]
    pub const fn mode(&self) -> AlignmentMode {
        self.mode
    }

    /// The inner source.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    /// A copy of the strategy as it is now, including the closest strategy's
    /// probed and found dates.
    pub async fn strategy_snapshot(&self) -> AlignmentStrategy {
        self.strategy.lock().await.clone()
    }

    /// Wrap an inner fetch with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "chronalign::core::fetch_with_timeout",
            skip(source, group),
            fields(
                source = source.name(),
                group = %group,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn fetch_with_timeout(
        source: &dyn DataSource,
        timeout: Duration,
        group: &GroupOfDates,
    ) -> Result<FetchResult, AlignError> {
        (tokio::time::timeout(timeout, source.select(group)).await).unwrap_or_else(|_| {
            Err(AlignError::source_timeout(
                source.name(),
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ))
        })
    }

    /// Align `requested`, fetch once per pair, and join the results.
    ///
    /// # Errors
    /// Errors from the strategy and from the inner source, unchanged. A fetch
    /// exceeding the configured timeout yields `AlignError::SourceTimeout`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "chronalign::core::select",
            skip(self, requested),
            fields(source = self.source.name(), mode = %self.mode, requested = %requested),
        )
    )]
    pub async fn select(&self, requested: &GroupOfDates) -> Result<JoinedResult, AlignError> {
        let inner = Bounded {
            inner: self.source.as_ref(),
            timeout: self.fetch_timeout,
        };

        let pairs = {
            let mut strategy = self.strategy.lock().await;
            strategy.transform(&inner, requested).await?
        };

        let mut results = Vec::with_capacity(pairs.len());
        for pair in pairs {
            #[cfg(feature = "tracing")]
            tracing::debug!(fetch = %pair.fetch, replicate = %pair.replicate, "alignment pair");
            let fetched = inner.select(&pair.fetch).await?;
            results.push(AlignmentResult::new(fetched, pair.replicate));
        }
        Ok(JoinedResult::new(requested.clone(), results))
    }
}

#[async_trait]
impl DataSource for RepeatedDates {
    fn name(&self) -> &str {
        &self.name
    }

    async fn select(&self, group: &GroupOfDates) -> Result<FetchResult, AlignError> {
        Self::select(self, group).await?.into_fetch_result()
    }
}

impl core::fmt::Debug for RepeatedDates {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RepeatedDates")
            .field("name", &self.name)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}
