//! Configuration types consumed by the strategy factory and the orchestrator.

use chrono::{DateTime, Utc};
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::AlignmentMode;

/// A duration as written in configuration.
///
/// Either the compact `"<N><unit>"` text form (`"6h"`, `"30d"`, `"-15m"`) or a
/// bare integer, which counts hours. Parsing into an actual time span happens
/// in `chronalign-core` so that malformed values surface as configuration
/// errors when the strategy is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencySpec {
    /// Whole hours.
    Hours(i64),
    /// Compact text form.
    Text(String),
}

impl From<&str> for FrequencySpec {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for FrequencySpec {
    fn from(h: i64) -> Self {
        Self::Hours(h)
    }
}

impl fmt::Display for FrequencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hours(h) => write!(f, "{h}h"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn default_frequency() -> FrequencySpec {
    FrequencySpec::Text("1h".to_string())
}

fn default_maximum() -> FrequencySpec {
    FrequencySpec::Text("30d".to_string())
}

/// Options for the `closest` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClosestOptions {
    /// Step used when enumerating candidate dates. Defaults to one hour.
    #[serde(default = "default_frequency")]
    pub frequency: FrequencySpec,
    /// Half-width of the search window around each requested date. Defaults to 30 days.
    #[serde(default = "default_maximum")]
    pub maximum: FrequencySpec,
    /// Treat a fetched field whose values are all missing as "not found".
    #[serde(default)]
    pub skip_all_nans: bool,
}

impl Default for ClosestOptions {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            maximum: default_maximum(),
            skip_all_nans: false,
        }
    }
}

/// Options for the `climatology` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimatologyOptions {
    /// Year substituted into every requested date.
    pub year: i32,
    /// Day of month substituted into every requested date.
    pub day: u32,
    /// Optional hour; when set, minutes and seconds are zeroed as well.
    #[serde(default)]
    pub hour: Option<u32>,
}

/// Options for the `constant` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstantOptions {
    /// Reference date fetched once and broadcast. `None` passes the requested
    /// group through without fetching any date.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Typed alignment configuration, internally tagged by `mode`.
///
/// ```
/// use chronalign_types::{AlignmentConfig, AlignmentMode};
///
/// let cfg: AlignmentConfig = serde_json::from_str(
///     r#"{"mode": "climatology", "year": 2000, "day": 15}"#,
/// ).unwrap();
/// assert_eq!(cfg.mode(), AlignmentMode::Climatology);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AlignmentConfig {
    /// Nearest available date.
    Closest(ClosestOptions),
    /// Climatological reference date.
    Climatology(ClimatologyOptions),
    /// Single constant date.
    Constant(ConstantOptions),
}

impl AlignmentConfig {
    /// The mode label for this configuration.
    #[must_use]
    pub const fn mode(&self) -> AlignmentMode {
        match self {
            Self::Closest(_) => AlignmentMode::Closest,
            Self::Climatology(_) => AlignmentMode::Climatology,
            Self::Constant(_) => AlignmentMode::Constant,
        }
    }
}

/// Configuration for a repeated-dates action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedDatesConfig {
    /// Alignment strategy and its options.
    pub alignment: AlignmentConfig,
    /// Optional bound on every inner source fetch, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_ms: Option<u64>,
}
