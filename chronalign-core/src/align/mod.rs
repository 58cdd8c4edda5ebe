//! Alignment strategies: map requested dates onto the dates actually fetched.
//!
//! - `closest`: nearest date with data, probed through the inner source
//! - `climatology`: fixed reference year and day
//! - `constant`: one date for everything

mod climatology;
mod closest;
mod constant;
mod pair;

use core::fmt;
use core::str::FromStr;

use serde::de::DeserializeOwned;

pub use climatology::ClimatologyAlignment;
pub use closest::{ClosestAlignment, MAX_CANDIDATE_STEPS};
pub use constant::ConstantAlignment;
pub use pair::{AlignmentPair, AlignmentPairs};

use crate::dates::GroupOfDates;
use crate::source::DataSource;
use crate::timeseries::frequency::format_frequency;
use crate::{AlignError, AlignmentConfig, AlignmentMode};

/// One of the registered alignment strategies.
#[derive(Debug, Clone)]
pub enum AlignmentStrategy {
    /// See [`ClosestAlignment`].
    Closest(ClosestAlignment),
    /// See [`ClimatologyAlignment`].
    Climatology(ClimatologyAlignment),
    /// See [`ConstantAlignment`].
    Constant(ConstantAlignment),
}

fn parse_options<T: DeserializeOwned>(
    mode: AlignmentMode,
    options: &serde_json::Value,
) -> Result<T, AlignError> {
    let options = if options.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        options.clone()
    };
    serde_json::from_value(options)
        .map_err(|e| AlignError::configuration(format!("{mode}: invalid options: {e}")))
}

impl AlignmentStrategy {
    /// Build a strategy from a mode name and a JSON object of options.
    ///
    /// `null` options mean "all defaults".
    ///
    /// ```
    /// use chronalign_core::{AlignmentMode, AlignmentStrategy};
    /// use serde_json::json;
    ///
    /// let s = AlignmentStrategy::from_mode("closest", &json!({"frequency": "6h"})).unwrap();
    /// assert_eq!(s.mode(), AlignmentMode::Closest);
    ///
    /// assert!(AlignmentStrategy::from_mode("nearest", &json!({})).is_err());
    /// assert!(AlignmentStrategy::from_mode("climatology", &json!({"year": 2000})).is_err());
    /// ```
    ///
    /// # Errors
    /// `AlignError::Configuration` for an unknown mode, unknown or mistyped
    /// option keys, malformed durations, or out-of-range values.
    pub fn from_mode(mode: &str, options: &serde_json::Value) -> Result<Self, AlignError> {
        let mode = AlignmentMode::from_str(mode)?;
        let config = match mode {
            AlignmentMode::Closest => AlignmentConfig::Closest(parse_options(mode, options)?),
            AlignmentMode::Climatology => {
                AlignmentConfig::Climatology(parse_options(mode, options)?)
            }
            AlignmentMode::Constant => AlignmentConfig::Constant(parse_options(mode, options)?),
        };
        Self::from_config(&config)
    }

    /// Build a strategy from typed configuration.
    ///
    /// # Errors
    /// `AlignError::Configuration` for malformed durations or out-of-range values.
    pub fn from_config(config: &AlignmentConfig) -> Result<Self, AlignError> {
        Ok(match config {
            AlignmentConfig::Closest(o) => Self::Closest(ClosestAlignment::from_options(o)?),
            AlignmentConfig::Climatology(o) => {
                Self::Climatology(ClimatologyAlignment::from_options(o)?)
            }
            AlignmentConfig::Constant(o) => Self::Constant(ConstantAlignment::from_options(o)),
        })
    }

    /// The mode label of this strategy.
    #[must_use]
    pub const fn mode(&self) -> AlignmentMode {
        match self {
            Self::Closest(_) => AlignmentMode::Closest,
            Self::Climatology(_) => AlignmentMode::Climatology,
            Self::Constant(_) => AlignmentMode::Constant,
        }
    }

    /// Turn `requested` into fetch/replicate pairs.
    ///
    /// Only the closest strategy talks to `source`; it also updates its
    /// memory of probed dates, hence `&mut self`.
    ///
    /// # Errors
    /// Strategy-specific errors, see each strategy's `transform`.
    pub async fn transform(
        &mut self,
        source: &dyn DataSource,
        requested: &GroupOfDates,
    ) -> Result<AlignmentPairs, AlignError> {
        match self {
            Self::Closest(s) => s.transform(source, requested).await,
            Self::Climatology(s) => s.transform(requested),
            Self::Constant(s) => Ok(s.transform(requested)),
        }
    }
}

impl fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closest(s) => write!(
                f,
                "closest(frequency={}, maximum={}, skip_all_nans={})",
                format_frequency(s.frequency()),
                format_frequency(s.maximum()),
                s.skip_all_nans()
            ),
            Self::Climatology(s) => match s.hour() {
                Some(h) => write!(f, "climatology(year={}, day={}, hour={h})", s.year(), s.day()),
                None => write!(f, "climatology(year={}, day={})", s.year(), s.day()),
            },
            Self::Constant(s) => match s.date() {
                Some(d) => write!(f, "constant(date={})", d.to_rfc3339()),
                None => f.write_str("constant(date=None)"),
            },
        }
    }
}
