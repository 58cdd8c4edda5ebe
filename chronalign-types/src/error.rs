use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the chronalign workspace.
///
/// Covers configuration problems detected at construction time, missing data
/// detected while aligning, identity clashes between input fields, and
/// failures reported by inner data sources.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlignError {
    /// Unknown alignment mode, malformed duration, or invalid options.
    ///
    /// Always raised eagerly while building strategies or actions, never while fetching.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The inner source returned nothing usable for a candidate window.
    #[error("no data: {what}")]
    NoData {
        /// Description of what was searched for, e.g. "closest dates for [...]".
        what: String,
    },

    /// A fetch nominally succeeded but produced no field to materialize.
    #[error("no input data: {what}")]
    NoInputData {
        /// Description of the aligned group that came back empty.
        what: String,
    },

    /// Two input fields resolved to the same identity key.
    #[error("duplicate field {param} for {key}")]
    DuplicateField {
        /// Parameter name shared by both fields.
        param: String,
        /// Rendered identity key, e.g. "valid_datetime=...,level=850".
        key: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// An inner data source returned an error.
    #[error("{name} failed: {msg}")]
    Source {
        /// Name of the source that failed.
        name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An inner source fetch exceeded the configured timeout.
    #[error("source timed out: {name} after {timeout_ms}ms")]
    SourceTimeout {
        /// Name of the source that timed out.
        name: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl AlignError {
    /// Helper: build a `Configuration` error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Helper: build a `NoData` error for a description of what was searched.
    pub fn no_data(what: impl Into<String>) -> Self {
        Self::NoData { what: what.into() }
    }

    /// Helper: build a `NoInputData` error.
    pub fn no_input_data(what: impl Into<String>) -> Self {
        Self::NoInputData { what: what.into() }
    }

    /// Helper: build a `DuplicateField` error.
    pub fn duplicate_field(param: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateField {
            param: param.into(),
            key: key.into(),
        }
    }

    /// Helper: build a `Source` error tagged with the source name.
    pub fn source(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            name: name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(name: impl Into<String>, timeout_ms: u64) -> Self {
        Self::SourceTimeout {
            name: name.into(),
            timeout_ms,
        }
    }

    /// Returns true for the missing-data family (`NoData`, `NoInputData`).
    ///
    /// Pipelines use this to tell "the archive has a hole here" apart from
    /// configuration mistakes and transport failures.
    #[must_use]
    pub const fn is_missing_data(&self) -> bool {
        matches!(self, Self::NoData { .. } | Self::NoInputData { .. })
    }

    /// Returns true if this error was raised while validating configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
