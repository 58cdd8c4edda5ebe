//! The `Field` capability and the in-memory and re-timestamped implementations.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Metadata key holding the instant a field is valid for.
pub const VALID_DATETIME: &str = "valid_datetime";

/// A single metadata value attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// An integer value, e.g. a pressure level.
    Int(i64),
    /// A floating point value.
    Float(f64),
    /// An instant.
    DateTime(Timestamp),
    /// A free-form string, e.g. a parameter name.
    Text(String),
}

impl MetadataValue {
    /// The value as an instant, if it holds one.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<Timestamp> {
        match self {
            Self::DateTime(d) => Some(*d),
            _ => None,
        }
    }

    /// The value as a string slice, if it holds text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::DateTime(d) => f.write_str(&d.to_rfc3339()),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Timestamp> for MetadataValue {
    fn from(v: Timestamp) -> Self {
        Self::DateTime(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// A gridded physical field as seen by the alignment engine.
///
/// Implementations are owned by data sources. The engine only reads metadata
/// and values; it never mutates a field.
pub trait Field: Send + Sync + fmt::Debug {
    /// Look up one metadata entry.
    fn metadata(&self, key: &str) -> Option<MetadataValue>;

    /// The numeric values of the field. Missing points are `NaN`.
    fn values(&self) -> &[f64];

    /// The instant this field is valid for, read from [`VALID_DATETIME`].
    fn valid_datetime(&self) -> Option<Timestamp> {
        self.metadata(VALID_DATETIME).and_then(|v| v.as_datetime())
    }

    /// True when every value is missing. An empty field counts as missing.
    fn is_all_missing(&self) -> bool {
        self.values().iter().all(|v| v.is_nan())
    }
}

/// Shared handle to a field.
pub type FieldRef = Arc<dyn Field>;

/// Ordered list of shared fields.
pub type FieldList = Vec<FieldRef>;

/// A field held entirely in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayField {
    metadata: BTreeMap<String, MetadataValue>,
    values: Arc<[f64]>,
}

impl ArrayField {
    /// Create a field for `param` valid at `valid_datetime`.
    pub fn new(param: impl Into<String>, valid_datetime: Timestamp, values: Vec<f64>) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert("param".to_string(), MetadataValue::Text(param.into()));
        metadata.insert(
            VALID_DATETIME.to_string(),
            MetadataValue::DateTime(valid_datetime),
        );
        Self {
            metadata,
            values: values.into(),
        }
    }

    /// Add or replace a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Wrap into a shared [`FieldRef`].
    #[must_use]
    pub fn into_ref(self) -> FieldRef {
        Arc::new(self)
    }
}

impl Field for ArrayField {
    fn metadata(&self, key: &str) -> Option<MetadataValue> {
        self.metadata.get(key).cloned()
    }

    fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A view of another field that reports a different valid instant.
///
/// Every other metadata key and the values are read from the wrapped field,
/// which is shared, not copied.
#[derive(Debug, Clone)]
pub struct RetimedField {
    inner: FieldRef,
    valid_datetime: Timestamp,
}

impl RetimedField {
    /// Wrap `inner` so that it reports `valid_datetime`.
    #[must_use]
    pub fn new(inner: FieldRef, valid_datetime: Timestamp) -> Self {
        Self {
            inner,
            valid_datetime,
        }
    }

    /// The wrapped field.
    #[must_use]
    pub const fn inner(&self) -> &FieldRef {
        &self.inner
    }
}

impl Field for RetimedField {
    fn metadata(&self, key: &str) -> Option<MetadataValue> {
        if key == VALID_DATETIME {
            return Some(MetadataValue::DateTime(self.valid_datetime));
        }
        self.inner.metadata(key)
    }

    fn values(&self) -> &[f64] {
        self.inner.values()
    }

    fn valid_datetime(&self) -> Option<Timestamp> {
        Some(self.valid_datetime)
    }
}

/// Return a field identical to `field` except for its valid instant.
#[must_use]
pub fn new_field_with_valid_datetime(field: &FieldRef, date: Timestamp) -> FieldRef {
    Arc::new(RetimedField::new(Arc::clone(field), date))
}
