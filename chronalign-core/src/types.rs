//! Re-export of foundational types from `chronalign-types`.
// Consolidated re-exports so downstream crates can depend on `chronalign-core` only

pub use chronalign_types::{AlignError, AlignmentMode, ProviderKey};
pub use chronalign_types::{
    AlignmentConfig, ClimatologyOptions, ClosestOptions, ConstantOptions, FrequencySpec,
    RepeatedDatesConfig,
};

/// A UTC instant. Every date handled by the alignment engine uses this type.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
