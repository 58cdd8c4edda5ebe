//! chronalign-core
//!
//! Core types, traits, and alignment strategies shared across the chronalign crates.
//!
//! - `types`: timestamps and re-exported errors/configuration.
//! - `dates`: `GroupOfDates` batches and the `DateRange` provider.
//! - `field`: the `Field` capability, in-memory fields, and re-timestamped views.
//! - `source`: the `DataSource` trait and `FetchResult`.
//! - `align`: the closest, climatology, and constant strategies and their factory.
//! - `pairing`: identity-keyed grouping of related parameters.
//! - `timeseries`: duration parsing and formatting.
//!
//! Async runtime
//! -------------
//! `DataSource::select` is async and the closest strategy awaits its inner
//! source while it probes candidates. Nothing in this crate spawns tasks or
//! depends on a specific executor; the orchestrator crate uses Tokio.
//!
#![warn(missing_docs)]

/// Alignment strategies and the strategy factory.
pub mod align;
/// Groups of dates and date-range providers.
pub mod dates;
pub mod field;
pub mod pairing;
/// Data source trait and fetch results.
pub mod source;
/// Time-series utilities for parsing durations.
pub mod timeseries;
pub mod types;

pub use align::{
    AlignmentPair, AlignmentPairs, AlignmentStrategy, ClimatologyAlignment, ClosestAlignment,
    ConstantAlignment, MAX_CANDIDATE_STEPS,
};
pub use dates::{DateRange, GroupOfDates};
pub use field::{
    ArrayField, Field, FieldList, FieldRef, MetadataValue, RetimedField, VALID_DATETIME,
    new_field_with_valid_datetime,
};
pub use pairing::{IdentityGroup, Pairing, pair_by_identity};
pub use source::{DataSource, FetchResult};
pub use timeseries::frequency::{format_frequency, frequency_to_timedelta, parse_frequency};
pub use types::*;
