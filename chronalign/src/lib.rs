//! chronalign assembles aligned time series for ML weather datasets.
//!
//! Overview
//! - A [`RepeatedDates`] action receives a group of requested dates, asks an
//!   alignment strategy which dates to actually fetch, fetches each of them
//!   once from its inner source, and re-timestamps the results onto every
//!   requested date they stand in for.
//! - Strategies live in `chronalign_core`: `closest` probes the inner source
//!   for the nearest available date, `climatology` substitutes a fixed year
//!   and day, `constant` broadcasts one date.
//! - A [`Join`] action concatenates the fields of several sources.
//! - A [`Concat`] action routes each requested date to the source whose
//!   date range holds it.
//! - All actions implement `DataSource`, so they nest.
//!
//! Key behaviors
//! - The closest strategy remembers every date it probed and every date it
//!   found for the lifetime of the action. Calls to `select` on the same
//!   action are serialized around the strategy.
//! - Missing data is an error, never a silent skip: an empty fetch yields
//!   `AlignError::NoInputData` when the result is materialized.
//! - Inner fetches can be bounded with a timeout; an expired fetch yields
//!   `AlignError::SourceTimeout`.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use chronalign::RepeatedDates;
//! use chronalign_core::{GroupOfDates, ProviderKey};
//! use serde_json::json;
//!
//! let action = RepeatedDates::builder()
//!     .source(Arc::new(archive))
//!     .mode("climatology", json!({"year": 2000, "day": 15}))
//!     .build()?;
//!
//! let group = GroupOfDates::new(dates, ProviderKey::new("training"))?;
//! for field in action.select(&group).await?.datasource()? {
//!     println!("{:?}", field.valid_datetime());
//! }
//! ```
#![warn(missing_docs)]

mod concat;
pub(crate) mod core;
mod join;
mod result;

pub use concat::Concat;
pub use core::{RepeatedDates, RepeatedDatesBuilder};
pub use join::Join;
pub use result::{AlignmentResult, JoinedResult};

pub use chronalign_core::{
    AlignError, AlignmentConfig, AlignmentMode, AlignmentStrategy, DataSource, DateRange,
    FetchResult, GroupOfDates, ProviderKey, RepeatedDatesConfig,
};
