//! Time-series utilities shared by strategies and dates providers.
//!
//! - `frequency`: parse and render compact durations such as `"6h"` or `"30d"`
/// Duration parsing and formatting.
pub mod frequency;
