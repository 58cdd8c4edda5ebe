//! Error taxonomy and configuration primitives shared by the chronalign crates.
#![warn(missing_docs)]

mod config;
mod error;
mod mode;
mod provider;

pub use config::{
    AlignmentConfig, ClimatologyOptions, ClosestOptions, ConstantOptions, FrequencySpec,
    RepeatedDatesConfig,
};
pub use error::AlignError;
pub use mode::AlignmentMode;
pub use provider::ProviderKey;
