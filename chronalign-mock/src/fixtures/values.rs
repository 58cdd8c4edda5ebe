use chrono::{Datelike, Timelike};
use chronalign_core::Timestamp;

/// Grid points per synthetic field.
pub const GRID_POINTS: usize = 4;

fn base(param: &str) -> f64 {
    match param {
        "2t" => 280.0,
        "2d" => 275.0,
        "msl" => 101_325.0,
        "tp" => 0.0,
        _ => 1.0,
    }
}

/// Deterministic values for `param` at `date`.
///
/// A daily cycle on top of a per-parameter base, shifted per grid point.
/// Values depend only on day of year and hour, so dates within one year get
/// distinct arrays while the same day and hour in different years repeat.
pub fn synthetic(param: &str, date: Timestamp) -> Vec<f64> {
    let hour = f64::from(date.hour());
    let day = f64::from(date.ordinal());
    (0..GRID_POINTS)
        .map(|i| base(param) + hour / 4.0 + day / 100.0 + i as f64)
        .collect()
}

pub fn all_nans() -> Vec<f64> {
    vec![f64::NAN; GRID_POINTS]
}
