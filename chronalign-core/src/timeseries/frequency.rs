use chrono::TimeDelta;
use chronalign_types::{AlignError, FrequencySpec};

/// Parse a compact duration string into a signed `TimeDelta`.
///
/// Accepted forms are an optional sign, an integer, and an optional unit:
/// `s` (seconds), `m` (minutes), `h` (hours), `d` (days), `w` (weeks).
/// A bare integer counts hours.
///
/// ```
/// use chronalign_core::parse_frequency;
/// use chrono::TimeDelta;
///
/// assert_eq!(parse_frequency("6h").unwrap(), TimeDelta::hours(6));
/// assert_eq!(parse_frequency("30d").unwrap(), TimeDelta::days(30));
/// assert_eq!(parse_frequency("-15m").unwrap(), TimeDelta::minutes(-15));
/// assert_eq!(parse_frequency("12").unwrap(), TimeDelta::hours(12));
/// assert!(parse_frequency("1y").is_err());
/// ```
///
/// # Errors
/// Returns `AlignError::Configuration` when the text is empty, has no digits,
/// uses an unknown unit, or does not fit in a `TimeDelta`.
pub fn parse_frequency(text: &str) -> Result<TimeDelta, AlignError> {
    let s = text.trim();
    let malformed = || AlignError::configuration(format!("malformed duration '{text}'"));

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let split = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, unit) = rest.split_at(split);
    if digits.is_empty() {
        return Err(malformed());
    }
    let mut n: i64 = digits.parse().map_err(|_| malformed())?;
    if negative {
        n = -n;
    }

    let delta = match unit {
        "s" => TimeDelta::try_seconds(n),
        "m" => TimeDelta::try_minutes(n),
        "" | "h" => TimeDelta::try_hours(n),
        "d" => TimeDelta::try_days(n),
        "w" => TimeDelta::try_weeks(n),
        _ => None,
    };
    delta.ok_or_else(malformed)
}

/// Resolve a configured [`FrequencySpec`] into a `TimeDelta`.
///
/// # Errors
/// Same conditions as [`parse_frequency`].
pub fn frequency_to_timedelta(spec: &FrequencySpec) -> Result<TimeDelta, AlignError> {
    match spec {
        FrequencySpec::Hours(h) => TimeDelta::try_hours(*h)
            .ok_or_else(|| AlignError::configuration(format!("duration out of range: {h}h"))),
        FrequencySpec::Text(s) => parse_frequency(s),
    }
}

/// Render a `TimeDelta` in the largest whole unit that represents it exactly.
#[must_use]
pub fn format_frequency(delta: TimeDelta) -> String {
    let secs = delta.num_seconds();
    if secs != 0 && delta.subsec_nanos() == 0 {
        for (unit, size) in [("w", 604_800), ("d", 86_400), ("h", 3_600), ("m", 60)] {
            if secs % size == 0 {
                return format!("{}{unit}", secs / size);
            }
        }
    }
    format!("{secs}s")
}
