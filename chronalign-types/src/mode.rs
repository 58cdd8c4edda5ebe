use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AlignError;

/// Registered alignment modes.
///
/// These map one-to-one with the strategies built by the core factory and
/// give a stable label for configuration files, logs, and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    /// Nearest date with usable data inside a bounded search window.
    Closest,
    /// Fixed reference date sharing the requested day (and optionally hour).
    Climatology,
    /// One configured date broadcast over every requested date.
    Constant,
}

impl AlignmentMode {
    /// Every registered mode, in declaration order.
    pub const ALL: [Self; 3] = [Self::Closest, Self::Climatology, Self::Constant];

    /// Stable lowercase identifier used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closest => "closest",
            Self::Climatology => "climatology",
            Self::Constant => "constant",
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignmentMode {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                AlignError::configuration(format!(
                    "invalid alignment mode '{s}' (expected one of: closest, climatology, constant)"
                ))
            })
    }
}
