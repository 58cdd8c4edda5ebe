//! Provider metadata shared across crates.

use std::sync::Arc;

use core::fmt;
use serde::{Deserialize, Serialize};

/// Opaque key identifying which upstream dates provider produced a group of dates.
///
/// Cheap to clone; groups derived from another group carry the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderKey(Arc<str>);

impl ProviderKey {
    /// Construct a key from any string-like name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Key used for groups built without an explicit provider.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new("anonymous")
    }

    /// Returns the inner name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProviderKey {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl From<&str> for ProviderKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
