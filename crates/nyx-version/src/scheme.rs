use serde::{Deserialize, Serialize};

/// A versioning scheme. SemVer is the default; Maven is supported for
/// repositories that publish to Maven-style coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    SemVer,
    Maven,
}

impl Default for Scheme {
    fn default() -> Self {
        Self::SemVer
    }
}
