use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A bump identifier. `Major`/`Minor`/`Patch` are the three scheme-defined
/// levels; any other identifier is treated as the name of a prerelease
/// qualifier to attach or advance (e.g. `alpha`, `rc`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BumpId {
    Major,
    Minor,
    Patch,
    Prerelease(String),
}

impl TryFrom<String> for BumpId {
    type Error = Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BumpId> for String {
    fn from(value: BumpId) -> Self {
        value.to_string()
    }
}

impl BumpId {
    /// The scheme-wide ordering rank used to pick the maximum bump among a
    /// set of significant commits: `major > minor > patch > prerelease`.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Major => 3,
            Self::Minor => 2,
            Self::Patch => 1,
            Self::Prerelease(_) => 0,
        }
    }

    /// Returns the greater of two bump ids by [`rank`](Self::rank); ties
    /// prefer `self`.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if other.rank() > self.rank() { other } else { self }
    }
}

impl FromStr for BumpId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "major" => Self::Major,
            "minor" => Self::Minor,
            "patch" => Self::Patch,
            other => Self::Prerelease(other.to_string()),
        })
    }
}

impl std::fmt::Display for BumpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
            Self::Prerelease(id) => write!(f, "{id}"),
        }
    }
}
