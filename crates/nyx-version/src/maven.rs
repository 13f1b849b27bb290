use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VersionError;
use crate::Scheme;

/// A Maven-style coordinate version: three numeric components plus an
/// optional qualifier (`-SNAPSHOT`, `-alpha`, ...). A version without a
/// qualifier is considered newer than the same numeric version carrying
/// one, matching Maven's own release-over-qualifier ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MavenVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub qualifier: Option<String>,
}

impl MavenVersion {
    #[must_use]
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch, qualifier: None }
    }

    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let (numeric, qualifier) = match input.split_once('-') {
            Some((n, q)) => (n, Some(q.to_string())),
            None => (input, None),
        };
        let malformed = || VersionError::MalformedVersion {
            scheme: Scheme::Maven,
            input: input.to_string(),
        };

        let mut parts = numeric.split('.');
        let major = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let minor = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let patch = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        if parts.next().is_some() {
            return Err(malformed());
        }
        if qualifier.as_deref().is_some_and(str::is_empty) {
            return Err(malformed());
        }

        Ok(Self { major, minor, patch, qualifier })
    }
}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "-{qualifier}")?;
        }
        Ok(())
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.qualifier, &other.qualifier) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}
