use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bump::BumpId;
use crate::error::VersionError;
use crate::maven::MavenVersion;
use crate::scheme::Scheme;

/// A version under one of the supported schemes. Construction always goes
/// through [`Version::parse`]; values are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", content = "value", rename_all = "lowercase")]
pub enum Version {
    SemVer(semver::Version),
    Maven(MavenVersion),
}

impl Version {
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        match self {
            Self::SemVer(_) => Scheme::SemVer,
            Self::Maven(_) => Scheme::Maven,
        }
    }

    /// Parses `s` under `scheme`. Leading/trailing whitespace is never
    /// tolerated; arbitrary textual prefixes are the caller's job to strip
    /// (see `releasePrefix`/`releaseLenient` in the configuration layer).
    pub fn parse(scheme: Scheme, s: &str) -> Result<Self, VersionError> {
        match scheme {
            Scheme::SemVer => semver::Version::parse(s)
                .map(Version::SemVer)
                .map_err(|_| VersionError::MalformedVersion { scheme, input: s.to_string() }),
            Scheme::Maven => MavenVersion::parse(s).map(Version::Maven),
        }
    }

    #[must_use]
    pub fn valid(scheme: Scheme, s: &str) -> bool {
        Self::parse(scheme, s).is_ok()
    }

    /// The scheme's default initial version: `0.1.0` for both schemes
    /// supported here.
    #[must_use]
    pub fn default_initial(scheme: Scheme) -> Self {
        match scheme {
            Scheme::SemVer => Version::SemVer(semver::Version::new(0, 1, 0)),
            Scheme::Maven => Version::Maven(MavenVersion::new(0, 1, 0)),
        }
    }

    /// Applies a bump identifier, producing a new version. `major`/`minor`/
    /// `patch` clear any prerelease tail; any other identifier attaches or
    /// advances a numeric prerelease counter under that qualifier (e.g.
    /// `1.2.3 -> 1.2.3-alpha.1`, `1.2.3-alpha.1 -> 1.2.3-alpha.2`).
    pub fn bump(&self, id: &BumpId) -> Result<Self, VersionError> {
        match self {
            Version::SemVer(v) => Ok(Version::SemVer(bump_semver(v, id))),
            Version::Maven(v) => Ok(Version::Maven(bump_maven(v, id))),
        }
    }

    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Version::SemVer(a), Version::SemVer(b)) => Some(a.cmp(b)),
            (Version::Maven(a), Version::Maven(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// The greatest version in `versions` matching `filter`, or `None` if
    /// no candidate passes the filter.
    pub fn most_recent<'a>(
        versions: impl IntoIterator<Item = &'a Version>,
        filter: impl Fn(&Version) -> bool,
    ) -> Option<&'a Version> {
        versions
            .into_iter()
            .filter(|v| filter(v))
            .max_by(|a, b| a.compare(b).unwrap_or(Ordering::Equal))
    }

    /// Sets the prerelease tail to `<qualifier>.<n>`, used by collapsed
    /// versioning (spec for the Infer command). Only meaningful for SemVer.
    pub fn with_prerelease(&self, qualifier: &str, n: u64) -> Result<Self, VersionError> {
        match self {
            Version::SemVer(v) => {
                let pre = semver::Prerelease::new(&format!("{qualifier}.{n}"))
                    .map_err(|_| VersionError::MalformedVersion {
                        scheme: Scheme::SemVer,
                        input: format!("{qualifier}.{n}"),
                    })?;
                let mut out = v.clone();
                out.pre = pre;
                Ok(Version::SemVer(out))
            }
            Version::Maven(v) => {
                let mut out = v.clone();
                out.qualifier = Some(format!("{qualifier}.{n}"));
                Ok(Version::Maven(out))
            }
        }
    }

    /// The version with any prerelease tail stripped, keeping only the
    /// numeric triple. Used by collapsed versioning to recover the shared
    /// base version from a previously minted `<base>-<qualifier>.<n>` tag.
    #[must_use]
    pub fn base(&self) -> Self {
        match self {
            Version::SemVer(v) => {
                let mut out = v.clone();
                out.pre = semver::Prerelease::EMPTY;
                out.build = semver::BuildMetadata::EMPTY;
                Version::SemVer(out)
            }
            Version::Maven(v) => {
                let mut out = v.clone();
                out.qualifier = None;
                Version::Maven(out)
            }
        }
    }

    /// The numeric prerelease counter already attached under `qualifier`,
    /// if any (e.g. `2` for `1.3.0-alpha.2`).
    #[must_use]
    pub fn prerelease_counter(&self, qualifier: &str) -> Option<u64> {
        match self {
            Version::SemVer(v) => {
                let pre = v.pre.as_str();
                let rest = pre.strip_prefix(qualifier)?.strip_prefix('.')?;
                rest.parse().ok()
            }
            Version::Maven(v) => {
                let q = v.qualifier.as_deref()?;
                let rest = q.strip_prefix(qualifier)?.strip_prefix('.')?;
                rest.parse().ok()
            }
        }
    }
}

fn bump_maven(v: &MavenVersion, id: &BumpId) -> MavenVersion {
    let mut out = v.clone();
    match id {
        BumpId::Major => {
            out.major += 1;
            out.minor = 0;
            out.patch = 0;
            out.qualifier = None;
        }
        BumpId::Minor => {
            out.minor += 1;
            out.patch = 0;
            out.qualifier = None;
        }
        BumpId::Patch => {
            out.patch += 1;
            out.qualifier = None;
        }
        BumpId::Prerelease(qualifier) => {
            let counter = v
                .qualifier
                .as_deref()
                .and_then(|q| q.strip_prefix(qualifier.as_str()))
                .and_then(|rest| rest.strip_prefix('.'))
                .and_then(|n| n.parse::<u64>().ok())
                .map_or(1, |n| n + 1);
            out.qualifier = Some(format!("{qualifier}.{counter}"));
        }
    }
    out
}

fn bump_semver(v: &semver::Version, id: &BumpId) -> semver::Version {
    let mut out = v.clone();
    out.build = semver::BuildMetadata::EMPTY;
    match id {
        BumpId::Major => {
            out.major += 1;
            out.minor = 0;
            out.patch = 0;
            out.pre = semver::Prerelease::EMPTY;
        }
        BumpId::Minor => {
            out.minor += 1;
            out.patch = 0;
            out.pre = semver::Prerelease::EMPTY;
        }
        BumpId::Patch => {
            out.patch += 1;
            out.pre = semver::Prerelease::EMPTY;
        }
        BumpId::Prerelease(qualifier) => {
            let counter = v
                .pre
                .as_str()
                .strip_prefix(qualifier.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .and_then(|n| n.parse::<u64>().ok())
                .map_or(1, |n| n + 1);
            out.pre = semver::Prerelease::new(&format!("{qualifier}.{counter}"))
                .unwrap_or(semver::Prerelease::EMPTY);
        }
    }
    out
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::SemVer(v) => write!(f, "{v}"),
            Version::Maven(v) => write!(f, "{v}"),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_render_round_trip_semver() {
        for s in ["0.1.0", "1.2.3-alpha.1", "1.2.3+build.7"] {
            let v = Version::parse(Scheme::SemVer, s).unwrap();
            assert_eq!(v.to_string(), s);
        }
    }

    #[test]
    fn bump_major_clears_prerelease_and_build() {
        let v = Version::parse(Scheme::SemVer, "1.2.3-alpha.1+b").unwrap();
        let bumped = v.bump(&BumpId::Major).unwrap();
        assert_eq!(bumped.to_string(), "2.0.0");
    }

    #[test]
    fn bump_prerelease_attaches_counter_then_advances() {
        let v = Version::parse(Scheme::SemVer, "1.2.3").unwrap();
        let alpha1 = v.bump(&BumpId::Prerelease("alpha".into())).unwrap();
        assert_eq!(alpha1.to_string(), "1.2.3-alpha.1");
        let alpha2 = alpha1.bump(&BumpId::Prerelease("alpha".into())).unwrap();
        assert_eq!(alpha2.to_string(), "1.2.3-alpha.2");
    }

    #[test]
    fn compare_is_total_and_transitive() {
        let a = Version::parse(Scheme::SemVer, "1.0.0").unwrap();
        let b = Version::parse(Scheme::SemVer, "1.1.0").unwrap();
        let c = Version::parse(Scheme::SemVer, "2.0.0").unwrap();
        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert_eq!(b.compare(&c), Some(Ordering::Less));
        assert_eq!(a.compare(&c), Some(Ordering::Less));
    }

    #[test]
    fn most_recent_honors_filter() {
        let versions = vec![
            Version::parse(Scheme::SemVer, "1.0.0").unwrap(),
            Version::parse(Scheme::SemVer, "2.0.0").unwrap(),
            Version::parse(Scheme::SemVer, "1.5.0").unwrap(),
        ];
        let found = Version::most_recent(versions.iter(), |v| v.to_string() != "2.0.0").unwrap();
        assert_eq!(found.to_string(), "1.5.0");
    }

    #[test]
    fn default_initial_is_0_1_0() {
        assert_eq!(Version::default_initial(Scheme::SemVer).to_string(), "0.1.0");
        assert_eq!(Version::default_initial(Scheme::Maven).to_string(), "0.1.0");
    }

    #[test]
    fn malformed_version_is_rejected() {
        assert!(Version::parse(Scheme::SemVer, "not-a-version").is_err());
        assert!(!Version::valid(Scheme::SemVer, "v1.0.0"));
    }

    #[test]
    fn base_strips_prerelease_and_build() {
        let v = Version::parse(Scheme::SemVer, "1.3.0-alpha.2+build.5").unwrap();
        assert_eq!(v.base().to_string(), "1.3.0");
    }

    #[test]
    fn maven_bump_round_trips() {
        let v = Version::parse(Scheme::Maven, "1.0.0-SNAPSHOT").unwrap();
        let bumped = v.bump(&BumpId::Patch).unwrap();
        assert_eq!(bumped.to_string(), "1.0.1");
        let parsed = Version::parse(Scheme::Maven, &bumped.to_string()).unwrap();
        assert_eq!(parsed, bumped);
    }
}
