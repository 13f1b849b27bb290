//! The `Infer` command: walks history, matches commits against the
//! active convention, and computes the next version.

use std::collections::HashMap;

use nyx_commit::{Commit, Tag};
use nyx_config::{Configuration, ReleaseType};
use nyx_convention::{match_commit, select_release_type};
use nyx_git::{Repository, WalkControl};
use nyx_template::Template;
use nyx_version::{BumpId, Version};

use crate::context::template_context;
use crate::error::{CoreError, ReleaseError};
use crate::state::State;

pub struct Infer;

impl Infer {
    /// Runs the full inference algorithm (spec §4.8), producing a new
    /// [`State`] or updating a resumed one in place.
    pub fn run(config: &Configuration, repo: &Repository, mut state: State) -> Result<State, CoreError> {
        let branch = repo.current_branch()?;
        let environment: HashMap<String, String> = std::env::vars().collect();

        let release_types = config.release_types.resolve()?;
        let (_name, release_type) = select_release_type(&branch, &environment, release_types)?
            .ok_or(CoreError::Release(ReleaseError::NoMatchingReleaseType))?;

        let (previous_version, previous_version_commit, commits, previous_version_tags) =
            find_previous_version(config, repo, release_type)?;

        let conventions = config.commit_message_conventions.resolve()?;
        let mut significant_commits = Vec::new();
        for commit in &commits {
            if let Some(parsed) = match_commit(&commit.sha, commit.subject(), conventions.iter().copied())? {
                if parsed.is_significant() {
                    significant_commits.push(parsed);
                }
            }
        }

        let bump = effective_bump(config, &significant_commits, release_type);

        let final_commit = commits.first().map(|c| c.sha.clone()).or_else(|| repo.latest_commit().ok());
        let initial_commit = commits
            .last()
            .map(|c| c.sha.clone())
            .or_else(|| previous_version_commit.clone());

        state.release_scope.previous_version = Some(previous_version.clone());
        state.release_scope.previous_version_commit = previous_version_commit;
        state.release_scope.initial_commit = initial_commit;
        state.release_scope.final_commit = final_commit;
        state.release_scope.commits = commits;
        state.release_scope.significant_commits = significant_commits;

        let version = next_version(
            config,
            &state,
            &branch,
            &previous_version,
            &previous_version_tags,
            bump.as_ref(),
            release_type,
        )?;

        if let Some(range) = effective_version_range(&branch, release_type) {
            if config.scheme == nyx_version::Scheme::SemVer {
                let req = semver::VersionReq::parse(&range)
                    .map_err(|_| CoreError::Release(ReleaseError::VersionRangeViolated))?;
                let nyx_version::Version::SemVer(semver_version) = &version else {
                    return Err(CoreError::Release(ReleaseError::VersionRangeViolated));
                };
                if !req.matches(semver_version) {
                    return Err(CoreError::Release(ReleaseError::VersionRangeViolated));
                }
            }
        }

        state.new_version = Some(version != previous_version);
        state.new_release = Some(state.new_version == Some(true) && release_type.publish);
        state.bump = bump;
        state.version = Some(version);

        Ok(state)
    }
}

/// Walks first-parent from `HEAD` looking for the newest commit carrying
/// a tag that both parses under the scheme and passes the release type's
/// version filter (spec §4.8 step 2), collecting every commit visited
/// before that point as the release scope (step 3).
/// Returns `(previousVersion, previousVersionCommit, releaseScope.commits,
/// previousVersionCommit's own tags)`. The tags of the found commit are
/// returned separately (rather than folded into `commits`) since the walk
/// stops *at* that commit without pushing it onto the scope — collapsed
/// versioning's floor scan (`next_version`) still needs to see them.
fn find_previous_version(
    config: &Configuration,
    repo: &Repository,
    release_type: &ReleaseType,
) -> Result<(Version, Option<String>, Vec<Commit>, Vec<Tag>), CoreError> {
    let mut commits = Vec::new();
    let mut found: Option<(Version, String, Vec<Tag>)> = None;

    repo.walk(None, None, |commit| {
        if let Some(version) = best_tagged_version(commit, config, release_type) {
            found = Some((version, commit.sha.clone(), commit.tags.clone()));
            return WalkControl::Stop;
        }
        commits.push(commit.clone());
        WalkControl::Continue
    })?;

    match found {
        Some((version, sha, tags)) => Ok((version, Some(sha), commits, tags)),
        None => {
            let initial = Version::parse(config.scheme, &config.initial_version)?;
            Ok((initial, None, commits, Vec::new()))
        }
    }
}

/// Among the tags on one commit, the highest version that parses under
/// the scheme and passes the release type's filter (ties broken by
/// taking the maximum, per spec §4.8's tie-break rule).
fn best_tagged_version(commit: &Commit, config: &Configuration, release_type: &ReleaseType) -> Option<Version> {
    commit
        .tags
        .iter()
        .filter_map(|tag| candidate_version(&tag.name, config))
        .filter(|version| passes_version_filter(version, release_type))
        .max_by(|a, b| a.compare(b).unwrap_or(std::cmp::Ordering::Equal))
}

fn candidate_version(tag_name: &str, config: &Configuration) -> Option<Version> {
    let stripped = tag_name.strip_prefix(config.release_prefix.as_str()).or_else(|| {
        config
            .release_lenient
            .then(|| tag_name.trim_start_matches(|c: char| !c.is_ascii_digit()))
    })?;
    Version::parse(config.scheme, stripped).ok()
}

/// A release type with `collapsedVersioning` only considers tags that
/// already carry a prerelease qualifier; any other release type only
/// considers plain (non-prerelease) tags, so a mainline release never
/// picks up a branch's prerelease tag as its previous version.
fn passes_version_filter(version: &Version, release_type: &ReleaseType) -> bool {
    has_prerelease(version) == release_type.collapsed_versioning
}

fn has_prerelease(version: &Version) -> bool {
    match version {
        Version::SemVer(v) => !v.pre.is_empty(),
        Version::Maven(v) => v.qualifier.is_some(),
    }
}

/// A pinned `config.bump` wins outright; otherwise the maximum-rank bump
/// among `significant_commits`, or `None` if none matched. The
/// maintenance-vs-collapsed-versioning distinction from spec §4.8 step 5
/// needs no branch here: `next_version` already treats a `None` bump as
/// "keep `previousVersion`" for a non-collapsed release type, and as "mint
/// a new prerelease on the same base" for a collapsed one.
fn effective_bump(
    config: &Configuration,
    significant_commits: &[nyx_commit::ParsedCommit],
    _release_type: &ReleaseType,
) -> Option<BumpId> {
    if let Some(pinned) = &config.bump {
        return Some(pinned.clone());
    }
    significant_commits
        .iter()
        .filter_map(|c| c.bump.as_deref())
        .map(|id| id.parse::<BumpId>().expect("BumpId::from_str is infallible"))
        .reduce(BumpId::max)
}

/// Derives the effective `versionRange` for the check in `Infer::run`:
/// a literal `release_type.version_range`, or — when
/// `version_range_from_branch_name` is set — a range derived from a
/// maintenance-style branch name (`1.2.x` -> `>=1.2.0, <1.3.0`; `1.x` ->
/// `>=1.0.0, <2.0.0`), falling back to the literal range if the branch
/// name doesn't fit either shape.
fn effective_version_range(branch: &str, release_type: &ReleaseType) -> Option<String> {
    if release_type.version_range_from_branch_name {
        if let Some(derived) = version_range_from_branch_name(branch) {
            return Some(derived);
        }
    }
    release_type.version_range.clone()
}

fn version_range_from_branch_name(branch: &str) -> Option<String> {
    let parts: Vec<&str> = branch.split('.').collect();
    match parts.as_slice() {
        [major, minor, "x"] => {
            let major: u64 = major.parse().ok()?;
            let minor: u64 = minor.parse().ok()?;
            Some(format!(">={major}.{minor}.0, <{major}.{}.0", minor + 1))
        }
        [major, "x"] => {
            let major: u64 = major.parse().ok()?;
            Some(format!(">={major}.0.0, <{}.0.0", major + 1))
        }
        _ => None,
    }
}

fn next_version(
    config: &Configuration,
    state: &State,
    branch: &str,
    previous_version: &Version,
    previous_version_tags: &[Tag],
    bump: Option<&BumpId>,
    release_type: &ReleaseType,
) -> Result<Version, CoreError> {
    if let Some(override_version) = &config.version {
        return Ok(Version::parse(config.scheme, override_version)?);
    }

    // Under collapsed versioning, `previousVersion` is itself already a
    // `<base>-<qualifier>.<n>` tag once one exists (`passes_version_filter`
    // only accepts prerelease tags for these release types): the base stays
    // put and only the qualifier counter advances (glossary: "Collapsed
    // versioning"). `bump` only establishes a fresh base the first time,
    // when there is no prior prerelease tag to anchor to.
    let base = if release_type.collapsed_versioning && has_prerelease(previous_version) {
        previous_version.base()
    } else {
        match bump {
            Some(id) => previous_version.bump(id)?,
            None => previous_version.clone(),
        }
    };

    if !release_type.collapsed_versioning {
        return Ok(base);
    }

    let qualifier_template = release_type.collapsed_version_qualifier.as_deref().unwrap_or("rc");
    let context = template_context(state, branch);
    let qualifier = Template::parse(qualifier_template)?.render(&context);

    let floor = previous_version_tags
        .iter()
        .chain(state.release_scope.commits.iter().flat_map(|c| c.tags.iter()))
        .filter_map(|tag| candidate_version(&tag.name, config))
        .filter_map(|v| v.prerelease_counter(&qualifier))
        .max()
        .map_or(1, |n| n + 1);

    base.with_prerelease(&qualifier, floor).map_err(CoreError::from)
}
