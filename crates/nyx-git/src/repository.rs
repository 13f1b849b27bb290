//! The Git repository port: the abstract operations spec'd for Infer, Make,
//! and Mark, backed by `git2`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository as Git2Repo, Signature};
use nyx_commit::{Action, Commit, Identity, Tag};

use crate::error::{GitError, GitResult};

/// What a [`walk`](Repository::walk) visitor tells the traversal to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    Stop,
}

/// A Git repository, opened once per pipeline run.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at `path`.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path)
            .map_err(|_| GitError::NotFound(format!("no repository at {}", path.display())))?;
        Ok(Self { inner })
    }

    /// Clones `uri` into `dir`. Authentication, if any, is the caller's
    /// responsibility to thread through a `git2::RemoteCallbacks`
    /// (omitted here: Nyx's configuration layer supplies credentials, not
    /// this port).
    pub fn clone(dir: impl AsRef<Path>, uri: &str) -> GitResult<Self> {
        let inner = git2::build::RepoBuilder::new().clone(uri, dir.as_ref())?;
        Ok(Self { inner })
    }

    /// Discovers a repository starting from the current directory.
    pub fn discover() -> GitResult<Self> {
        let inner = Git2Repo::discover(".")?;
        Ok(Self { inner })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// The current branch's short name. Empty in detached HEAD — callers
    /// that require an attached HEAD should check for this explicitly
    /// rather than relying on an error.
    pub fn current_branch(&self) -> GitResult<String> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Ok(String::new());
        }
        Ok(head.shorthand().unwrap_or_default().to_string())
    }

    pub fn latest_commit(&self) -> GitResult<String> {
        let head = self
            .inner
            .head()
            .map_err(|_| GitError::NotFound("HEAD".into()))?;
        let oid = head
            .target()
            .ok_or(GitError::Detached)?;
        Ok(oid.to_string())
    }

    pub fn root_commit(&self) -> GitResult<String> {
        let head = self.inner.head()?;
        let mut commit = head.peel_to_commit()?;
        loop {
            match commit.parent(0) {
                Ok(parent) => commit = parent,
                Err(_) => return Ok(commit.id().to_string()),
            }
        }
    }

    pub fn is_clean(&self) -> GitResult<bool> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true);
        let statuses = self.inner.statuses(Some(&mut opts))?;
        Ok(statuses.is_empty())
    }

    pub fn remotes(&self) -> GitResult<HashSet<String>> {
        let names = self.inner.remotes()?;
        Ok(names.iter().flatten().map(String::from).collect())
    }

    /// Every lightweight and annotated tag whose resolved object id equals
    /// `sha`.
    pub fn commit_tags(&self, sha: &str) -> GitResult<Vec<Tag>> {
        let target = Oid::from_str(sha).map_err(|_| GitError::NotFound(sha.to_string()))?;
        let mut out = Vec::new();
        for name in self.inner.tag_names(None)?.iter().flatten() {
            let reference = self.inner.find_reference(&format!("refs/tags/{name}"))?;
            let obj = reference.peel(git2::ObjectType::Any)?;
            let (resolved, annotated) = match obj.as_tag() {
                Some(tag) => (tag.target_id(), true),
                None => (obj.id(), false),
            };
            if resolved == target {
                out.push(Tag::new(name, resolved.to_string(), annotated));
            }
        }
        Ok(out)
    }

    /// First-parent-only traversal from `start` (defaults to `HEAD`)
    /// toward, but excluding, `end` (or the root if `end` is `None`).
    /// Newest-first. The visitor returns [`WalkControl::Stop`] to halt
    /// early.
    pub fn walk(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        mut visitor: impl FnMut(&Commit) -> WalkControl,
    ) -> GitResult<()> {
        let start_oid = match start {
            Some(s) => Oid::from_str(s).map_err(|_| GitError::NotFound(s.to_string()))?,
            None => self
                .inner
                .head()?
                .target()
                .ok_or(GitError::Detached)?,
        };
        let end_oid = match end {
            Some(s) => Some(Oid::from_str(s).map_err(|_| GitError::NotFound(s.to_string()))?),
            None => None,
        };

        let mut current = self.inner.find_commit(start_oid)?;
        loop {
            if Some(current.id()) == end_oid {
                break;
            }
            let commit = self.to_commit(&current)?;
            if visitor(&commit) == WalkControl::Stop {
                break;
            }
            match current.parent(0) {
                Ok(parent) => current = parent,
                Err(_) => break,
            }
        }
        Ok(())
    }

    fn to_commit(&self, commit: &git2::Commit<'_>) -> GitResult<Commit> {
        let sha = commit.id().to_string();
        let parents = (0..commit.parent_count())
            .map(|i| commit.parent_id(i).map(|o| o.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        let author = to_action(&commit.author());
        let committer = to_action(&commit.committer());
        let message = commit.message().unwrap_or("").to_string();
        let tags = self.commit_tags(&sha)?;
        Ok(Commit::new(sha, parents, author, committer, message, tags))
    }

    pub fn add(&self, paths: &[PathBuf]) -> GitResult<()> {
        let mut index = self.inner.index()?;
        if paths.is_empty() {
            index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        } else {
            for path in paths {
                index.add_path(path)?;
            }
        }
        index.write()?;
        Ok(())
    }

    pub fn commit(
        &self,
        message: &str,
        author: Option<(&str, &str)>,
        committer: Option<(&str, &str)>,
    ) -> GitResult<Commit> {
        let sig = |pair: Option<(&str, &str)>| -> GitResult<Signature<'_>> {
            match pair {
                Some((name, email)) => Ok(Signature::now(name, email)?),
                None => Ok(self.inner.signature()?),
            }
        };
        let author_sig = sig(author)?;
        let committer_sig = sig(committer)?;

        let mut index = self.inner.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.inner.find_tree(tree_id)?;

        let parent = self.inner.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self.inner.commit(
            Some("HEAD"),
            &author_sig,
            &committer_sig,
            message,
            &tree,
            &parents,
        )?;
        let commit = self.inner.find_commit(oid)?;
        self.to_commit(&commit)
    }

    pub fn tag(
        &self,
        target: Option<&str>,
        name: &str,
        message: Option<&str>,
        tagger: Option<(&str, &str)>,
    ) -> GitResult<Tag> {
        let target_oid = match target {
            Some(s) => Oid::from_str(s).map_err(|_| GitError::NotFound(s.to_string()))?,
            None => self.inner.head()?.target().ok_or(GitError::Detached)?,
        };
        let object = self.inner.find_object(target_oid, None)?;

        let annotated = if let Some(message) = message {
            let sig = match tagger {
                Some((n, e)) => Signature::now(n, e)?,
                None => self.inner.signature()?,
            };
            self.inner.tag(name, &object, &sig, message, false)?;
            true
        } else {
            self.inner.reference(
                &format!("refs/tags/{name}"),
                target_oid,
                false,
                "create lightweight tag",
            )?;
            false
        };

        Ok(Tag::new(name, target_oid.to_string(), annotated))
    }

    /// Pushes the current branch and all tags to `remote` (defaults to the
    /// sole configured remote; an error if there is not exactly one and
    /// none was named). Returns the remote name pushed to.
    pub fn push(&self, remote: Option<&str>) -> GitResult<String> {
        let remote_name = match remote {
            Some(name) => name.to_string(),
            None => {
                let remotes = self.remotes()?;
                if remotes.len() != 1 {
                    return Err(GitError::NotFound(
                        "no remote named and repository has zero or multiple remotes".into(),
                    ));
                }
                remotes.into_iter().next().unwrap()
            }
        };
        let mut remote = self.inner.find_remote(&remote_name)?;
        let branch = self.current_branch()?;
        if branch.is_empty() {
            return Err(GitError::Detached);
        }
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        let tags_refspec = "refs/tags/*:refs/tags/*".to_string();
        tracing::info!(remote = %remote_name, %branch, "pushing branch and tags");
        remote
            .push(&[refspec.as_str(), tags_refspec.as_str()], None)
            .map_err(|e| GitError::Protocol(e.message().to_string()))?;
        Ok(remote_name)
    }

    /// The most recent tag parseable as a version under `prefix`/`scheme`
    /// stripping, newest by SemVer order. Kept as a convenience used by
    /// Infer; the generic walk/commit_tags operations above are what the
    /// contract names.
    pub fn tags(&self) -> GitResult<Vec<String>> {
        let tags = self.inner.tag_names(None)?;
        Ok(tags.iter().flatten().map(String::from).collect())
    }
}

fn to_action(sig: &git2::Signature<'_>) -> Action {
    let identity = Identity::new(sig.name().unwrap_or("unknown"), sig.email().unwrap_or(""));
    let time = sig.when();
    Action::new(identity, time.seconds() * 1000, time.offset_minutes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository as Git2Repository;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().unwrap();
        let git2_repo = Git2Repository::init(temp_dir.path()).unwrap();
        let mut config = git2_repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        let repo = Repository { inner: git2_repo };
        (temp_dir, repo)
    }

    #[test]
    fn open_valid_repo() {
        let (temp_dir, _repo) = create_test_repo();
        assert!(Repository::open(temp_dir.path()).is_ok());
    }

    #[test]
    fn open_invalid_path_errors() {
        assert!(Repository::open("/nonexistent/path/to/repo").is_err());
    }

    #[test]
    fn is_clean_true_on_fresh_repo() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.is_clean().unwrap());
    }

    #[test]
    fn commit_then_tag_then_walk() {
        let (_temp_dir, repo) = create_test_repo();
        std::fs::write(repo.path().join("a.txt"), "hello").unwrap();
        repo.add(&[]).unwrap();
        let commit = repo.commit("feat: add a", None, None).unwrap();
        assert!(commit.is_root());

        let tag = repo.tag(None, "v1.0.0", Some("release"), None).unwrap();
        assert!(tag.annotated);
        assert_eq!(tag.target, commit.sha);

        let mut visited = Vec::new();
        repo.walk(None, None, |c| {
            visited.push(c.sha.clone());
            WalkControl::Continue
        })
        .unwrap();
        assert_eq!(visited, vec![commit.sha.clone()]);

        let tags = repo.commit_tags(&commit.sha).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "v1.0.0");
    }

    #[test]
    fn walk_stops_at_end_exclusive() {
        let (_temp_dir, repo) = create_test_repo();
        std::fs::write(repo.path().join("a.txt"), "1").unwrap();
        repo.add(&[]).unwrap();
        let first = repo.commit("first", None, None).unwrap();

        std::fs::write(repo.path().join("a.txt"), "2").unwrap();
        repo.add(&[]).unwrap();
        let second = repo.commit("second", None, None).unwrap();

        let mut visited = Vec::new();
        repo.walk(None, Some(&first.sha), |c| {
            visited.push(c.sha.clone());
            WalkControl::Continue
        })
        .unwrap();
        assert_eq!(visited, vec![second.sha]);
    }

    #[test]
    fn root_commit_is_oldest_ancestor() {
        let (_temp_dir, repo) = create_test_repo();
        std::fs::write(repo.path().join("a.txt"), "1").unwrap();
        repo.add(&[]).unwrap();
        let first = repo.commit("first", None, None).unwrap();
        std::fs::write(repo.path().join("a.txt"), "2").unwrap();
        repo.add(&[]).unwrap();
        repo.commit("second", None, None).unwrap();

        assert_eq!(repo.root_commit().unwrap(), first.sha);
    }

    #[test]
    fn push_without_remote_errors() {
        let (_temp_dir, repo) = create_test_repo();
        std::fs::write(repo.path().join("a.txt"), "1").unwrap();
        repo.add(&[]).unwrap();
        repo.commit("first", None, None).unwrap();
        assert!(repo.push(None).is_err());
    }
}
