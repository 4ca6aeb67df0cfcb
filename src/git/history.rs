//! Commit history extraction using libgit2
//!
//! Walks `HEAD` newest-first and collects the commits that touched the
//! configured file, either by path or by blob id.

use git2::{Commit, Delta, DiffOptions, ErrorCode, Oid, Repository, Revwalk, Sort, Tree};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::FileSelector;
use crate::error::{Error, Result};

/// One commit and the hashes of its parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    /// Full commit hash
    pub hash: String,
    /// Full parent hashes, in parent order
    pub parents: Vec<String>,
}

/// Commits that affected the selected file, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitHistory {
    /// Commits with parent links (path mode)
    Ancestry(Vec<CommitRef>),
    /// Bare commit hashes without parent links (blob mode)
    Sequential(Vec<String>),
}

impl CommitHistory {
    pub fn len(&self) -> usize {
        match self {
            CommitHistory::Ancestry(commits) => commits.len(),
            CommitHistory::Sequential(hashes) => hashes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only view over one repository's history.
pub struct GitHistory {
    repo: Repository,
    path: PathBuf,
}

impl GitHistory {
    /// Open the repository rooted at `path`.
    ///
    /// Unlike discovery, parent directories are not searched: `path` must be
    /// the working tree root or the `.git` directory itself.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).map_err(|source| Error::RepositoryAccess {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Check whether `path` is a repository root. Any failure counts as `false`.
    pub fn is_repository(path: &Path) -> bool {
        Repository::open(path).is_ok()
    }

    /// Commits whose tree differs from every parent at `file_path`.
    ///
    /// History is simplified the way `git log -- <path>` does it: a merge
    /// that kept one parent's version of the file is skipped and only that
    /// parent is followed, so side branches it discarded are pruned.
    pub fn commits_touching_path(
        &self,
        file_path: &str,
        max_commits: Option<usize>,
    ) -> Result<Vec<CommitRef>> {
        self.walk_path(file_path, max_commits)
            .map_err(|source| self.access_error(source))
    }

    /// Commits whose first-parent diff adds or modifies a blob whose id starts
    /// with `blob_hash` (case-insensitive).
    pub fn commits_adding_blob(
        &self,
        blob_hash: &str,
        max_commits: Option<usize>,
    ) -> Result<Vec<String>> {
        self.walk_blob(&blob_hash.to_ascii_lowercase(), max_commits)
            .map_err(|source| self.access_error(source))
    }

    fn walk_path(
        &self,
        file_path: &str,
        max_commits: Option<usize>,
    ) -> Result<Vec<CommitRef>, git2::Error> {
        let Some(revwalk) = self.revwalk()? else {
            return Ok(Vec::new());
        };
        let shown = self.simplified_history(file_path)?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            if max_commits.is_some_and(|max| commits.len() >= max) {
                break;
            }

            let oid = oid_result?;
            if shown.get(&oid) != Some(&true) {
                continue;
            }

            let commit = self.repo.find_commit(oid)?;
            commits.push(CommitRef {
                hash: commit.id().to_string(),
                parents: commit.parent_ids().map(|id| id.to_string()).collect(),
            });
        }

        debug!("{} commits touched {}", commits.len(), file_path);
        Ok(commits)
    }

    /// Every commit reached from `HEAD` under path simplification, mapped to
    /// whether it changed `file_path`.
    ///
    /// A commit unchanged from one of its parents at the path follows only
    /// that parent; otherwise all parents are followed.
    fn simplified_history(&self, file_path: &str) -> Result<HashMap<Oid, bool>, git2::Error> {
        let head = self.repo.head()?.peel_to_commit()?.id();
        let mut reached = HashMap::new();
        let mut queue = vec![head];

        while let Some(oid) = queue.pop() {
            if reached.contains_key(&oid) {
                continue;
            }

            let commit = self.repo.find_commit(oid)?;
            let tree = commit.tree()?;

            let mut same_as = None;
            for parent in commit.parents() {
                if !self.path_changed(Some(&parent.tree()?), &tree, file_path)? {
                    same_as = Some(parent.id());
                    break;
                }
            }

            let touched = match same_as {
                Some(parent) => {
                    queue.push(parent);
                    false
                }
                None if commit.parent_count() == 0 => self.path_changed(None, &tree, file_path)?,
                None => {
                    queue.extend(commit.parent_ids());
                    true
                }
            };
            reached.insert(oid, touched);
        }

        Ok(reached)
    }

    fn walk_blob(
        &self,
        prefix: &str,
        max_commits: Option<usize>,
    ) -> Result<Vec<String>, git2::Error> {
        let Some(revwalk) = self.revwalk()? else {
            return Ok(Vec::new());
        };

        let mut hashes = Vec::new();
        for oid_result in revwalk {
            if max_commits.is_some_and(|max| hashes.len() >= max) {
                break;
            }

            let commit = self.repo.find_commit(oid_result?)?;
            if self.introduces_blob(&commit, prefix)? {
                hashes.push(commit.id().to_string());
            }
        }

        debug!("{} commits introduced blob {}", hashes.len(), prefix);
        Ok(hashes)
    }

    /// Newest-first walk from `HEAD`, or `None` when `HEAD` is unborn.
    fn revwalk(&self) -> Result<Option<Revwalk<'_>>, git2::Error> {
        match self.repo.head() {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                debug!("HEAD is unborn in {:?}, no history to walk", self.path);
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;
        Ok(Some(revwalk))
    }

    fn path_changed(
        &self,
        old_tree: Option<&Tree>,
        new_tree: &Tree,
        file_path: &str,
    ) -> Result<bool, git2::Error> {
        let mut diff_opts = DiffOptions::new();
        diff_opts.pathspec(file_path);

        let diff = self
            .repo
            .diff_tree_to_tree(old_tree, Some(new_tree), Some(&mut diff_opts))?;
        Ok(diff.deltas().len() > 0)
    }

    fn introduces_blob(&self, commit: &Commit, prefix: &str) -> Result<bool, git2::Error> {
        let parent = commit.parent(0).ok();
        let tree = commit.tree()?;
        let parent_tree = parent.as_ref().map(|p| p.tree()).transpose()?;

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let found = diff.deltas().any(|delta| {
            matches!(delta.status(), Delta::Added | Delta::Modified)
                && delta.new_file().id().to_string().starts_with(prefix)
        });
        Ok(found)
    }

    fn access_error(&self, source: git2::Error) -> Error {
        Error::RepositoryAccess {
            path: self.path.clone(),
            source,
        }
    }
}

/// Collect the commits that affected `selector` in the repository at `repository_path`.
///
/// Returns an empty history, not an error, when nothing matched.
pub fn extract_history(
    repository_path: &Path,
    selector: &FileSelector,
    max_commits: Option<usize>,
) -> Result<CommitHistory> {
    let history = GitHistory::open(repository_path)?;
    match selector {
        FileSelector::Path(path) => history
            .commits_touching_path(path, max_commits)
            .map(CommitHistory::Ancestry),
        FileSelector::BlobHash(hash) => history
            .commits_adding_blob(hash, max_commits)
            .map(CommitHistory::Sequential),
    }
}

/// Check whether `path` is a repository root.
pub fn is_repository(path: &Path) -> bool {
    GitHistory::is_repository(path)
}
