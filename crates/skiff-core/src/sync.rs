//! Repository synchronization and branch-publishing engine.
//!
//! One [`RepoSync`] instance drives all operations against local working
//! copies: clone-or-pull, stage-and-commit, branch ensure, push, and the
//! composite publish flow used by automated fix loops. Operations are
//! synchronous and must be serialized per working-copy path by the caller;
//! every one of them is idempotent or safely retryable.

use std::path::Path;

use skiff_git::{Credentials, Git2Backend, GitBackend};

use crate::auth::AuthConfig;
use crate::branch_name::BranchName;
use crate::error::{Error, Result};
use crate::mask;

/// Commit message used when the caller supplies none.
pub const DEFAULT_COMMIT_MESSAGE: &str = "AI Fix: auto commit";

/// Fallback committer name installed when the working copy has none.
pub const DEFAULT_IDENTITY_NAME: &str = "AI Bot";

/// Fallback committer email installed when the working copy has none.
pub const DEFAULT_IDENTITY_EMAIL: &str = "ai-bot@example.com";

/// Outcome of a commit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created.
    Committed,
    /// The working copy was clean; no empty commit is ever created.
    NothingToCommit,
}

/// A branch the engine ensured is checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Name of the branch.
    pub name: String,
    /// Whether the branch was newly created (as opposed to switched to).
    pub created: bool,
}

/// The synchronization engine.
///
/// Generic over the VCS backend so engine logic can be tested against a
/// fake; production code uses the default [`Git2Backend`].
pub struct RepoSync<B = Git2Backend> {
    backend: B,
    auth: AuthConfig,
}

impl RepoSync<Git2Backend> {
    /// Create an engine backed by libgit2.
    #[must_use]
    pub const fn new(auth: AuthConfig) -> Self {
        Self::with_backend(Git2Backend::new(), auth)
    }
}

impl<B: GitBackend> RepoSync<B> {
    /// Create an engine with an explicit backend.
    pub const fn with_backend(backend: B, auth: AuthConfig) -> Self {
        Self { backend, auth }
    }

    /// Bring the working copy at `path` in sync with `remote_url`:
    /// clone if the path is not yet a repository, pull otherwise.
    ///
    /// # Errors
    /// Fails on network/auth errors, a malformed remote URL, local IO
    /// problems, or unresolved merge conflicts during the pull. A failed
    /// clone leaves the path unbound, so the operation can be retried.
    pub fn sync_or_clone(&self, remote_url: &str, path: &Path) -> Result<()> {
        let creds = self.credentials();

        if self.backend.is_repository(path) {
            tracing::info!(path = %path.display(), "pulling existing working copy");
            // A pull that has to create a merge commit needs an identity.
            self.ensure_identity(path)?;
            self.backend
                .pull(path, creds.as_ref())
                .map_err(|e| vcs("pull", e))?;
            tracing::info!(path = %path.display(), "pull complete");
        } else {
            if remote_url.trim().is_empty() {
                return Err(Error::Remote("no remote url to clone from".to_owned()));
            }
            tracing::info!(
                remote = %mask::url(remote_url),
                path = %path.display(),
                "cloning repository"
            );
            self.backend
                .clone_repository(remote_url, path, creds.as_ref())
                .map_err(|e| vcs("clone", e))?;
            tracing::info!(path = %path.display(), "clone complete");
        }
        Ok(())
    }

    /// Stage everything and commit it with `message` (or the default).
    ///
    /// Succeeds as a no-op when the working copy is clean.
    ///
    /// # Errors
    /// Fails fast with [`Error::NotARepository`] on an unbound path.
    pub fn commit_all(&self, path: &Path, message: Option<&str>) -> Result<CommitOutcome> {
        self.require_repository(path)?;
        self.commit_pending(path, message)
    }

    /// Ensure a local branch named `name` exists and is checked out.
    ///
    /// Creates the branch from the current HEAD if absent, switches to it
    /// if present. Idempotent; tolerates concurrent creation.
    ///
    /// # Errors
    /// Fails on an unbound path or an invalid branch name.
    pub fn create_or_checkout_branch(&self, path: &Path, name: &str) -> Result<BranchRef> {
        let name = BranchName::new(name)?;
        self.require_repository(path)?;
        self.ensure_branch(path, name.as_str())
    }

    /// Push local branch `branch` to the equally named ref under `origin`,
    /// reconciling the remote binding to `remote_url` first.
    ///
    /// An empty `remote_url` keeps the existing binding. Never forces:
    /// non-fast-forward pushes are rejected by the remote and surface as
    /// [`Error::Remote`].
    ///
    /// # Errors
    /// Fails on an unbound path, an invalid branch name, or any remote
    /// rejection.
    pub fn push_branch(&self, path: &Path, remote_url: &str, branch: &str) -> Result<()> {
        let branch = BranchName::new(branch)?;
        self.require_repository(path)?;
        self.ensure_remote(path, remote_url)?;
        self.push(path, branch.as_str())
    }

    /// The composite publish flow: reconcile the remote, commit pending
    /// changes on the *current* branch, ensure `branch` is checked out,
    /// and push it.
    ///
    /// Committing before the branch switch means a switch can never
    /// discard uncommitted work. A clean working copy skips the commit
    /// step without failing. There is no rollback on failure: a commit
    /// without a push is a recoverable state and the whole flow is
    /// idempotent, so retrying is safe.
    ///
    /// # Errors
    /// Fails on the first step that fails; earlier steps stay applied.
    pub fn publish(
        &self,
        path: &Path,
        remote_url: &str,
        branch: &str,
        message: Option<&str>,
    ) -> Result<BranchRef> {
        let branch = BranchName::new(branch)?;
        tracing::info!(
            path = %path.display(),
            remote = %mask::url(remote_url),
            branch = %branch,
            has_token = self.auth.has_token(),
            "publishing branch"
        );
        self.require_repository(path)?;
        self.ensure_remote(path, remote_url)?;
        self.commit_pending(path, message)?;
        let branch_ref = self.ensure_branch(path, branch.as_str())?;
        self.push(path, branch.as_str())?;
        tracing::info!(branch = %branch, "publish complete");
        Ok(branch_ref)
    }

    fn require_repository(&self, path: &Path) -> Result<()> {
        if self.backend.is_repository(path) {
            Ok(())
        } else {
            tracing::error!(path = %path.display(), "path is not a git repository");
            Err(Error::NotARepository(path.to_path_buf()))
        }
    }

    /// Reconcile the `origin` binding with `remote_url`.
    ///
    /// Empty URL: no-op (caller asserts the existing binding is fine).
    /// Missing binding: created. Different URL: overwritten, last writer
    /// wins. Identical URL: no-op.
    fn ensure_remote(&self, path: &Path, remote_url: &str) -> Result<()> {
        if remote_url.trim().is_empty() {
            return Ok(());
        }
        match self.backend.remote_url(path)? {
            Some(existing) if existing == remote_url => Ok(()),
            Some(existing) => {
                tracing::info!(
                    old = %mask::url(&existing),
                    new = %mask::url(remote_url),
                    "updating remote 'origin'"
                );
                Ok(self.backend.set_remote_url(path, remote_url)?)
            }
            None => {
                tracing::info!(url = %mask::url(remote_url), "configuring remote 'origin'");
                Ok(self.backend.set_remote_url(path, remote_url)?)
            }
        }
    }

    /// Install the fallback committer identity for any missing field.
    ///
    /// Never overwrites a configured value.
    fn ensure_identity(&self, path: &Path) -> Result<()> {
        let identity = self.backend.identity(path)?;
        if identity.is_complete() {
            return Ok(());
        }
        let name = identity.name.as_deref().unwrap_or(DEFAULT_IDENTITY_NAME);
        let email = identity.email.as_deref().unwrap_or(DEFAULT_IDENTITY_EMAIL);
        tracing::info!(name, email, "installing fallback committer identity");
        Ok(self.backend.set_identity(path, name, email)?)
    }

    fn commit_pending(&self, path: &Path, message: Option<&str>) -> Result<CommitOutcome> {
        self.backend
            .stage_all(path)
            .map_err(|e| vcs("stage", e))?;

        if !self.backend.has_pending_changes(path)? {
            tracing::info!(path = %path.display(), "nothing to commit");
            return Ok(CommitOutcome::NothingToCommit);
        }

        self.ensure_identity(path)?;
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_COMMIT_MESSAGE);
        self.backend
            .commit(path, message)
            .map_err(|e| vcs("commit", e))?;
        tracing::info!(path = %path.display(), "committed pending changes");
        Ok(CommitOutcome::Committed)
    }

    fn ensure_branch(&self, path: &Path, name: &str) -> Result<BranchRef> {
        if self.backend.branch_exists(path, name)? {
            self.backend
                .checkout(path, name)
                .map_err(|e| vcs("checkout", e))?;
            tracing::info!(branch = name, "switched to existing branch");
            return Ok(BranchRef {
                name: name.to_owned(),
                created: false,
            });
        }

        let created = match self.backend.create_branch(path, name) {
            Ok(()) => true,
            Err(err) => {
                // Lost a creation race with another process: fall back to
                // checkout if the branch exists now.
                if self.backend.branch_exists(path, name).unwrap_or(false) {
                    tracing::debug!(branch = name, error = %err, "branch appeared concurrently");
                    false
                } else {
                    return Err(vcs("create branch", err));
                }
            }
        };

        self.backend
            .checkout(path, name)
            .map_err(|e| vcs("checkout", e))?;
        tracing::info!(branch = name, created, "branch checked out");
        Ok(BranchRef {
            name: name.to_owned(),
            created,
        })
    }

    fn push(&self, path: &Path, branch: &str) -> Result<()> {
        let creds = self.credentials();
        tracing::info!(
            branch,
            has_token = creds.is_some(),
            "pushing branch to origin"
        );
        self.backend
            .push(path, branch, creds.as_ref())
            .map_err(|e| vcs("push", e))?;
        tracing::info!(branch, "push complete");
        Ok(())
    }

    /// Resolve credentials once for the current operation.
    fn credentials(&self) -> Option<Credentials> {
        self.auth.credentials()
    }
}

/// Log a git failure with full detail, then translate it to the coarse
/// caller-facing taxonomy.
fn vcs(operation: &'static str, err: skiff_git::Error) -> Error {
    tracing::error!(operation, error = %err, "git operation failed");
    Error::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::path::PathBuf;

    use skiff_git::{Identity, Result as GitResult};

    #[derive(Debug, Default, Clone)]
    struct FakeRepo {
        remote: Option<String>,
        name: Option<String>,
        email: Option<String>,
        branches: Vec<String>,
        current: String,
        dirty: bool,
        commits: Vec<String>,
    }

    /// In-memory [`GitBackend`] recording every mutating call.
    #[derive(Default)]
    struct FakeBackend {
        repos: RefCell<HashMap<PathBuf, FakeRepo>>,
        ops: RefCell<Vec<String>>,
        fail_push: Cell<bool>,
        race_on_create: Cell<bool>,
    }

    impl FakeBackend {
        fn with_repo(path: &str, dirty: bool) -> Self {
            let backend = Self::default();
            backend.repos.borrow_mut().insert(
                PathBuf::from(path),
                FakeRepo {
                    branches: vec!["main".to_owned()],
                    current: "main".to_owned(),
                    dirty,
                    ..FakeRepo::default()
                },
            );
            backend
        }

        fn record(&self, op: impl Into<String>) {
            self.ops.borrow_mut().push(op.into());
        }

        fn repo(&self, path: &Path) -> FakeRepo {
            self.repos.borrow().get(path).cloned().unwrap_or_default()
        }

        fn update<T>(&self, path: &Path, f: impl FnOnce(&mut FakeRepo) -> T) -> GitResult<T> {
            let mut repos = self.repos.borrow_mut();
            let repo = repos
                .get_mut(path)
                .ok_or_else(|| skiff_git::Error::NotARepository(path.to_path_buf()))?;
            Ok(f(repo))
        }

        fn op_index(&self, needle: &str) -> Option<usize> {
            self.ops.borrow().iter().position(|op| op.starts_with(needle))
        }

        fn op_count(&self, needle: &str) -> usize {
            self.ops
                .borrow()
                .iter()
                .filter(|op| op.starts_with(needle))
                .count()
        }
    }

    impl GitBackend for FakeBackend {
        fn is_repository(&self, path: &Path) -> bool {
            self.repos.borrow().contains_key(path)
        }

        fn clone_repository(
            &self,
            url: &str,
            path: &Path,
            _creds: Option<&Credentials>,
        ) -> GitResult<()> {
            self.record(format!("clone:{url}"));
            self.repos.borrow_mut().insert(
                path.to_path_buf(),
                FakeRepo {
                    remote: Some(url.to_owned()),
                    branches: vec!["main".to_owned()],
                    current: "main".to_owned(),
                    ..FakeRepo::default()
                },
            );
            Ok(())
        }

        fn pull(&self, path: &Path, _creds: Option<&Credentials>) -> GitResult<()> {
            self.record("pull");
            self.update(path, |_| ())
        }

        fn stage_all(&self, path: &Path) -> GitResult<()> {
            self.record("stage");
            self.update(path, |_| ())
        }

        fn has_pending_changes(&self, path: &Path) -> GitResult<bool> {
            self.update(path, |r| r.dirty)
        }

        fn commit(&self, path: &Path, message: &str) -> GitResult<()> {
            self.record(format!("commit:{message}"));
            self.update(path, |r| {
                assert!(r.name.is_some() && r.email.is_some(), "commit without identity");
                r.commits.push(message.to_owned());
                r.dirty = false;
            })
        }

        fn current_branch(&self, path: &Path) -> GitResult<String> {
            self.update(path, |r| r.current.clone())
        }

        fn branch_exists(&self, path: &Path, name: &str) -> GitResult<bool> {
            self.update(path, |r| r.branches.iter().any(|b| b == name))
        }

        fn create_branch(&self, path: &Path, name: &str) -> GitResult<()> {
            self.record(format!("create:{name}"));
            if self.race_on_create.get() {
                // Simulate another process winning the creation race.
                self.update(path, |r| r.branches.push(name.to_owned()))?;
                return Err(skiff_git::Error::Git2(git2::Error::from_str(
                    "reference already exists",
                )));
            }
            self.update(path, |r| r.branches.push(name.to_owned()))
        }

        fn checkout(&self, path: &Path, name: &str) -> GitResult<()> {
            self.record(format!("checkout:{name}"));
            self.update(path, |r| r.current = name.to_owned())
        }

        fn push(&self, path: &Path, branch: &str, _creds: Option<&Credentials>) -> GitResult<()> {
            self.record(format!("push:{branch}"));
            self.update(path, |_| ())?;
            if self.fail_push.get() {
                return Err(skiff_git::Error::PushRejected {
                    refname: format!("refs/heads/{branch}"),
                    reason: "authentication required".to_owned(),
                });
            }
            Ok(())
        }

        fn remote_url(&self, path: &Path) -> GitResult<Option<String>> {
            self.update(path, |r| r.remote.clone())
        }

        fn set_remote_url(&self, path: &Path, url: &str) -> GitResult<()> {
            self.record(format!("set_remote:{url}"));
            self.update(path, |r| r.remote = Some(url.to_owned()))
        }

        fn identity(&self, path: &Path) -> GitResult<Identity> {
            self.update(path, |r| Identity {
                name: r.name.clone(),
                email: r.email.clone(),
            })
        }

        fn set_identity(&self, path: &Path, name: &str, email: &str) -> GitResult<()> {
            self.record(format!("set_identity:{name}:{email}"));
            self.update(path, |r| {
                r.name = Some(name.to_owned());
                r.email = Some(email.to_owned());
            })
        }
    }

    fn engine(backend: FakeBackend) -> RepoSync<FakeBackend> {
        RepoSync::with_backend(backend, AuthConfig::default())
    }

    const REPO: &str = "/work/repo";
    const URL: &str = "https://example.test/r.git";

    #[test]
    fn sync_clones_when_unbound_then_pulls() {
        let sync = engine(FakeBackend::default());
        let path = Path::new(REPO);

        sync.sync_or_clone(URL, path).unwrap();
        assert_eq!(sync.backend.op_count("clone"), 1);

        sync.sync_or_clone(URL, path).unwrap();
        assert_eq!(sync.backend.op_count("clone"), 1);
        assert_eq!(sync.backend.op_count("pull"), 1);
    }

    #[test]
    fn sync_without_url_on_unbound_path_fails() {
        let sync = engine(FakeBackend::default());
        let err = sync.sync_or_clone("  ", Path::new(REPO)).unwrap_err();
        assert!(matches!(err, Error::Remote(_)));
    }

    #[test]
    fn commit_all_is_a_noop_on_clean_tree() {
        let sync = engine(FakeBackend::with_repo(REPO, false));
        let path = Path::new(REPO);

        let outcome = sync.commit_all(path, Some("msg")).unwrap();
        assert_eq!(outcome, CommitOutcome::NothingToCommit);
        assert_eq!(sync.backend.op_count("commit"), 0);
        assert!(sync.backend.repo(path).commits.is_empty());
    }

    #[test]
    fn commit_all_defaults_the_message() {
        let sync = engine(FakeBackend::with_repo(REPO, true));
        let path = Path::new(REPO);

        let outcome = sync.commit_all(path, None).unwrap();
        assert_eq!(outcome, CommitOutcome::Committed);
        assert_eq!(
            sync.backend.repo(path).commits,
            vec![DEFAULT_COMMIT_MESSAGE.to_owned()]
        );
    }

    #[test]
    fn commit_all_keeps_the_callers_message() {
        let sync = engine(FakeBackend::with_repo(REPO, true));
        let path = Path::new(REPO);

        sync.commit_all(path, Some("fix: null check")).unwrap();
        assert_eq!(sync.backend.repo(path).commits, vec!["fix: null check".to_owned()]);
    }

    #[test]
    fn commit_installs_fallback_identity_once() {
        let sync = engine(FakeBackend::with_repo(REPO, true));
        let path = Path::new(REPO);

        sync.commit_all(path, None).unwrap();
        let repo = sync.backend.repo(path);
        assert_eq!(repo.name.as_deref(), Some(DEFAULT_IDENTITY_NAME));
        assert_eq!(repo.email.as_deref(), Some(DEFAULT_IDENTITY_EMAIL));
        assert_eq!(sync.backend.op_count("set_identity"), 1);

        // Second dirty commit: identity already present, nothing rewritten.
        sync.backend.update(path, |r| r.dirty = true).unwrap();
        sync.commit_all(path, None).unwrap();
        assert_eq!(sync.backend.op_count("set_identity"), 1);
    }

    #[test]
    fn commit_never_overwrites_custom_identity() {
        let backend = FakeBackend::with_repo(REPO, true);
        let path = Path::new(REPO);
        backend
            .update(path, |r| {
                r.name = Some("Jo Dev".to_owned());
                r.email = Some("jo@example.com".to_owned());
            })
            .unwrap();

        let sync = engine(backend);
        sync.commit_all(path, None).unwrap();
        let repo = sync.backend.repo(path);
        assert_eq!(repo.name.as_deref(), Some("Jo Dev"));
        assert_eq!(repo.email.as_deref(), Some("jo@example.com"));
        assert_eq!(sync.backend.op_count("set_identity"), 0);
    }

    #[test]
    fn partial_identity_fills_only_the_gap() {
        let backend = FakeBackend::with_repo(REPO, true);
        let path = Path::new(REPO);
        backend
            .update(path, |r| r.name = Some("Jo Dev".to_owned()))
            .unwrap();

        let sync = engine(backend);
        sync.commit_all(path, None).unwrap();
        let repo = sync.backend.repo(path);
        assert_eq!(repo.name.as_deref(), Some("Jo Dev"));
        assert_eq!(repo.email.as_deref(), Some(DEFAULT_IDENTITY_EMAIL));
    }

    #[test]
    fn branch_ensure_is_idempotent() {
        let sync = engine(FakeBackend::with_repo(REPO, false));
        let path = Path::new(REPO);

        let first = sync.create_or_checkout_branch(path, "feature-x").unwrap();
        assert!(first.created);
        assert_eq!(sync.backend.repo(path).current, "feature-x");

        let second = sync.create_or_checkout_branch(path, "feature-x").unwrap();
        assert!(!second.created);
        assert_eq!(sync.backend.repo(path).current, "feature-x");
        assert_eq!(sync.backend.op_count("create"), 1);
    }

    #[test]
    fn branch_creation_race_falls_back_to_checkout() {
        let backend = FakeBackend::with_repo(REPO, false);
        backend.race_on_create.set(true);

        let sync = engine(backend);
        let branch = sync
            .create_or_checkout_branch(Path::new(REPO), "feature-x")
            .unwrap();
        assert!(!branch.created);
        assert_eq!(sync.backend.repo(Path::new(REPO)).current, "feature-x");
    }

    #[test]
    fn remote_reconciliation_is_last_write_wins() {
        let sync = engine(FakeBackend::with_repo(REPO, false));
        let path = Path::new(REPO);

        sync.push_branch(path, "https://example.test/a.git", "main").unwrap();
        sync.push_branch(path, "https://example.test/b.git", "main").unwrap();
        assert_eq!(
            sync.backend.repo(path).remote.as_deref(),
            Some("https://example.test/b.git")
        );

        // Same URL again: binding untouched.
        sync.push_branch(path, "https://example.test/b.git", "main").unwrap();
        assert_eq!(sync.backend.op_count("set_remote"), 2);
    }

    #[test]
    fn empty_remote_url_keeps_existing_binding() {
        let backend = FakeBackend::with_repo(REPO, false);
        let path = Path::new(REPO);
        backend
            .update(path, |r| r.remote = Some(URL.to_owned()))
            .unwrap();

        let sync = engine(backend);
        sync.push_branch(path, "", "main").unwrap();
        assert_eq!(sync.backend.repo(path).remote.as_deref(), Some(URL));
        assert_eq!(sync.backend.op_count("set_remote"), 0);
    }

    #[test]
    fn publish_commits_before_switching_branches() {
        let sync = engine(FakeBackend::with_repo(REPO, true));
        let path = Path::new(REPO);

        let branch = sync.publish(path, URL, "hotfix_1", None).unwrap();
        assert_eq!(branch.name, "hotfix_1");
        assert!(branch.created);

        let backend = &sync.backend;
        let commit = backend.op_index("commit:").unwrap();
        let checkout = backend.op_index("checkout:hotfix_1").unwrap();
        let push = backend.op_index("push:hotfix_1").unwrap();
        assert!(commit < checkout, "must commit on the current branch first");
        assert!(checkout < push);
    }

    #[test]
    fn publish_skips_commit_when_clean() {
        let sync = engine(FakeBackend::with_repo(REPO, false));
        let path = Path::new(REPO);

        sync.publish(path, URL, "hotfix_1", None).unwrap();
        assert_eq!(sync.backend.op_count("commit"), 0);
        assert_eq!(sync.backend.op_count("push:hotfix_1"), 1);
    }

    #[test]
    fn publish_failure_keeps_local_commit() {
        let backend = FakeBackend::with_repo(REPO, true);
        backend.fail_push.set(true);

        let sync = engine(backend);
        let path = Path::new(REPO);
        let err = sync.publish(path, URL, "hotfix_1", None).unwrap_err();
        assert!(matches!(err, Error::Remote(_)));

        let repo = sync.backend.repo(path);
        assert_eq!(repo.commits.len(), 1, "push failure must not roll back the commit");
        assert!(repo.branches.iter().any(|b| b == "hotfix_1"));
    }

    #[test]
    fn publish_is_retryable_after_push_failure() {
        let backend = FakeBackend::with_repo(REPO, true);
        backend.fail_push.set(true);

        let sync = engine(backend);
        let path = Path::new(REPO);
        sync.publish(path, URL, "hotfix_1", None).unwrap_err();

        sync.backend.fail_push.set(false);
        let branch = sync.publish(path, URL, "hotfix_1", None).unwrap();
        assert!(!branch.created);
        assert_eq!(sync.backend.repo(path).commits.len(), 1);
    }

    #[test]
    fn operations_fail_fast_on_unbound_path() {
        let sync = engine(FakeBackend::default());
        let path = Path::new(REPO);

        assert!(matches!(
            sync.commit_all(path, None).unwrap_err(),
            Error::NotARepository(_)
        ));
        assert!(matches!(
            sync.create_or_checkout_branch(path, "b").unwrap_err(),
            Error::NotARepository(_)
        ));
        assert!(matches!(
            sync.push_branch(path, URL, "b").unwrap_err(),
            Error::NotARepository(_)
        ));
        assert!(matches!(
            sync.publish(path, URL, "b", None).unwrap_err(),
            Error::NotARepository(_)
        ));
    }

    #[test]
    fn invalid_branch_names_are_rejected_before_any_io() {
        let sync = engine(FakeBackend::with_repo(REPO, true));
        let err = sync
            .publish(Path::new(REPO), URL, "../escape", None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBranchName { .. }));
        assert!(sync.backend.ops.borrow().is_empty());
    }
}
