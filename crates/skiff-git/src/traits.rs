//! Trait abstraction for version-control operations.
//!
//! This module defines the `GitBackend` trait which abstracts the VCS
//! binding behind the sync engine, enabling dependency injection and
//! testability.

use std::fmt;
use std::path::Path;

use crate::Result;

/// Username/token pair presented to a remote for authenticated operations.
#[derive(Clone)]
pub struct Credentials {
    /// Username sent to the remote. For token auth against GitHub any
    /// non-empty string works, conventionally `x-access-token`.
    pub username: String,
    /// Bearer token or password-equivalent secret.
    pub token: String,
}

impl Credentials {
    /// Create a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

// The token must never leak through debug formatting of operation context.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Committer identity as stored in repository config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// `user.name`, if configured.
    pub name: Option<String>,
    /// `user.email`, if configured.
    pub email: Option<String>,
}

impl Identity {
    /// Whether both name and email are configured.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.name.is_some() && self.email.is_some()
    }
}

/// Version-control operations on a local working copy, addressed by path.
///
/// This trait abstracts git operations, allowing for:
/// - Dependency injection in the sync engine
/// - Fake implementations for testing
/// - Alternative VCS bindings
///
/// Every method opens the working copy for the duration of the call; no
/// long-lived repository handle is held. Callers must serialize operations
/// against the same path — the underlying index, HEAD, and config are not
/// safe for concurrent mutation.
#[allow(clippy::missing_errors_doc)]
pub trait GitBackend {
    /// Check whether `path` is bound to a git repository.
    ///
    /// Creates `path` (including parents) if it does not exist yet, and
    /// reports "not bound" in that case.
    fn is_repository(&self, path: &Path) -> bool;

    /// Clone `url` into `path`.
    ///
    /// A failed clone must not leave a half-bound working copy behind.
    fn clone_repository(
        &self,
        url: &str,
        path: &Path,
        creds: Option<&Credentials>,
    ) -> Result<()>;

    /// Fetch and integrate the upstream of the current branch.
    fn pull(&self, path: &Path, creds: Option<&Credentials>) -> Result<()>;

    /// Stage all new, modified, and deleted files under the working-copy root.
    fn stage_all(&self, path: &Path) -> Result<()>;

    /// Whether the working copy has staged, unstaged, or untracked changes.
    fn has_pending_changes(&self, path: &Path) -> Result<bool>;

    /// Commit the staged changes with `message`.
    ///
    /// Requires a committer identity to be configured.
    fn commit(&self, path: &Path, message: &str) -> Result<()>;

    /// Name of the branch HEAD points at.
    fn current_branch(&self, path: &Path) -> Result<String>;

    /// Whether a local branch with `name` exists.
    fn branch_exists(&self, path: &Path, name: &str) -> Result<bool>;

    /// Create a local branch at the current HEAD without switching to it.
    fn create_branch(&self, path: &Path, name: &str) -> Result<()>;

    /// Switch the working copy to an existing local branch.
    fn checkout(&self, path: &Path, name: &str) -> Result<()>;

    /// Push a local branch to the equally named ref under `origin`.
    fn push(&self, path: &Path, branch: &str, creds: Option<&Credentials>) -> Result<()>;

    /// URL currently bound to `origin`, if any.
    fn remote_url(&self, path: &Path) -> Result<Option<String>>;

    /// Bind `origin` to `url`, replacing any previous URL.
    fn set_remote_url(&self, path: &Path, url: &str) -> Result<()>;

    /// Read the configured committer identity.
    fn identity(&self, path: &Path) -> Result<Identity>;

    /// Write the committer identity into the repository-local config.
    fn set_identity(&self, path: &Path, name: &str, email: &str) -> Result<()>;
}
