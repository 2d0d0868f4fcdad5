//! Error types for skiff-git.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse failure classes for callers that need a small, stable vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// The path is not bound to a git repository.
    NotARepository,
    /// Network, authentication, or rejected-ref failure at the remote.
    Remote,
    /// A merge produced conflicts that were not auto-resolved.
    Conflict,
    /// Filesystem, index, or config read/write failure.
    LocalIo,
}

/// Errors that can occur during git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Path is not bound to a git repository.
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// HEAD is detached (not on a branch).
    #[error("HEAD is detached - checkout a branch first")]
    DetachedHead,

    /// Branch not found.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// Remote not found.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// The remote rejected a pushed ref.
    #[error("push rejected for {refname}: {reason}")]
    PushRejected {
        /// Fully qualified ref the remote refused.
        refname: String,
        /// Reason string reported by the remote.
        reason: String,
    },

    /// A pull produced merge conflicts.
    #[error("unresolved merge conflicts in: {0:?}")]
    MergeConflicts(Vec<String>),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

impl Error {
    /// Classify this error into a coarse [`Category`].
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::NotARepository(_) => Category::NotARepository,
            Self::RemoteNotFound(_) | Self::PushRejected { .. } => Category::Remote,
            Self::MergeConflicts(_) => Category::Conflict,
            Self::DetachedHead | Self::BranchNotFound(_) | Self::Io(_) => Category::LocalIo,
            Self::Git2(e) => categorize_git2(e),
        }
    }
}

fn categorize_git2(err: &git2::Error) -> Category {
    use git2::{ErrorClass, ErrorCode};

    if err.code() == ErrorCode::Conflict {
        return Category::Conflict;
    }
    match err.class() {
        ErrorClass::Net | ErrorClass::Http | ErrorClass::Ssh | ErrorClass::Callback => {
            Category::Remote
        }
        ErrorClass::Merge => Category::Conflict,
        _ => Category::LocalIo,
    }
}
