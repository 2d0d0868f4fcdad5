//! Error types for skiff-core.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the sync engine.
///
/// Underlying VCS failures are logged with full detail at the point of
/// translation and collapsed into this small, stable vocabulary, so that
/// the orchestration driving the engine can react to outcomes without
/// parsing git internals.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The path lacks VCS metadata; only sync-or-clone may touch it.
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// The supplied branch name violates git naming rules.
    #[error("invalid branch name '{name}': {reason}")]
    InvalidBranchName {
        /// The rejected name.
        name: String,
        /// Why the name is invalid.
        reason: String,
    },

    /// Network, authentication, or rejected-ref failure at the remote.
    #[error("remote operation failed: {0}")]
    Remote(String),

    /// A pull produced merge conflicts that were not auto-resolved.
    #[error("merge conflict: {0}")]
    Conflict(String),

    /// Filesystem or repository-config read/write failure.
    #[error("local io failure: {0}")]
    LocalIo(String),
}

impl From<skiff_git::Error> for Error {
    fn from(err: skiff_git::Error) -> Self {
        use skiff_git::Category;

        match err {
            skiff_git::Error::NotARepository(path) => Self::NotARepository(path),
            skiff_git::Error::MergeConflicts(files) => Self::Conflict(files.join(", ")),
            other => match other.category() {
                Category::NotARepository => Self::LocalIo(other.to_string()),
                Category::Remote => Self::Remote(other.to_string()),
                Category::Conflict => Self::Conflict(other.to_string()),
                Category::LocalIo => Self::LocalIo(other.to_string()),
            },
        }
    }
}
