//! # skiff-core
//!
//! Core library for skiff - the repository synchronization and
//! branch-publishing engine. Brings a local working copy in sync with a
//! remote (clone-if-absent, pull-if-present), commits pending changes,
//! ensures a named branch is checked out, and pushes it to `origin`,
//! installing remote and identity configuration on demand.
//!
//! The engine is generic over [`skiff_git::GitBackend`], so tests can run
//! against an in-memory fake while production uses libgit2.

mod auth;
mod branch_name;
mod error;
pub mod mask;
mod sync;

pub use auth::{AuthConfig, DEFAULT_TOKEN_USERNAME, TOKEN_VAR, USERNAME_VAR};
pub use branch_name::BranchName;
pub use error::{Error, Result};
pub use sync::{
    BranchRef, CommitOutcome, DEFAULT_COMMIT_MESSAGE, DEFAULT_IDENTITY_EMAIL,
    DEFAULT_IDENTITY_NAME, RepoSync,
};
