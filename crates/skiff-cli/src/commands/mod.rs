//! Command-line interface definition and shared command plumbing.

pub mod branch;
pub mod commit;
pub mod publish;
pub mod push;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skiff_core::{AuthConfig, RepoSync};

/// skiff - sync, commit, and publish branches for automated fix workflows.
#[derive(Debug, Parser)]
#[command(name = "skiff", version, about)]
pub struct Cli {
    /// TOML file with an `[auth]` section (username/token). When omitted,
    /// credentials come from GIT_AUTH_USERNAME / GIT_AUTH_TOKEN.
    #[arg(long, global = true, value_name = "FILE")]
    pub auth_file: Option<PathBuf>,

    /// Suppress informational output.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clone the remote into the local path, or pull if already cloned.
    Sync {
        /// Remote repository URL.
        remote_url: String,
        /// Local working-copy path.
        path: PathBuf,
    },
    /// Stage all changes and commit them (no-op on a clean tree).
    Commit {
        /// Local working-copy path.
        path: PathBuf,
        /// Commit message (defaults to the automated fix message).
        #[arg(long, short)]
        message: Option<String>,
    },
    /// Create a branch from HEAD, or switch to it if it already exists.
    Branch {
        /// Local working-copy path.
        path: PathBuf,
        /// Branch name.
        name: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Push a local branch to the equally named branch on origin.
    Push {
        /// Local working-copy path.
        path: PathBuf,
        /// Branch to push.
        branch: String,
        /// Rebind origin to this URL before pushing.
        #[arg(long, default_value = "", hide_default_value = true)]
        remote_url: String,
    },
    /// Commit pending changes, ensure the branch exists, and push it.
    Publish {
        /// Local working-copy path.
        path: PathBuf,
        /// Remote repository URL.
        remote_url: String,
        /// Branch name (defaults to a timestamped hotfix name).
        #[arg(long, short)]
        branch: Option<String>,
        /// Commit message.
        #[arg(long, short)]
        message: Option<String>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Build the engine with credentials from a file or the environment.
pub fn engine(auth_file: Option<&Path>) -> Result<RepoSync> {
    let auth = match auth_file {
        Some(path) => AuthConfig::load(path)
            .with_context(|| format!("failed to load auth config {}", path.display()))?,
        None => AuthConfig::from_env(),
    };
    Ok(RepoSync::new(auth))
}
