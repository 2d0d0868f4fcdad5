//! `skiff sync` command - clone the remote or pull the working copy.

use std::path::Path;

use anyhow::Result;
use skiff_core::RepoSync;

use crate::output;

/// Run the sync command.
pub fn run(engine: &RepoSync, remote_url: &str, path: &Path) -> Result<()> {
    engine.sync_or_clone(remote_url, path)?;
    output::success(&format!("Working copy at {} is in sync", path.display()));
    Ok(())
}
