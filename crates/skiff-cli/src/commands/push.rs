//! `skiff push` command - push a local branch to origin.

use std::path::Path;

use anyhow::Result;
use skiff_core::RepoSync;

use crate::output;

/// Run the push command.
pub fn run(engine: &RepoSync, path: &Path, remote_url: &str, branch: &str) -> Result<()> {
    engine.push_branch(path, remote_url, branch)?;
    output::success(&format!("Pushed '{branch}' to origin"));
    Ok(())
}
