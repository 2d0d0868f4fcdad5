//! `skiff commit` command - stage everything and commit it.

use std::path::Path;

use anyhow::Result;
use skiff_core::{CommitOutcome, RepoSync};

use crate::output;

/// Run the commit command.
pub fn run(engine: &RepoSync, path: &Path, message: Option<&str>) -> Result<()> {
    match engine.commit_all(path, message)? {
        CommitOutcome::Committed => output::success("Committed pending changes"),
        CommitOutcome::NothingToCommit => output::info("Nothing to commit"),
    }
    Ok(())
}
