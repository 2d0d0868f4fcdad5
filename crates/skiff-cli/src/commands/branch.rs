//! `skiff branch` command - ensure a branch exists and is checked out.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use skiff_core::RepoSync;

use crate::output;

/// JSON output for the branch command.
#[derive(Debug, Serialize)]
struct BranchOutput<'a> {
    branch: &'a str,
    created: bool,
}

/// Run the branch command.
pub fn run(engine: &RepoSync, path: &Path, name: &str, json: bool) -> Result<()> {
    let branch = engine.create_or_checkout_branch(path, name)?;

    if json {
        output::essential(&serde_json::to_string(&BranchOutput {
            branch: &branch.name,
            created: branch.created,
        })?);
        return Ok(());
    }

    if branch.created {
        output::success(&format!("Created and checked out branch '{}'", branch.name));
    } else {
        output::success(&format!("Switched to branch '{}'", branch.name));
    }
    Ok(())
}
