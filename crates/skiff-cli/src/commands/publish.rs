//! `skiff publish` command - commit, ensure the branch, and push it.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use skiff_core::{BranchName, RepoSync};

use crate::output;

/// JSON output for the publish command.
#[derive(Debug, Serialize)]
struct PublishOutput<'a> {
    branch: &'a str,
    created: bool,
}

/// Run the publish command.
pub fn run(
    engine: &RepoSync,
    path: &Path,
    remote_url: &str,
    branch: Option<&str>,
    message: Option<&str>,
    json: bool,
) -> Result<()> {
    let name = match branch {
        Some(name) => BranchName::new(name)?,
        None => BranchName::timestamped("hotfix")?,
    };

    let branch_ref = engine.publish(path, remote_url, name.as_str(), message)?;

    if json {
        output::essential(&serde_json::to_string(&PublishOutput {
            branch: &branch_ref.name,
            created: branch_ref.created,
        })?);
        return Ok(());
    }

    output::success(&format!("Published branch '{}'", branch_ref.name));
    Ok(())
}
