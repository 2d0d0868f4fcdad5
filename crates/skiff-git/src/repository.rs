//! git2-backed implementation of [`GitBackend`].

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{
    AnnotatedCommit, BranchType, Cred, ErrorCode, FetchOptions, IndexAddOption, PushOptions,
    RemoteCallbacks, Repository, StatusOptions,
};

use crate::error::{Error, Result};
use crate::traits::{Credentials, GitBackend, Identity};

/// Name of the single remote this backend operates on.
pub const DEFAULT_REMOTE: &str = "origin";

/// Production [`GitBackend`] built on libgit2.
///
/// Stateless: every operation opens the repository at the given path for
/// the duration of the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Backend;

impl Git2Backend {
    /// Create a new backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<Repository> {
        Repository::open(path).map_err(|_| Error::NotARepository(path.to_path_buf()))
    }
}

impl GitBackend for Git2Backend {
    fn is_repository(&self, path: &Path) -> bool {
        if !path.exists() {
            // The probe doubles as directory bootstrap for a later clone.
            let _ = fs::create_dir_all(path);
            return false;
        }
        path.join(".git").is_dir()
    }

    fn clone_repository(
        &self,
        url: &str,
        path: &Path,
        creds: Option<&Credentials>,
    ) -> Result<()> {
        let mut fetch = FetchOptions::new();
        fetch.remote_callbacks(remote_callbacks(creds));

        match RepoBuilder::new().fetch_options(fetch).clone(url, path) {
            Ok(_) => Ok(()),
            Err(e) => {
                // A partial clone must not masquerade as a bound working copy.
                let _ = fs::remove_dir_all(path.join(".git"));
                Err(e.into())
            }
        }
    }

    fn pull(&self, path: &Path, creds: Option<&Credentials>) -> Result<()> {
        let repo = Self::open(path)?;
        let branch = current_branch_name(&repo)?;

        {
            let mut remote = repo
                .find_remote(DEFAULT_REMOTE)
                .map_err(|_| Error::RemoteNotFound(DEFAULT_REMOTE.into()))?;
            let mut opts = FetchOptions::new();
            opts.remote_callbacks(remote_callbacks(creds));
            remote.fetch(&[branch.as_str()], Some(&mut opts), None)?;
        }

        let fetch_head = repo.find_reference("FETCH_HEAD")?;
        let fetched = repo.reference_to_annotated_commit(&fetch_head)?;
        integrate(&repo, &branch, &fetched)
    }

    fn stage_all(&self, path: &Path) -> Result<()> {
        let repo = Self::open(path)?;
        let mut index = repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        Ok(())
    }

    fn has_pending_changes(&self, path: &Path) -> Result<bool> {
        let repo = Self::open(path)?;
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    fn commit(&self, path: &Path, message: &str) -> Result<()> {
        let repo = Self::open(path)?;
        let sig = repo.signature()?;

        let tree_id = {
            let mut index = repo.index()?;
            index.write_tree()?
        };
        let tree = repo.find_tree(tree_id)?;

        // First commit on an unborn branch has no parent.
        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        Ok(())
    }

    fn current_branch(&self, path: &Path) -> Result<String> {
        let repo = Self::open(path)?;
        current_branch_name(&repo)
    }

    fn branch_exists(&self, path: &Path, name: &str) -> Result<bool> {
        let repo = Self::open(path)?;
        Ok(repo.find_branch(name, BranchType::Local).is_ok())
    }

    fn create_branch(&self, path: &Path, name: &str) -> Result<()> {
        let repo = Self::open(path)?;
        let head = repo.head()?.peel_to_commit()?;
        repo.branch(name, &head, false)?;
        Ok(())
    }

    fn checkout(&self, path: &Path, name: &str) -> Result<()> {
        let repo = Self::open(path)?;
        let branch = repo
            .find_branch(name, BranchType::Local)
            .map_err(|_| Error::BranchNotFound(name.into()))?;

        let object = branch.get().peel(git2::ObjectType::Commit)?;
        repo.checkout_tree(&object, None)?;
        repo.set_head(&format!("refs/heads/{name}"))?;
        Ok(())
    }

    fn push(&self, path: &Path, branch: &str, creds: Option<&Credentials>) -> Result<()> {
        let repo = Self::open(path)?;
        let mut remote = repo
            .find_remote(DEFAULT_REMOTE)
            .map_err(|_| Error::RemoteNotFound(DEFAULT_REMOTE.into()))?;

        // Per-ref rejections (e.g. non-fast-forward) arrive through the
        // push_update_reference callback, not as a push error.
        let rejection: RefCell<Option<Error>> = RefCell::new(None);
        let mut callbacks = remote_callbacks(creds);
        callbacks.push_update_reference(|refname, status| {
            if let Some(reason) = status {
                *rejection.borrow_mut() = Some(Error::PushRejected {
                    refname: refname.to_owned(),
                    reason: reason.to_owned(),
                });
            }
            Ok(())
        });

        let mut opts = PushOptions::new();
        opts.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        remote.push(&[refspec.as_str()], Some(&mut opts))?;
        drop(opts);

        if let Some(err) = rejection.into_inner() {
            return Err(err);
        }
        Ok(())
    }

    fn remote_url(&self, path: &Path) -> Result<Option<String>> {
        let repo = Self::open(path)?;
        match repo.find_remote(DEFAULT_REMOTE) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_remote_url(&self, path: &Path, url: &str) -> Result<()> {
        let repo = Self::open(path)?;
        if repo.find_remote(DEFAULT_REMOTE).is_ok() {
            repo.remote_set_url(DEFAULT_REMOTE, url)?;
        } else {
            repo.remote(DEFAULT_REMOTE, url)?;
        }
        Ok(())
    }

    fn identity(&self, path: &Path) -> Result<Identity> {
        let repo = Self::open(path)?;
        let mut config = repo.config()?;
        let snapshot = config.snapshot()?;
        Ok(Identity {
            name: config_value(&snapshot, "user.name"),
            email: config_value(&snapshot, "user.email"),
        })
    }

    fn set_identity(&self, path: &Path, name: &str, email: &str) -> Result<()> {
        let repo = Self::open(path)?;
        let mut config = repo.config()?;
        config.set_str("user.name", name)?;
        config.set_str("user.email", email)?;
        Ok(())
    }
}

fn current_branch_name(repo: &Repository) -> Result<String> {
    let head = repo.head()?;
    if !head.is_branch() {
        return Err(Error::DetachedHead);
    }
    head.shorthand().map(String::from).ok_or(Error::DetachedHead)
}

fn config_value(config: &git2::Config, key: &str) -> Option<String> {
    config
        .get_string(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn remote_callbacks<'a>(creds: Option<&Credentials>) -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    if let Some(creds) = creds {
        let creds = creds.clone();
        callbacks.credentials(move |_url, username_from_url, _allowed| {
            let username = username_from_url.unwrap_or(&creds.username);
            Cred::userpass_plaintext(username, &creds.token)
        });
    }
    callbacks
}

/// Integrate a fetched upstream commit into the current branch.
fn integrate(repo: &Repository, branch: &str, upstream: &AnnotatedCommit<'_>) -> Result<()> {
    let (analysis, _) = repo.merge_analysis(&[upstream])?;

    if analysis.is_up_to_date() {
        tracing::debug!(branch, "already up to date");
        return Ok(());
    }

    if analysis.is_fast_forward() {
        tracing::debug!(branch, target = %upstream.id(), "fast-forwarding");
        let refname = format!("refs/heads/{branch}");
        let mut reference = repo.find_reference(&refname)?;
        reference.set_target(upstream.id(), "pull: fast-forward")?;
        repo.set_head(&refname)?;
        repo.checkout_head(Some(CheckoutBuilder::default().force()))?;
        return Ok(());
    }

    tracing::debug!(branch, target = %upstream.id(), "merging upstream");
    repo.merge(&[upstream], None, None)?;

    let mut index = repo.index()?;
    if index.has_conflicts() {
        // Leave the merge state in place for out-of-band resolution.
        let files = index
            .conflicts()?
            .filter_map(std::result::Result::ok)
            .filter_map(|c| c.our.or(c.their))
            .filter_map(|entry| String::from_utf8(entry.path).ok())
            .collect();
        return Err(Error::MergeConflicts(files));
    }

    let tree_id = index.write_tree_to(repo)?;
    let tree = repo.find_tree(tree_id)?;
    let sig = repo.signature()?;
    let head = repo.head()?.peel_to_commit()?;
    let theirs = repo.find_commit(upstream.id())?;
    repo.commit(
        Some("HEAD"),
        &sig,
        &sig,
        &format!("Merge remote-tracking branch '{DEFAULT_REMOTE}/{branch}'"),
        &tree,
        &[&head, &theirs],
    )?;
    repo.cleanup_state()?;
    repo.checkout_head(Some(&mut CheckoutBuilder::default()))?;
    Ok(())
}
