//! Local clone management for the upstream platform repository
//!
//! All operations shell out to the `git` binary. This is a one-shot
//! maintainer tool: a failed command aborts the run with git's own
//! diagnostic, there is no retry.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::repo::error::SyncError;
use crate::version::tag;

/// Run a git subcommand inside `repo_path`, failing on non-zero exit.
fn run_git(repo_path: &Path, args: &[&str]) -> Result<String, SyncError> {
    debug!("running git {} in {:?}", args.join(" "), repo_path);

    let output = Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .args(args)
        .output()?;

    if !output.status.success() {
        return Err(SyncError::GitCommand {
            operation: args.join(" "),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Clone the upstream repository into `local_path` unless it already exists.
///
/// An existing directory is trusted as-is; the tool never re-clones over it.
pub fn ensure_cloned(local_path: &Path, remote_url: &str) -> Result<(), SyncError> {
    if local_path.is_dir() {
        debug!("clone already present at {:?}", local_path);
        return Ok(());
    }

    info!("cloning {} into {:?}", remote_url, local_path);
    let output = Command::new("git")
        .arg("clone")
        .arg(remote_url)
        .arg(local_path)
        .output()?;

    if !output.status.success() {
        return Err(SyncError::GitCommand {
            operation: format!("clone {remote_url}"),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

/// Enumerate every tag present in the local clone.
pub fn list_tags(local_path: &Path) -> Result<Vec<String>, SyncError> {
    let stdout = run_git(local_path, &["tag", "--list"])?;
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Resolve the newest release tag in the local clone.
pub fn find_latest_tag(local_path: &Path) -> Result<String, SyncError> {
    let tags = list_tags(local_path)?;
    let latest = tag::find_latest(tags.iter().map(String::as_str))?;
    latest.ok_or_else(|| SyncError::NoTags(local_path.to_path_buf()))
}

/// Reset the working tree and index to exactly match `tag_name`.
///
/// Always a clean snapshot of the named release, never an incremental
/// update: local modifications in the clone are discarded.
pub fn checkout_tag(local_path: &Path, tag_name: &str) -> Result<(), SyncError> {
    info!("checking out {}", tag_name);
    run_git(local_path, &["checkout", "--quiet", tag_name])?;
    run_git(local_path, &["reset", "--hard", "--quiet", tag_name])?;
    Ok(())
}
