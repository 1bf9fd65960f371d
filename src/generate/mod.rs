//! The package generation pass
//!
//! Pulls the pieces together: make sure the upstream clone exists, resolve
//! the newest release tag, decide via the marker whether anything needs
//! doing, and if so check out the tag and run the extraction, rewriting, and
//! manifest steps. The marker is written last, so a failed pass leaves the
//! previous sync state untouched and the next run starts over.
//!
//! # Modules
//!
//! - [`extract`]: copy plan from the upstream checkout into the package tree
//! - [`rewrite`]: import-path and docstring rewriting
//! - [`requirements`]: dependency-manifest filtering
//! - [`error`]: generation errors

pub mod error;
pub mod extract;
pub mod requirements;
pub mod rewrite;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::{GeneratorConfig, REQUIREMENTS_ALL_FILE, REQUIREMENTS_FILE, REQUIREMENTS_FILE_DEV};
use crate::generate::error::GenerateError;
use crate::repo::{marker, sync};

/// What a generation pass ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The marker already matched the latest release; nothing was touched.
    UpToDate(String),
    /// A fresh package was generated for this version.
    Generated(String),
}

/// Run a full generation pass.
///
/// `tag_override` pins the checkout to a specific release instead of the
/// newest tag.
pub fn run(config: &GeneratorConfig, tag_override: Option<&str>) -> Result<Outcome, GenerateError> {
    sync::ensure_cloned(&config.clone_dir, &config.remote_url)?;

    let latest = match tag_override {
        Some(tag) => tag.to_string(),
        None => sync::find_latest_tag(&config.clone_dir)?,
    };

    let marker_path = config.marker_path();
    let current = marker::read_marker(&marker_path)
        .map_err(|e| GenerateError::io(&marker_path, e))?;
    info!(
        "latest upstream release: {} (currently synced: {})",
        latest,
        current.as_deref().unwrap_or("never")
    );

    if !marker::needs_sync(current.as_deref(), &latest) {
        return Ok(Outcome::UpToDate(latest));
    }

    sync::checkout_tag(&config.clone_dir, &latest)?;

    extract::reset_output(config)?;
    extract::extract(config, &config.clone_dir)?;
    write_requirements(config, &latest)?;

    marker::write_marker(&marker_path, &latest)
        .map_err(|e| GenerateError::io(&marker_path, e))?;

    Ok(Outcome::Generated(latest))
}

/// Resolve the latest upstream release tag without generating anything.
pub fn resolve_latest(config: &GeneratorConfig) -> Result<String, GenerateError> {
    sync::ensure_cloned(&config.clone_dir, &config.remote_url)?;
    Ok(sync::find_latest_tag(&config.clone_dir)?)
}

fn write_requirements(config: &GeneratorConfig, version: &str) -> Result<(), GenerateError> {
    let requirements_path = config.output_dir.join(REQUIREMENTS_FILE);
    let upstream = read_lines(&requirements_path)?;
    let all = read_lines(&config.clone_dir.join(REQUIREMENTS_ALL_FILE))?;

    let split = requirements::build_requirements(
        &upstream,
        &all,
        version,
        &config.requirements_remove,
        &config.pinned_dependencies,
    )?;

    write_lines(&requirements_path, &split.kept)?;
    write_lines(&config.output_dir.join(REQUIREMENTS_FILE_DEV), &split.removed)
}

fn read_lines(path: &Path) -> Result<Vec<String>, GenerateError> {
    let contents = fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))?;
    Ok(contents.lines().map(str::to_string).collect())
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), GenerateError> {
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(path, contents).map_err(|e| GenerateError::io(path, e))
}
