//! Dependency-manifest rewriting
//!
//! The upstream test-requirements manifest mixes real test dependencies with
//! development-only tooling (linters, type stubs, coverage upload). The
//! packaged harness keeps the former, moves the latter into a separate
//! dev-only manifest, and pins the platform itself plus a handful of
//! integration dependencies at the exact upstream versions.

use regex::Regex;

use crate::generate::error::GenerateError;
use crate::generate::rewrite::PROVENANCE_NOTE;

/// The split of an upstream requirements manifest.
#[derive(Debug, Default, PartialEq)]
pub struct RequirementsSplit {
    /// Lines kept for the packaged harness, provenance header included.
    pub kept: Vec<String>,
    /// Development-only lines moved to the dev manifest.
    pub removed: Vec<String>,
}

/// Decide whether a manifest line is a real test requirement.
///
/// Lines without a `==` pin are comments or unknown packages and are kept.
/// Pinned `types-*` stub packages and anything on the removal list are
/// development-only.
fn is_test_requirement(line: &str, remove: &[String], types_stub: &Regex) -> bool {
    if !line.contains("==") {
        return true;
    }

    if types_stub.is_match(line) {
        return false;
    }

    let name = line.split("==").next().unwrap_or(line);
    !remove.iter().any(|r| r == name.trim())
}

/// Find the manifest line pinning `dependency`.
///
/// A lookup miss is fatal: it means the upstream integration dropped the
/// dependency and the extraction plan needs updating.
pub fn find_dependency<'a>(
    dependency: &str,
    manifest: &'a [String],
) -> Result<&'a str, GenerateError> {
    manifest
        .iter()
        .map(String::as_str)
        .find(|line| line.contains(dependency))
        .ok_or_else(|| GenerateError::DependencyNotFound(dependency.to_string()))
}

/// Rewrite the upstream test-requirements manifest.
///
/// - strips development-only requirements into `removed`
/// - appends `homeassistant==<version>`
/// - appends the exact pins for `pinned` found in `requirements_all`
/// - prepends the provenance header to both halves
pub fn build_requirements(
    upstream: &[String],
    requirements_all: &[String],
    version: &str,
    remove: &[String],
    pinned: &[String],
) -> Result<RequirementsSplit, GenerateError> {
    // types-* stub packages track mypy, not the platform's test suite
    let types_stub = Regex::new(r"^types-.+").expect("valid regex");

    let mut split = RequirementsSplit::default();
    for line in upstream {
        if is_test_requirement(line, remove, &types_stub) {
            split.kept.push(line.clone());
        } else {
            split.removed.push(line.clone());
        }
    }

    split.kept.push(format!("homeassistant=={version}"));
    for dependency in pinned {
        split
            .kept
            .push(find_dependency(dependency, requirements_all)?.to_string());
    }

    let header = format!("# {PROVENANCE_NOTE}");
    split.kept.insert(0, header.clone());
    split.removed.insert(0, header);

    Ok(split)
}
