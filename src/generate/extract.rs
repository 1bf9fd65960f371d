//! Extraction of the upstream test helpers into the package tree
//!
//! A fixed copy plan, executed against a clean checkout. Any missing source
//! path is fatal: it means the upstream `tests/` layout moved and the plan
//! has to be updated by hand.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{
    CONST_FILE, GeneratorConfig, HELPER_FILES, LICENSE_FILE_OUT, LICENSE_FILE_UPSTREAM,
    REQUIREMENTS_FILE,
};
use crate::generate::error::GenerateError;
use crate::generate::rewrite::{self, PROVENANCE_NOTE};

/// How many leading lines of the upstream `const.py` hold the version
/// constants the harness re-exports.
const CONST_VERSION_BLOCK_LINES: usize = 14;

/// Remove any pre-existing output so every run starts from scratch.
///
/// There is no partial-output state: an interrupted run is recovered by
/// simply running again.
pub fn reset_output(config: &GeneratorConfig) -> Result<(), GenerateError> {
    let package = config.package_path();
    if package.is_dir() {
        debug!("removing stale package dir {:?}", package);
        fs::remove_dir_all(&package).map_err(|e| GenerateError::io(&package, e))?;
    }

    let requirements = config.output_dir.join(REQUIREMENTS_FILE);
    if requirements.is_file() {
        fs::remove_file(&requirements).map_err(|e| GenerateError::io(&requirements, e))?;
    }

    Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), GenerateError> {
    if !src.is_file() {
        return Err(GenerateError::MissingSource(src.to_path_buf()));
    }
    fs::copy(src, dst).map_err(|e| GenerateError::io(dst, e))?;
    Ok(())
}

fn create_dir_all(path: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(path).map_err(|e| GenerateError::io(path, e))
}

/// Copy the upstream helpers into the package tree and rewrite them.
pub fn extract(config: &GeneratorConfig, checkout: &Path) -> Result<(), GenerateError> {
    let package = config.package_path();
    info!("extracting upstream helpers into {:?}", package);

    create_dir_all(&package.join("test_util"))?;
    create_dir_all(&package.join("components").join("recorder"))?;

    copy_file(
        &checkout.join(REQUIREMENTS_FILE),
        &config.output_dir.join(REQUIREMENTS_FILE),
    )?;
    copy_file(
        &checkout.join("homeassistant").join(CONST_FILE),
        &package.join(CONST_FILE),
    )?;
    copy_file(
        &checkout.join("tests/test_util/aiohttp.py"),
        &package.join("test_util/aiohttp.py"),
    )?;
    copy_file(
        &checkout.join("tests/test_util/__init__.py"),
        &package.join("test_util/__init__.py"),
    )?;
    copy_file(
        &checkout.join("tests/components/recorder/db_schema_0.py"),
        &package.join("components/recorder/db_schema_0.py"),
    )?;
    copy_file(
        &checkout.join("tests/components/recorder/__init__.py"),
        &package.join("components/recorder/__init__.py"),
    )?;
    copy_file(
        &checkout.join("tests/components/__init__.py"),
        &package.join("components/__init__.py"),
    )?;
    copy_file(
        &checkout.join(LICENSE_FILE_UPSTREAM),
        &config.output_dir.join(LICENSE_FILE_OUT),
    )?;

    for helper in HELPER_FILES {
        let dst = package.join(helper);
        copy_file(&checkout.join("tests").join(helper), &dst)?;

        let depth = helper.matches('/').count();
        rewrite::rewrite_file(&dst, &[rewrite::relative_import_rule(depth)])?;
    }

    // The upstream conftest becomes an importable pytest plugin module.
    let conftest = package.join("conftest.py");
    let plugins = package.join("plugins.py");
    fs::rename(&conftest, &plugins).map_err(|e| GenerateError::io(&conftest, e))?;

    trim_const(&package.join(CONST_FILE))?;

    annotate_tree(&package)?;

    Ok(())
}

/// Keep only the leading version-constant block of the platform's `const.py`,
/// dropping the backports import that has no meaning outside the platform
/// tree.
fn trim_const(path: &Path) -> Result<(), GenerateError> {
    let contents = fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))?;
    let trimmed: Vec<&str> = contents
        .lines()
        .take(CONST_VERSION_BLOCK_LINES)
        .filter(|line| !line.contains("from .backports"))
        .collect();
    let mut out = trimmed.join("\n");
    out.push('\n');
    fs::write(path, out).map_err(|e| GenerateError::io(path, e))
}

/// Add the provenance note to every Python module under `dir`.
fn annotate_tree(dir: &Path) -> Result<(), GenerateError> {
    for path in python_files(dir)? {
        rewrite::annotate_file(&path, PROVENANCE_NOTE)?;
    }
    Ok(())
}

fn python_files(dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let mut found = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| GenerateError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| GenerateError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            found.extend(python_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "py") {
            found.push(path);
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_upstream_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("absent.py");
        let dst = tmp.path().join("out.py");
        let err = copy_file(&src, &dst).unwrap_err();
        assert!(matches!(err, GenerateError::MissingSource(p) if p == src));
    }

    #[test]
    fn trim_const_keeps_version_block_only() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("const.py");
        let mut lines: Vec<String> = (0..CONST_VERSION_BLOCK_LINES + 5)
            .map(|i| format!("LINE_{i} = {i}"))
            .collect();
        lines[3] = "from .backports import whatever".to_string();
        fs::write(&path, lines.join("\n")).unwrap();

        trim_const(&path).unwrap();

        let result = fs::read_to_string(&path).unwrap();
        let kept: Vec<&str> = result.lines().collect();
        assert_eq!(kept.len(), CONST_VERSION_BLOCK_LINES - 1);
        assert!(!result.contains("backports"));
        assert!(result.ends_with('\n'));
    }

    #[test]
    fn python_files_walks_recursively() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("top.py"), "").unwrap();
        fs::write(tmp.path().join("a/b/deep.py"), "").unwrap();
        fs::write(tmp.path().join("a/not_python.txt"), "").unwrap();

        let mut found = python_files(tmp.path()).unwrap();
        found.sort();
        assert_eq!(
            found,
            vec![tmp.path().join("a/b/deep.py"), tmp.path().join("top.py")]
        );
    }
}
