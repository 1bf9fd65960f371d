use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

// =============================================================================
// Upstream layout constants
// =============================================================================

/// Upstream platform repository.
pub const DEFAULT_REMOTE_URL: &str = "https://github.com/home-assistant/core.git";

/// Name of the generated package directory.
pub const PACKAGE_DIR: &str = "pytest_homeassistant_custom_component";

/// Upstream test-requirements manifest, copied and filtered.
pub const REQUIREMENTS_FILE: &str = "requirements_test.txt";

/// Where the filtered-out development-only requirements end up.
pub const REQUIREMENTS_FILE_DEV: &str = "requirements_dev.txt";

/// Upstream manifest holding the exact pins for every integration dependency.
pub const REQUIREMENTS_ALL_FILE: &str = "requirements_all.txt";

/// Single-line marker recording the last synced upstream version.
pub const MARKER_FILE: &str = "ha_version";

/// Version-constant module extracted from the platform source.
pub const CONST_FILE: &str = "const.py";

/// Upstream license, republished alongside the package.
pub const LICENSE_FILE_UPSTREAM: &str = "LICENSE.md";
pub const LICENSE_FILE_OUT: &str = "LICENSE_HA_CORE.md";

/// Test-helper files extracted from the upstream `tests/` tree. These are
/// the files whose internal `tests.` imports get rewritten to relative form.
pub const HELPER_FILES: &[&str] = &[
    "__init__.py",
    "common.py",
    "conftest.py",
    "ignore_uncaught_exceptions.py",
    "components/recorder/common.py",
];

/// Development-only requirements stripped from the upstream manifest, i.e.
/// packages unrelated to actually running the platform's tests.
pub const DEV_ONLY_REQUIREMENTS: &[&str] = &["codecov", "mypy", "pre-commit", "pylint", "astroid"];

/// Integration dependencies the packaged helpers need at the exact upstream
/// pin, looked up in `requirements_all.txt`.
pub const PINNED_DEPENDENCIES: &[&str] = &["sqlalchemy", "paho-mqtt", "fnvhash", "numpy"];

/// Generator configuration, optionally loaded from a JSON file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Upstream repository to clone.
    pub remote_url: String,
    /// Directory holding the local clone. Defaults to the user cache dir.
    pub clone_dir: PathBuf,
    /// Directory the package, manifests, and marker are written into.
    pub output_dir: PathBuf,
    /// Development-only requirement names to strip.
    pub requirements_remove: Vec<String>,
    /// Dependencies to append at their exact upstream pin.
    pub pinned_dependencies: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            clone_dir: clone_dir(),
            output_dir: PathBuf::from("."),
            requirements_remove: DEV_ONLY_REQUIREMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            pinned_dependencies: PINNED_DEPENDENCIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a JSON file; missing fields fall back to the
    /// defaults above.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.output_dir.join(MARKER_FILE)
    }

    pub fn package_path(&self) -> PathBuf {
        self.output_dir.join(PACKAGE_DIR)
    }
}

/// Returns the directory the upstream clone is kept in.
/// Uses $XDG_CACHE_HOME/hass-harness-gen if XDG_CACHE_HOME is set,
/// otherwise falls back to ~/.cache/hass-harness-gen,
/// or ./hass-harness-gen if neither is available.
pub fn clone_dir() -> PathBuf {
    clone_dir_with_env(std::env::var("XDG_CACHE_HOME").ok(), dirs::home_dir()).join("core")
}

fn clone_dir_with_env(xdg_cache_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let cache_dir = xdg_cache_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".cache")))
        .unwrap_or_else(|| PathBuf::from("."));

    cache_dir.join("hass-harness-gen")
}
