//! The sync marker: a single-line file recording which upstream version was
//! last packaged.
//!
//! The marker is written only after a fully successful extraction pass, so a
//! failure mid-run leaves the previous value in place and the next run redoes
//! the whole extraction from a clean checkout.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// Read the marker file. An absent file means "never synced".
pub fn read_marker(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents.trim().to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Overwrite the marker with the tag that was just packaged.
pub fn write_marker(path: &Path, tag: &str) -> io::Result<()> {
    debug!("writing marker {:?} = {}", path, tag);
    fs::write(path, tag)
}

/// Decide whether a new extraction pass is needed.
///
/// Exact string comparison on the marker value, deliberately not
/// version-aware: a marker holding `2022.10.4b0` forces a resync to
/// `2022.10.4` even though the versions compare as ordered. Latest-tag
/// SELECTION is version-aware, sync NECESSITY is not.
pub fn needs_sync(marker: Option<&str>, latest: &str) -> bool {
    match marker {
        None => true,
        Some(current) => current.is_empty() || current != latest,
    }
}
