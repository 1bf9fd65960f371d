mod helper;

use std::fs;

use hass_harness_gen::repo::error::SyncError;
use hass_harness_gen::repo::{marker, sync};
use helper::upstream;
use tempfile::TempDir;

#[test]
fn ensure_cloned_clones_from_local_remote() {
    let tmp = TempDir::new().unwrap();
    let origin = tmp.path().join("origin");
    fs::create_dir(&origin).unwrap();
    upstream::write_upstream_tree(&origin);
    upstream::init_repo(&origin, &["2022.10.4"]);

    let clone = tmp.path().join("clone");
    sync::ensure_cloned(&clone, origin.to_str().unwrap()).unwrap();

    assert!(clone.join("requirements_test.txt").is_file());
}

#[test]
fn ensure_cloned_is_a_noop_when_directory_exists() {
    let tmp = TempDir::new().unwrap();
    let clone = tmp.path().join("clone");
    fs::create_dir(&clone).unwrap();
    fs::write(clone.join("sentinel"), "untouched").unwrap();

    // The remote does not even exist; an existing directory short-circuits.
    sync::ensure_cloned(&clone, "/nonexistent/remote").unwrap();

    assert_eq!(
        fs::read_to_string(clone.join("sentinel")).unwrap(),
        "untouched"
    );
}

#[test]
fn ensure_cloned_propagates_clone_failure() {
    let tmp = TempDir::new().unwrap();
    let clone = tmp.path().join("clone");

    let err = sync::ensure_cloned(&clone, tmp.path().join("missing").to_str().unwrap());
    assert!(matches!(err, Err(SyncError::GitCommand { .. })));
}

#[test]
fn find_latest_tag_prefers_stable_calendar_releases() {
    let tmp = TempDir::new().unwrap();
    upstream::write_upstream_tree(tmp.path());
    upstream::init_repo(
        tmp.path(),
        &["v0.118.5", "2021.3.0", "2021.11.0b0", "2022.3.0b6", "2022.10.4"],
    );

    assert_eq!(sync::find_latest_tag(tmp.path()).unwrap(), "2022.10.4");
}

#[test]
fn find_latest_tag_fails_without_tags() {
    let tmp = TempDir::new().unwrap();
    upstream::write_upstream_tree(tmp.path());
    upstream::init_repo(tmp.path(), &[]);

    let err = sync::find_latest_tag(tmp.path());
    assert!(matches!(err, Err(SyncError::NoTags(_))));
}

#[test]
fn checkout_tag_discards_local_modifications() {
    let tmp = TempDir::new().unwrap();
    upstream::write_upstream_tree(tmp.path());
    upstream::init_repo(tmp.path(), &["2022.10.4"]);

    fs::write(tmp.path().join("LICENSE.md"), "scribbled over").unwrap();
    sync::checkout_tag(tmp.path(), "2022.10.4").unwrap();

    assert_eq!(
        fs::read_to_string(tmp.path().join("LICENSE.md")).unwrap(),
        "Apache License 2.0\n"
    );
}

#[test]
fn marker_round_trips_and_absence_means_never_synced() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("ha_version");

    assert_eq!(marker::read_marker(&path).unwrap(), None);

    marker::write_marker(&path, "2022.10.4").unwrap();
    assert_eq!(
        marker::read_marker(&path).unwrap().as_deref(),
        Some("2022.10.4")
    );
}
