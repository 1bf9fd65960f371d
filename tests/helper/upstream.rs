//! Builds a miniature upstream platform repository for integration tests.
//!
//! The tree mirrors the handful of paths the extraction plan touches; git
//! operations run against the real `git` binary with local-path remotes, so
//! no network is involved.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run a git subcommand in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=tester",
            "-c",
            "user.email=tester@example.com",
        ])
        .args(args)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Lay out the upstream files the extraction plan expects.
pub fn write_upstream_tree(dir: &Path) {
    let mut const_py = String::from("\"\"\"Constants used by Home Assistant components.\"\"\"\n");
    const_py.push_str("from .backports.enum import StrEnum\n");
    const_py.push_str("MAJOR_VERSION = 2022\n");
    const_py.push_str("MINOR_VERSION = 10\n");
    const_py.push_str("PATCH_VERSION = \"4\"\n");
    for i in 0..12 {
        const_py.push_str(&format!("EXTRA_CONST_{i} = {i}\n"));
    }
    write(dir, "homeassistant/const.py", &const_py);

    write(
        dir,
        "requirements_test.txt",
        "# Home Assistant test dependencies\n\
         pytest==7.2.0\n\
         freezegun==1.2.2\n\
         mypy==0.991\n\
         types-requests==2.28.11\n\
         codecov==2.1.12\n",
    );
    write(
        dir,
        "requirements_all.txt",
        "sqlalchemy==1.4.44\n\
         paho-mqtt==1.6.1\n\
         fnvhash==0.1.0\n\
         numpy==1.23.2\n",
    );
    write(dir, "LICENSE.md", "Apache License 2.0\n");

    write(dir, "tests/__init__.py", "\"\"\"Tests for Home Assistant.\"\"\"\n");
    write(
        dir,
        "tests/common.py",
        "\"\"\"Test the helper method for writing tests.\"\"\"\n\
         def get_test_home_assistant():\n    pass\n",
    );
    write(
        dir,
        "tests/conftest.py",
        "\"\"\"Set up some common test helper things.\"\"\"\n\
         from tests.common import get_test_home_assistant\n",
    );
    write(
        dir,
        "tests/ignore_uncaught_exceptions.py",
        "\"\"\"List of tests that have uncaught exceptions today.\"\"\"\n\
         IGNORE_UNCAUGHT_EXCEPTIONS = []\n",
    );
    write(
        dir,
        "tests/test_util/__init__.py",
        "\"\"\"Test utilities.\"\"\"\n",
    );
    write(
        dir,
        "tests/test_util/aiohttp.py",
        "\"\"\"Aiohttp test utils.\"\"\"\n\
         class AiohttpClientMocker:\n    pass\n",
    );
    write(
        dir,
        "tests/components/__init__.py",
        "\"\"\"Tests for the components.\"\"\"\n",
    );
    write(
        dir,
        "tests/components/recorder/__init__.py",
        "\"\"\"Tests for the recorder component.\"\"\"\n",
    );
    write(
        dir,
        "tests/components/recorder/common.py",
        "\"\"\"Common test utils for working with recorder.\"\"\"\n\
         from tests.common import get_test_home_assistant\n",
    );
    write(
        dir,
        "tests/components/recorder/db_schema_0.py",
        "\"\"\"Models for SQLAlchemy, schema version 0.\"\"\"\n\
         SCHEMA_VERSION = 0\n",
    );
}

/// Initialize `dir` as a git repository, commit everything, and tag it.
pub fn init_repo(dir: &Path, tags: &[&str]) {
    git(dir, &["init", "--quiet"]);
    git(dir, &["add", "."]);
    git(dir, &["commit", "--quiet", "-m", "initial import"]);
    for tag in tags {
        git(dir, &["tag", tag]);
    }
}
