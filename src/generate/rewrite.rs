//! Textual rewriting of the extracted helper files
//!
//! Two rewrites are applied: upstream-internal `tests.` imports become
//! relative imports at the file's depth in the package, and every module
//! docstring gains a provenance note naming the upstream origin. Both are
//! plain string substitution; there is nothing syntax-aware here.

use std::fs;
use std::path::Path;

use crate::generate::error::GenerateError;

/// Provenance note appended to every extracted module docstring.
pub const PROVENANCE_NOTE: &str =
    "This file is originally from homeassistant/core and modified by pytest-homeassistant-custom-component.";

/// A single literal find/replace rule.
#[derive(Debug, Clone)]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
}

/// Apply substitution rules in order over the whole file contents.
pub fn apply_substitutions(contents: &str, rules: &[Substitution]) -> String {
    rules.iter().fold(contents.to_string(), |acc, rule| {
        acc.replace(&rule.pattern, &rule.replacement)
    })
}

/// Read a file, apply the rules, write it back in place.
pub fn rewrite_file(path: &Path, rules: &[Substitution]) -> Result<(), GenerateError> {
    let contents = fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))?;
    let rewritten = apply_substitutions(&contents, rules);
    fs::write(path, rewritten).map_err(|e| GenerateError::io(path, e))
}

/// The rule turning upstream-internal `tests.` imports into relative
/// imports, with one dot per directory level plus one.
///
/// A file at the package root imports `.common`; one nested a level deeper
/// (e.g. `components/recorder/common.py`) imports `..common` and so on.
pub fn relative_import_rule(depth: usize) -> Substitution {
    Substitution {
        pattern: "tests.".to_string(),
        replacement: ".".repeat(depth + 1),
    }
}

/// Splice the provenance note into a module's leading docstring.
///
/// Handles both one-line (`"""Doc."""`) and multi-line docstrings. A file
/// without a leading docstring gets a fresh one holding only the note.
pub fn annotate_docstring(contents: &str, note: &str) -> String {
    const QUOTES: &str = "\"\"\"";

    let Some(rest) = contents.strip_prefix(QUOTES) else {
        return format!("{QUOTES}\n{note}\n{QUOTES}\n{contents}");
    };

    let Some(end) = rest.find(QUOTES) else {
        // Unterminated docstring, leave the file alone.
        return contents.to_string();
    };

    let doc = rest[..end].trim_end_matches('\n');
    let body = &rest[end + QUOTES.len()..];
    let body = body.strip_prefix('\n').unwrap_or(body);

    format!("{QUOTES}\n{doc}\n\n{note}\n{QUOTES}\n{body}")
}

/// Annotate the docstring of a file on disk.
pub fn annotate_file(path: &Path, note: &str) -> Result<(), GenerateError> {
    let contents = fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))?;
    let annotated = annotate_docstring(&contents, note);
    fs::write(path, annotated).map_err(|e| GenerateError::io(path, e))
}
