//! Manifest parsing: extract package names from dependency manifests
//!
//! Two formats are recognized by content shape rather than file extension:
//! a lockfile-style line format (one requirement per line) and a JSON
//! manifest object with `dependencies`/`devDependencies` mappings.

use crate::error::{Result, ScanError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Maximum accepted package name length
const MAX_NAME_LEN: usize = 128;

/// Check a package name against the safe-name pattern
/// `[A-Za-z0-9][A-Za-z0-9._-]{0,127}`.
///
/// Names flow into registry request URLs, so anything outside this
/// character class is rejected before it reaches the network layer.
pub fn is_safe_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or('\0');
    if !first.is_ascii_alphanumeric() {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// JSON manifest with `dependencies` and `devDependencies` mappings
#[derive(Debug, Deserialize)]
struct ObjectManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, String>,
}

/// Parse a dependency manifest and return the declared package names.
///
/// Line-format manifests preserve file order; JSON manifests yield a
/// de-duplicated union of both dependency maps in unspecified order.
/// An unreadable file or malformed JSON aborts the scan.
pub fn parse_manifest(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ScanError::manifest_read(path.display().to_string(), e))?;

    let names = if text.trim_start().starts_with('{') {
        parse_object_manifest(path, &text)?
    } else {
        parse_line_manifest(&text)
    };

    debug!("Parsed {} package names from {}", names.len(), path.display());
    Ok(names)
}

fn parse_object_manifest(path: &Path, text: &str) -> Result<Vec<String>> {
    let manifest: ObjectManifest = serde_json::from_str(text)
        .map_err(|e| ScanError::manifest_parse(path.display().to_string(), e.to_string()))?;

    let names: BTreeSet<String> = manifest
        .dependencies
        .into_keys()
        .chain(manifest.dev_dependencies.into_keys())
        .filter(|n| is_safe_name(n))
        .collect();

    Ok(names.into_iter().collect())
}

fn parse_line_manifest(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        // Blank lines, comments, and flag/editable-install lines
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        if let Some(name) = leading_name_token(line) {
            names.push(name.to_string());
        }
    }
    names
}

/// Extract the leading safe-name token from a requirement line, stripping
/// version specifiers and extras. Returns `None` when the line does not
/// start with a safe-name character.
fn leading_name_token(line: &str) -> Option<&str> {
    let mut end = 0;
    for (i, c) in line.char_indices() {
        let ok = if i == 0 {
            c.is_ascii_alphanumeric()
        } else {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
        };
        if !ok {
            break;
        }
        end = i + c.len_utf8();
    }
    let token = &line[..end];
    if is_safe_name(token) {
        Some(token)
    } else {
        None
    }
}
