//! Document output
//!
//! Resolves the package version and writes the final JSON document. Writing is
//! the only step of a run allowed to fail.

use crate::diagnostics::{EtchError, EtchResult};
use crate::model::DocumentationTree;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PackageManifest {
    version: Option<String>,
}

/// Read the `version` field of a `package.json`, falling back when the file
/// is missing, malformed or has no version
pub fn resolve_version(manifest: &Path, fallback: &str) -> String {
    match read_package_version(manifest) {
        Ok(version) => {
            tracing::info!(version = %version, "package version");
            version
        }
        Err(e) => {
            tracing::warn!(
                manifest = %manifest.display(),
                error = %e,
                "could not read package version, using fallback {}",
                fallback
            );
            fallback.to_string()
        }
    }
}

fn read_package_version(manifest: &Path) -> EtchResult<String> {
    let text = fs::read_to_string(manifest)?;
    let package: PackageManifest = serde_json::from_str(&text)?;
    package
        .version
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| EtchError::other(format!("no version in {}", manifest.display())))
}

/// Render a document as 2-space-indented JSON with a trailing newline
pub fn render_document(tree: &DocumentationTree) -> EtchResult<String> {
    let mut json = serde_json::to_string_pretty(tree)?;
    json.push('\n');
    Ok(json)
}

/// Write a document, creating the parent directory if needed
pub fn write_document(tree: &DocumentationTree, path: &Path) -> EtchResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to create {}: {}", parent.display(), e),
            )
        })?;
    }

    let json = render_document(tree)?;
    fs::write(path, json).map_err(|e| {
        std::io::Error::new(e.kind(), format!("Failed to write {}: {}", path.display(), e))
    })?;

    tracing::info!(output = %path.display(), "wrote API documentation");
    Ok(())
}
