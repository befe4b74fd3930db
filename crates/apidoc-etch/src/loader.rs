//! Declaration file loading
//!
//! Resolves paths relative to the types root, reads and parses `.d.ts` files,
//! and lists the declarations of a directory in a stable order.

use crate::diagnostics::EtchResult;
use crate::utils::syntax::{parse_declaration_source, DeclarationFile};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DECLARATION_SUFFIX: &str = ".d.ts";
const INDEX_DECLARATION: &str = "index.d.ts";

/// Loads declaration files from a types root directory
#[derive(Debug, Clone)]
pub struct DeclarationLoader {
    root: PathBuf,
}

impl DeclarationLoader {
    /// Create a loader for the given types root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The types root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a root-relative path
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Whether a root-relative path names an existing file
    pub fn exists(&self, relative: &str) -> bool {
        self.resolve(relative).is_file()
    }

    /// Read and parse a declaration file
    ///
    /// A missing file is `Ok(None)`, not an error.
    pub fn load(&self, relative: &str) -> EtchResult<Option<DeclarationFile>> {
        let path = self.resolve(relative);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(io::Error::new(
                    e.kind(),
                    format!("Failed to read {}: {}", path.display(), e),
                )
                .into())
            }
        };

        tracing::trace!(file = relative, bytes = text.len(), "parsing declaration");
        parse_declaration_source(relative, text).map(Some)
    }

    /// Root-relative paths of the `.d.ts` files directly inside `dir`,
    /// sorted by file name
    ///
    /// A missing directory yields an empty list.
    pub fn list_declarations(&self, dir: &str, exclude_index: bool) -> Vec<String> {
        let dir = dir.trim_end_matches('/');

        WalkDir::new(self.resolve(dir))
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name.ends_with(DECLARATION_SUFFIX))
            .filter(|name| !(exclude_index && name == INDEX_DECLARATION))
            .map(|name| format!("{}/{}", dir, name))
            .collect()
    }
}
