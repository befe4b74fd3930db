//! Test utilities for apidoc-etch.
//!
//! Builds throwaway declaration trees on disk so loaders, assemblers and
//! builders can be exercised against real files.
//!
//! # Example
//!
//! ```
//! use apidoc_etch::test::TypesFixture;
//!
//! let fixture = TypesFixture::new();
//! fixture.write("core/editor.d.ts", "declare class Editor { focus(): void; }");
//! let config = fixture.config();
//! assert!(config.types_root.join("core/editor.d.ts").is_file());
//! ```

use crate::config::EtchConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a `types/` root and its sibling
/// `package.json`
///
/// Everything is removed when the fixture is dropped.
pub struct TypesFixture {
    dir: TempDir,
}

impl Default for TypesFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TypesFixture {
    /// Create an empty fixture
    ///
    /// # Panics
    ///
    /// Panics when the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("types")).expect("create types root");
        Self { dir }
    }

    /// The fixture's base directory (parent of the types root)
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The types root
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("types")
    }

    /// Write a file relative to the types root, creating directories
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture directory");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Write the sibling `package.json` with a version
    pub fn write_package_version(&self, version: &str) -> PathBuf {
        let path = self.dir.path().join("package.json");
        let manifest = format!("{{\n  \"name\": \"suneditor\",\n  \"version\": \"{}\"\n}}\n", version);
        fs::write(&path, manifest).expect("write package.json");
        path
    }

    /// A configuration rooted at this fixture, writing to `api-docs.json`
    /// in the base directory
    pub fn config(&self) -> EtchConfig {
        let mut config = EtchConfig::new(self.root());
        config.output = self.dir.path().join("api-docs.json");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = TypesFixture::new();
        let file = fixture.write("plugins/command/bold/index.d.ts", "");
        fixture.write_package_version("3.0.0");

        assert!(file.is_file());
        assert!(fixture.path().join("package.json").is_file());
        assert_eq!(
            fixture.config().package_manifest_path(),
            fixture.root().join("..").join("package.json")
        );
    }
}
