//! Run configuration
//!
//! Every field has a default matching the published SunEditor `types/`
//! layout, so an empty config file (or none at all) is a valid configuration.

use crate::diagnostics::{EtchError, EtchResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where each kind of declaration lives inside the types root
///
/// All paths are relative to the types root and use `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Class declaration holding the editor's own methods
    pub editor_file: String,
    /// Directories of core modules (class, factory or function shaped)
    pub core_class_dirs: Vec<String>,
    /// Manifest listing the plugins
    pub plugins_index: String,
    /// Manifest listing the modules
    pub modules_index: String,
    /// Directories of helper modules; `index.d.ts` files are skipped
    pub helper_dirs: Vec<String>,
    /// Namespace of event callbacks
    pub events_file: String,
    /// Directory scanned first for type definitions
    pub typedef_dir: String,
    /// Files scanned for type definitions after the typedef directory
    pub core_type_files: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            editor_file: "core/editor.d.ts".to_string(),
            core_class_dirs: vec![
                "core/class".to_string(),
                "core/base".to_string(),
                "core/event".to_string(),
            ],
            plugins_index: "plugins/index.d.ts".to_string(),
            modules_index: "modules/index.d.ts".to_string(),
            helper_dirs: vec!["helper".to_string(), "helper/dom".to_string()],
            events_file: "events.d.ts".to_string(),
            typedef_dir: "typedef".to_string(),
            core_type_files: vec![
                "core/editor.d.ts".to_string(),
                "core/config/options.d.ts".to_string(),
                "core/config/context.d.ts".to_string(),
            ],
        }
    }
}

/// Configuration for one documentation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtchConfig {
    /// Root of the declaration tree
    pub types_root: PathBuf,
    /// JSON document to write
    pub output: PathBuf,
    /// `package.json` supplying the version; `<types_root>/../package.json`
    /// when unset
    pub package_manifest: Option<PathBuf>,
    /// Version used when the package manifest cannot be read
    pub fallback_version: String,
    pub layout: LayoutConfig,
}

impl Default for EtchConfig {
    fn default() -> Self {
        Self {
            types_root: PathBuf::from("node_modules/suneditor/types"),
            output: PathBuf::from("src/data/api/api-docs.json"),
            package_manifest: None,
            fallback_version: "3.x.x".to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

impl EtchConfig {
    /// Create a config for a types root with every other field defaulted
    pub fn new(types_root: impl Into<PathBuf>) -> Self {
        Self {
            types_root: types_root.into(),
            ..Default::default()
        }
    }

    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> EtchResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> EtchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            EtchError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.rebase(base);
        }

        tracing::debug!(config = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        let rebase = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };
        self.types_root = rebase(&self.types_root);
        self.output = rebase(&self.output);
        self.package_manifest = self.package_manifest.as_deref().map(rebase);
    }

    /// The package manifest to read the version from
    pub fn package_manifest_path(&self) -> PathBuf {
        match &self.package_manifest {
            Some(path) => path.clone(),
            None => self.types_root.join("..").join("package.json"),
        }
    }

    /// Check the values that cannot be defaulted away
    pub fn validate(&self) -> EtchResult<()> {
        if self.output.as_os_str().is_empty() {
            return Err(EtchError::config("output path is empty"));
        }
        if self.types_root.as_os_str().is_empty() {
            return Err(EtchError::config("types_root is empty"));
        }
        if self.fallback_version.trim().is_empty() {
            return Err(EtchError::config("fallback_version is empty"));
        }
        Ok(())
    }
}
