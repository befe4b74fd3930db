//! ApiDocBuilder - Main API for documentation generation
//!
//! Configures a run, assembles the structure, stamps it with a version and
//! timestamp, and writes the JSON document.

use crate::assembler::{Assembler, AssemblyStats};
use crate::config::{EtchConfig, LayoutConfig};
use crate::diagnostics::{Diagnostic, DiagnosticSeverity, EtchResult};
use crate::model::DocumentationTree;
use crate::writer::{resolve_version, write_document};
use std::path::PathBuf;

/// Result of a documentation run
#[derive(Debug)]
pub struct BuildOutput {
    /// The assembled document
    pub tree: DocumentationTree,
    /// Where the document was written; `None` for a dry run
    pub output_path: Option<PathBuf>,
    /// Counts gathered while assembling
    pub stats: AssemblyStats,
    /// Everything reported while assembling
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutput {
    /// Total method count (editor, editor subgroups, events)
    pub fn total_methods(&self) -> usize {
        self.stats.total_methods()
    }

    /// Diagnostics at warning level or above
    pub fn problems(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity != DiagnosticSeverity::Info)
    }
}

/// Builder for configuring documentation generation
///
/// # Example
///
/// ```no_run
/// use apidoc_etch::ApiDocBuilder;
///
/// ApiDocBuilder::new("node_modules/suneditor/types")
///     .output("src/data/api/api-docs.json")
///     .fallback_version("3.x.x")
///     .build()
///     .expect("Failed to generate API docs");
/// ```
#[derive(Debug, Clone)]
pub struct ApiDocBuilder {
    config: EtchConfig,
    dry_run: bool,
}

impl ApiDocBuilder {
    /// Create a builder for a types root with default settings
    pub fn new(types_root: impl Into<PathBuf>) -> Self {
        Self::from_config(EtchConfig::new(types_root))
    }

    /// Create a builder from a loaded configuration
    pub fn from_config(config: EtchConfig) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    /// Set the types root
    pub fn types_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.types_root = path.into();
        self
    }

    /// Set the output file
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    /// Set the package manifest the version is read from
    pub fn package_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.package_manifest = Some(path.into());
        self
    }

    /// Set the version used when the package manifest is unreadable
    pub fn fallback_version(mut self, version: impl Into<String>) -> Self {
        self.config.fallback_version = version.into();
        self
    }

    /// Replace the declaration layout
    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    /// Assemble without writing the document
    pub fn dry_run(mut self, enable: bool) -> Self {
        self.dry_run = enable;
        self
    }

    /// The configuration the run will use
    pub fn config(&self) -> &EtchConfig {
        &self.config
    }

    /// Build the documentation
    ///
    /// This method:
    /// 1. Assembles the structure from the types root
    /// 2. Resolves the package version
    /// 3. Writes the JSON document (unless this is a dry run)
    pub fn build(self) -> EtchResult<BuildOutput> {
        self.config.validate()?;

        if !self.config.types_root.is_dir() {
            tracing::warn!(
                root = %self.config.types_root.display(),
                "types root does not exist, the document will be empty"
            );
        }

        let assembly = Assembler::new(&self.config).assemble();
        let version = resolve_version(
            &self.config.package_manifest_path(),
            &self.config.fallback_version,
        );
        let tree = DocumentationTree::new(version, assembly.structure);

        let output_path = if self.dry_run {
            tracing::info!("dry run, document not written");
            None
        } else {
            write_document(&tree, &self.config.output)?;
            Some(self.config.output.clone())
        };

        Ok(BuildOutput {
            tree,
            output_path,
            stats: assembly.stats,
            diagnostics: assembly.diagnostics,
        })
    }
}
