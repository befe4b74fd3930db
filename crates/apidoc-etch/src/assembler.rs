//! Structure assembly
//!
//! Walks the declaration tree in a fixed order, runs the extractors for each
//! group and folds the results into a [`Structure`]. Nothing here fails: a file
//! that is missing, unreadable or oddly shaped contributes nothing and leaves
//! a diagnostic behind.

use crate::config::{EtchConfig, LayoutConfig};
use crate::diagnostics::{Diagnostic, DiagnosticsCollector};
use crate::extract::{
    extract_events, extract_types, read_manifest, ClassMembers, ExportedFunctions, Extraction,
    FallbackChain, ManifestEntry, MethodStrategy, TypeRegistry,
};
use crate::loader::DeclarationLoader;
use crate::model::{MethodDescriptor, Structure, Subgroup};
use crate::utils::syntax::{declaration_stem, DeclarationFile};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

/// Display title for an identifier: a space before each capital, first
/// letter uppercased
///
/// `fontColor` becomes `Font Color`.
pub fn title_case(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Counts gathered while assembling, for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub editor_methods: usize,
    pub editor_subgroup_methods: usize,
    pub plugin_methods: usize,
    pub module_methods: usize,
    pub helper_methods: usize,
    pub events: usize,
    pub types: usize,
    /// Manifest entries that resolved to no file
    pub skipped_entries: usize,
    pub warnings: usize,
}

impl AssemblyStats {
    /// Editor methods, editor subgroup methods and events
    pub fn total_methods(&self) -> usize {
        self.editor_methods + self.editor_subgroup_methods + self.events
    }
}

/// Result of a full assembly
#[derive(Debug, Clone)]
pub struct Assembly {
    pub structure: Structure,
    pub stats: AssemblyStats,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a [`Structure`] from a types root
pub struct Assembler<'a> {
    layout: &'a LayoutConfig,
    loader: DeclarationLoader,
    diagnostics: DiagnosticsCollector,
    stats: AssemblyStats,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a EtchConfig) -> Self {
        Self {
            layout: &config.layout,
            loader: DeclarationLoader::new(&config.types_root),
            diagnostics: DiagnosticsCollector::new(),
            stats: AssemblyStats::default(),
        }
    }

    /// Run every phase and return the assembled structure
    pub fn assemble(mut self) -> Assembly {
        info!(root = %self.loader.root().display(), "assembling API structure");

        let mut structure = Structure::default();

        structure.editor.methods = self.editor_methods();
        self.stats.editor_methods = structure.editor.methods.len();

        structure.editor.subgroups = self.core_subgroups();
        self.stats.editor_subgroup_methods = count_methods(&structure.editor.subgroups);

        let plugins_index = self.layout.plugins_index.clone();
        let (plugins, plugin_files) = self.manifest_subgroups(&plugins_index, ManifestGroup::Plugins);
        structure.plugins.subgroups = plugins;
        self.stats.plugin_methods = count_methods(&structure.plugins.subgroups);

        let modules_index = self.layout.modules_index.clone();
        let (modules, _) = self.manifest_subgroups(&modules_index, ManifestGroup::Modules);
        structure.modules.subgroups = modules;
        self.stats.module_methods = count_methods(&structure.modules.subgroups);

        structure.helpers.subgroups = self.helper_subgroups();
        self.stats.helper_methods = count_methods(&structure.helpers.subgroups);

        structure.events.methods = self.events();
        self.stats.events = structure.events.methods.len();

        let type_sources = self.type_sources(plugin_files);
        let registry = type_sources
            .iter()
            .fold(TypeRegistry::new(), |registry, source| {
                self.scan_types(registry, source)
            });
        structure.types.items = registry.into_items();
        self.stats.types = structure.types.items.len();
        info!(count = self.stats.types, "Type Definitions");

        self.stats.warnings = self.diagnostics.warning_count();
        info!(
            total_methods = self.stats.total_methods(),
            warnings = self.stats.warnings,
            "assembly complete"
        );

        Assembly {
            structure,
            stats: self.stats,
            diagnostics: self.diagnostics.into_diagnostics(),
        }
    }

    fn editor_methods(&mut self) -> Vec<MethodDescriptor> {
        let editor_file = self.layout.editor_file.clone();
        let methods = match self.load(&editor_file) {
            Some(file) => self.absorb(ClassMembers.extract(&file)),
            None => Vec::new(),
        };
        info!(count = methods.len(), "Editor Instance");
        methods
    }

    fn core_subgroups(&mut self) -> IndexMap<String, Subgroup> {
        let chain = FallbackChain::core_classes();
        let mut subgroups = IndexMap::new();

        for dir in self.layout.core_class_dirs.clone() {
            for relative in self.loader.list_declarations(&dir, false) {
                let key = declaration_stem(&relative).to_string();
                let Some(file) = self.load(&relative) else {
                    continue;
                };

                let outcome = chain.run(&file);
                let methods = self.absorb(outcome.extraction);
                if methods.is_empty() {
                    debug!(file = %relative, "no methods found");
                    continue;
                }

                let title = format!("editor.{}", key);
                debug!(
                    file = %relative,
                    strategy = outcome.strategy.unwrap_or_default(),
                    "core module extracted"
                );
                info!(count = methods.len(), "{}", title);
                subgroups.insert(
                    key.clone(),
                    Subgroup::described(title, format!("{} class methods", key), methods),
                );
            }
        }

        subgroups
    }

    /// Subgroups for a manifest-driven group, plus the files they came from
    fn manifest_subgroups(
        &mut self,
        index: &str,
        group: ManifestGroup,
    ) -> (IndexMap<String, Subgroup>, Vec<String>) {
        let mut subgroups = IndexMap::new();
        let mut resolved_files = Vec::new();

        let entries = self.manifest(index);
        let base = parent_dir(index);

        for entry in entries {
            let title = title_case(&entry.name);
            let Some(relative) = self.resolve_entry(base, &entry) else {
                self.stats.skipped_entries += 1;
                self.diagnostics.add(
                    Diagnostic::warning(format!("{}: File not found", title))
                        .in_file(join_relative(base, &entry.path))
                        .with_code("manifest"),
                );
                continue;
            };
            resolved_files.push(relative.clone());

            let Some(file) = self.load(&relative) else {
                continue;
            };
            let methods = self.absorb(ClassMembers.extract(&file));
            if methods.is_empty() {
                debug!(file = %relative, "no methods found");
                continue;
            }

            info!(count = methods.len(), "{}", title);
            let subgroup = match group {
                ManifestGroup::Plugins => Subgroup::categorized(title, entry.category(), methods),
                ManifestGroup::Modules => {
                    let description = format!("{} module", title);
                    Subgroup::described(title, description, methods)
                }
            };
            subgroups.insert(entry.name.clone(), subgroup);
        }

        (subgroups, resolved_files)
    }

    fn helper_subgroups(&mut self) -> IndexMap<String, Subgroup> {
        let mut subgroups = IndexMap::new();

        for dir in self.layout.helper_dirs.clone() {
            for relative in self.loader.list_declarations(&dir, true) {
                let key = declaration_stem(&relative).to_string();
                let Some(file) = self.load(&relative) else {
                    continue;
                };

                let functions = self.absorb(ExportedFunctions.extract(&file));
                if functions.is_empty() {
                    continue;
                }

                let title = title_case(&key);
                info!(count = functions.len(), "{} (functions)", title);
                let description = format!("{} utility functions", title);
                subgroups.insert(key, Subgroup::described(title, description, functions));
            }
        }

        subgroups
    }

    fn events(&mut self) -> Vec<MethodDescriptor> {
        let events_file = self.layout.events_file.clone();
        let events = match self.load_required(&events_file, "Events file not found") {
            Some(file) => self.absorb(extract_events(&file)),
            None => Vec::new(),
        };
        info!(count = events.len(), "Event Callbacks");
        events
    }

    /// Files scanned for types, in priority order
    fn type_sources(&self, plugin_files: Vec<String>) -> Vec<String> {
        let mut sources = self.loader.list_declarations(&self.layout.typedef_dir, false);
        sources.extend(self.layout.core_type_files.iter().cloned());
        sources.extend(plugin_files);
        sources
    }

    fn scan_types(&mut self, registry: TypeRegistry, relative: &str) -> TypeRegistry {
        match self.load(relative) {
            Some(file) => {
                let types = self.absorb(extract_types(&file));
                registry.merge(types)
            }
            None => registry,
        }
    }

    /// Folder form first, then the sibling file
    fn resolve_entry(&self, base: &str, entry: &ManifestEntry) -> Option<String> {
        let stem = join_relative(base, &entry.path);
        [format!("{}/index.d.ts", stem), format!("{}.d.ts", stem)]
            .into_iter()
            .find(|candidate| self.loader.exists(candidate))
    }

    fn manifest(&mut self, index: &str) -> Vec<ManifestEntry> {
        match self.load_required(index, "Index file not found") {
            Some(file) => {
                let entries = read_manifest(&file);
                debug!(index, count = entries.len(), "manifest read");
                entries
            }
            None => Vec::new(),
        }
    }

    /// Load a file whose absence deserves a warning rather than a debug note
    fn load_required(&mut self, relative: &str, missing: &str) -> Option<DeclarationFile> {
        if !self.loader.exists(relative) {
            self.diagnostics.add(
                Diagnostic::warning(missing)
                    .in_file(relative)
                    .with_code("missing"),
            );
            return None;
        }
        self.load(relative)
    }

    fn load(&mut self, relative: &str) -> Option<DeclarationFile> {
        match self.loader.load(relative) {
            Ok(Some(file)) => {
                if file.has_syntax_errors() {
                    self.diagnostics.add(
                        Diagnostic::info("syntax errors recovered, extraction may be partial")
                            .in_file(relative)
                            .with_code("syntax"),
                    );
                }
                Some(file)
            }
            Ok(None) => {
                self.diagnostics.add(
                    Diagnostic::info("file not found")
                        .in_file(relative)
                        .with_code("missing"),
                );
                None
            }
            Err(e) => {
                warn!(file = relative, error = %e, "failed to load declaration");
                self.diagnostics.add(
                    Diagnostic::error(e.to_string())
                        .in_file(relative)
                        .with_code("load"),
                );
                None
            }
        }
    }

    /// Record an extraction's warnings and hand back its items
    fn absorb<T>(&mut self, extraction: Extraction<T>) -> Vec<T> {
        for warning in extraction.warnings {
            self.diagnostics.add(warning);
        }
        extraction.items
    }
}

#[derive(Debug, Clone, Copy)]
enum ManifestGroup {
    Plugins,
    Modules,
}

fn count_methods(subgroups: &IndexMap<String, Subgroup>) -> usize {
    subgroups.values().map(|s| s.methods.len()).sum()
}

fn parent_dir(relative: &str) -> &str {
    relative.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn join_relative(base: &str, path: &str) -> String {
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}
