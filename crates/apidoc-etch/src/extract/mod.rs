//! Extractors
//!
//! Each extractor reads one parsed declaration file and returns the entries it
//! found plus any warnings about entries it had to drop. Extractors never fail:
//! a missing or unusual shape simply yields fewer entries.

pub mod class;
pub mod events;
pub mod factory;
pub mod function;
pub mod manifest;
pub mod signature;
pub mod types;

pub use class::ClassMembers;
pub use events::extract_events;
pub use factory::FactoryReturn;
pub use function::ExportedFunctions;
pub use manifest::{read_manifest, ManifestEntry};
pub use types::{extract_types, TypeRegistry};

use crate::diagnostics::Diagnostic;
use crate::model::MethodDescriptor;
use crate::utils::syntax::DeclarationFile;

/// Entries extracted from one file plus the warnings raised on the way
#[derive(Debug, Clone)]
pub struct Extraction<T> {
    pub items: Vec<T>,
    pub warnings: Vec<Diagnostic>,
}

impl<T> Default for Extraction<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl<T> Extraction<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn warn(&mut self, warning: Diagnostic) {
        self.warnings.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Carry another extraction's warnings over, dropping its items
    fn absorb_warnings<U>(&mut self, other: Extraction<U>) {
        self.warnings.extend(other.warnings);
    }
}

impl Extraction<MethodDescriptor> {
    /// Add a method unless one with the same name is already present
    ///
    /// Overloads collapse to their first declaration.
    pub fn push_unique(&mut self, method: MethodDescriptor) {
        if self.items.iter().any(|m| m.name == method.name) {
            tracing::trace!(name = %method.name, "skipping repeated declaration");
            return;
        }
        self.items.push(method);
    }
}

/// One way of pulling methods out of a declaration file
pub trait MethodStrategy {
    /// Short name used in logs
    fn label(&self) -> &'static str;

    /// Extract methods from a parsed file
    fn extract(&self, file: &DeclarationFile) -> Extraction<MethodDescriptor>;
}

/// Result of running a [`FallbackChain`]
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    /// Label of the strategy that produced the methods, if any did
    pub strategy: Option<&'static str>,
    pub extraction: Extraction<MethodDescriptor>,
}

/// Ordered list of strategies; the first non-empty result wins
pub struct FallbackChain {
    strategies: Vec<Box<dyn MethodStrategy>>,
}

impl FallbackChain {
    pub fn new(strategies: Vec<Box<dyn MethodStrategy>>) -> Self {
        Self { strategies }
    }

    /// Class members, then a factory's returned object, then exported functions
    pub fn core_classes() -> Self {
        Self::new(vec![
            Box::new(ClassMembers),
            Box::new(FactoryReturn),
            Box::new(ExportedFunctions),
        ])
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.label()).collect()
    }

    /// Try each strategy in order
    ///
    /// Warnings from strategies that came up empty are kept.
    pub fn run(&self, file: &DeclarationFile) -> ChainOutcome {
        let mut carried = Extraction::new();

        for strategy in &self.strategies {
            let mut extraction = strategy.extract(file);
            if !extraction.is_empty() {
                let mut warnings = carried.warnings;
                warnings.append(&mut extraction.warnings);
                extraction.warnings = warnings;
                return ChainOutcome {
                    strategy: Some(strategy.label()),
                    extraction,
                };
            }
            carried.absorb_warnings(extraction);
        }

        ChainOutcome {
            strategy: None,
            extraction: carried,
        }
    }
}
