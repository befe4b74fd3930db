//! apidoc-etch: API reference generator for the SunEditor docs site
//!
//! This crate builds the site's API reference document by:
//! - Parsing the editor's published TypeScript declarations (`.d.ts`) with
//!   tree-sitter
//! - Extracting public methods from classes, factory functions and exported
//!   functions, with their JSDoc descriptions and examples
//! - Following the plugin and module index files to discover their members
//! - Collecting type aliases and interfaces, first declaration wins
//! - Writing one JSON document the docs pages read as static data
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐
//! │ types/**/*.d.ts  │    │ index.d.ts       │
//! │ (tree-sitter)    │    │ (manifests)      │
//! └────────┬─────────┘    └────────┬─────────┘
//!          │                       │
//!          └──────────┬────────────┘
//!                     ▼
//!              ┌──────────────┐
//!              │  Extractors  │  class → factory → exported
//!              └──────┬───────┘
//!                     ▼
//!              ┌──────────────┐
//!              │  Assembler   │
//!              └──────┬───────┘
//!                     ▼
//!              ┌──────────────┐
//!              │ api-docs.json│
//!              └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use apidoc_etch::ApiDocBuilder;
//!
//! ApiDocBuilder::new("node_modules/suneditor/types")
//!     .output("src/data/api/api-docs.json")
//!     .build()
//!     .expect("Failed to generate API docs");
//! ```

// Core types
pub mod js_doc;
pub mod model;

// Parsing and utilities
pub mod diagnostics;
pub mod loader;
pub mod printer;
pub mod test;
pub mod utils;

// Pipeline
pub mod assembler;
pub mod builder;
pub mod config;
pub mod extract;
pub mod writer;

// Re-exports for convenience
pub use assembler::{title_case, Assembler, Assembly, AssemblyStats};
pub use config::{EtchConfig, LayoutConfig};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, DiagnosticsCollector, EtchError, EtchResult};
pub use extract::{Extraction, FallbackChain, MethodStrategy};
pub use js_doc::CommentDoc;
pub use loader::DeclarationLoader;
pub use model::{
    CategoryGroup, DocumentationTree, EditorGroup, EventGroup, MethodDescriptor, ParamDescriptor,
    Structure, Subgroup, TypeDescriptor, TypeGroup, TypeKind,
};
pub use utils::syntax::{parse_declaration_source, DeclarationFile};
pub use writer::{resolve_version, write_document};

// Terminal output
pub use printer::ReportPrinter;

// Builder API
pub use builder::{ApiDocBuilder, BuildOutput};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
