//! Utility modules for apidoc-etch

pub mod syntax;

pub use syntax::{declaration_stem, parse_declaration_source, DeclarationFile};
