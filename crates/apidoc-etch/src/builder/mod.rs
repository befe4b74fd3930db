//! Builder API for apidoc-etch
//!
//! This module provides the main entry point for generating the API
//! documentation document, from the CLI or from a build script.

mod apidoc_builder;

pub use apidoc_builder::{ApiDocBuilder, BuildOutput};
