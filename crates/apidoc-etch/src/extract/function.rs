//! Exported top-level functions

use super::signature::render_function;
use super::{Extraction, MethodStrategy};
use crate::diagnostics::Diagnostic;
use crate::model::MethodDescriptor;
use crate::utils::syntax::{find_all, is_exported, DeclarationFile};

const FUNCTION_KINDS: &[&str] = &["function_declaration", "function_signature"];

/// Collects every function declared with `export`
///
/// Used for helper modules and as the last fallback for core modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportedFunctions;

impl MethodStrategy for ExportedFunctions {
    fn label(&self) -> &'static str {
        "exported"
    }

    fn extract(&self, file: &DeclarationFile) -> Extraction<MethodDescriptor> {
        let mut extraction = Extraction::new();

        for function in find_all(file.root(), FUNCTION_KINDS) {
            if !is_exported(function) {
                continue;
            }

            match render_function(file, function) {
                Some(method) => extraction.push_unique(method),
                None => {
                    let (line, col) = file.line_col(function);
                    extraction.warn(
                        Diagnostic::warning("exported function has no readable name, skipped")
                            .in_file(file.path())
                            .at(line, col)
                            .with_code("function"),
                    );
                }
            }
        }

        extraction
    }
}
