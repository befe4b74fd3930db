//! Methods of objects returned by factory functions
//!
//! Some core modules are declared as a function returning an object literal
//! type rather than as a class. The members of that object type are the
//! module's methods.

use super::signature::render_member;
use super::{Extraction, MethodStrategy};
use crate::model::MethodDescriptor;
use crate::utils::syntax::{find_all, named_children, DeclarationFile};
use tree_sitter::Node;

const FUNCTION_KINDS: &[&str] = &["function_declaration", "function_signature"];

/// Collects members of every object type returned by a function in a file
///
/// No name filtering is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactoryReturn;

impl FactoryReturn {
    /// The object type a function returns, if its return type is one
    fn returned_object(function: Node<'_>) -> Option<Node<'_>> {
        let annotation = function.child_by_field_name("return_type")?;
        named_children(annotation)
            .into_iter()
            .find(|n| n.kind() == "object_type")
    }
}

impl MethodStrategy for FactoryReturn {
    fn label(&self) -> &'static str {
        "factory"
    }

    fn extract(&self, file: &DeclarationFile) -> Extraction<MethodDescriptor> {
        let mut extraction = Extraction::new();

        for function in find_all(file.root(), FUNCTION_KINDS) {
            let Some(object) = Self::returned_object(function) else {
                continue;
            };

            for member in named_children(object) {
                match render_member(file, member) {
                    Ok(Some(method)) => extraction.push_unique(method),
                    Ok(None) => {}
                    Err(warning) => extraction.warn(warning),
                }
            }
        }

        extraction
    }
}
