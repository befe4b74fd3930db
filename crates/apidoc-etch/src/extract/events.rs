//! Event callbacks
//!
//! Events are declared as variables inside a namespace. Only their names are
//! used; the signature is the same generic one for every event.

use super::Extraction;
use crate::model::{MethodDescriptor, ParamDescriptor};
use crate::utils::syntax::{find_all, named_children, DeclarationFile};
use tree_sitter::Node;

const NAMESPACE_KINDS: &[&str] = &["internal_module", "module"];
const VARIABLE_KINDS: &[&str] = &["lexical_declaration", "variable_declaration"];

/// Extract one event per variable declared inside any namespace in a file
pub fn extract_events(file: &DeclarationFile) -> Extraction<MethodDescriptor> {
    let mut extraction = Extraction::new();

    for namespace in find_all(file.root(), NAMESPACE_KINDS) {
        let Some(body) = namespace.child_by_field_name("body") else {
            continue;
        };

        for statement in named_children(body) {
            for name in declared_variables(file, statement) {
                extraction.push_unique(event(name));
            }
        }
    }

    extraction
}

/// Names declared by a variable statement, looking through `export`
fn declared_variables<'f>(file: &'f DeclarationFile, statement: Node<'_>) -> Vec<&'f str> {
    let statement = if statement.kind() == "export_statement" {
        match statement.child_by_field_name("declaration") {
            Some(declaration) => declaration,
            None => return Vec::new(),
        }
    } else {
        statement
    };

    if !VARIABLE_KINDS.contains(&statement.kind()) {
        return Vec::new();
    }

    named_children(statement)
        .into_iter()
        .filter(|n| n.kind() == "variable_declarator")
        .filter_map(|declarator| declarator.child_by_field_name("name"))
        .filter(|name| name.kind() == "identifier")
        .filter_map(|name| file.text_for(name))
        .collect()
}

fn event(name: &str) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        params: vec![ParamDescriptor::new("...args", "any[]", false)],
        returns: "any".to_string(),
        description: format!("Event triggered {}", humanize_event_name(name)),
        example: None,
    }
}

/// Turn an event name into words: drop a leading `on`, split before capitals,
/// lowercase
///
/// `onChangeContent` becomes `change content`.
pub fn humanize_event_name(name: &str) -> String {
    let stripped = name.strip_prefix("on").unwrap_or(name);

    let mut words = String::with_capacity(stripped.len() + 4);
    for ch in stripped.chars() {
        if ch.is_ascii_uppercase() {
            words.push(' ');
        }
        words.extend(ch.to_lowercase());
    }

    words.trim().to_string()
}
