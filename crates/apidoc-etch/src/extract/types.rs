//! Type aliases and interfaces

use super::Extraction;
use crate::diagnostics::Diagnostic;
use crate::model::{TypeDescriptor, TypeKind};
use crate::utils::syntax::{find_all, named_children, DeclarationFile};
use indexmap::IndexMap;
use tree_sitter::Node;

const TYPE_KINDS: &[&str] = &["type_alias_declaration", "interface_declaration"];

/// Extract every type alias and interface declared in a file
///
/// Aliases keep their right-hand side verbatim. Interfaces list their
/// members one per line.
pub fn extract_types(file: &DeclarationFile) -> Extraction<TypeDescriptor> {
    let mut extraction = Extraction::new();

    for node in find_all(file.root(), TYPE_KINDS) {
        let name = node
            .child_by_field_name("name")
            .and_then(|n| file.text_for(n));
        let Some(name) = name else {
            let (line, col) = file.line_col(node);
            extraction.warn(
                Diagnostic::warning("type declaration has no readable name, skipped")
                    .in_file(file.path())
                    .at(line, col)
                    .with_code("type"),
            );
            continue;
        };

        let (definition, kind) = if node.kind() == "interface_declaration" {
            (interface_members(file, node), TypeKind::Interface)
        } else {
            let value = node
                .child_by_field_name("value")
                .and_then(|v| file.text_for(v))
                .unwrap_or_default();
            (value.trim().to_string(), TypeKind::TypeAlias)
        };

        extraction.push(TypeDescriptor {
            name: name.to_string(),
            definition,
            kind,
            source: file.path().to_string(),
        });
    }

    extraction
}

fn interface_members(file: &DeclarationFile, node: Node<'_>) -> String {
    let Some(body) = node.child_by_field_name("body") else {
        return String::new();
    };

    named_children(body)
        .into_iter()
        .filter(|member| member.kind() != "comment")
        .filter_map(|member| file.text_for(member))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Types collected across files, keyed by name
///
/// The first file to declare a name keeps it; later declarations with the
/// same name are ignored.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    items: IndexMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a type unless its name is already taken
    ///
    /// Returns whether the type was added.
    pub fn insert(&mut self, item: TypeDescriptor) -> bool {
        if self.items.contains_key(&item.name) {
            tracing::trace!(
                name = %item.name,
                source = %item.source,
                "type already registered"
            );
            return false;
        }
        self.items.insert(item.name.clone(), item);
        true
    }

    /// Fold a batch of types into the registry
    pub fn merge(mut self, items: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        for item in items {
            self.insert(item);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.items.get(name)
    }

    /// Types in registration order
    pub fn into_items(self) -> Vec<TypeDescriptor> {
        self.items.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::syntax::parse_declaration_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_types() {
        let source = r#"
export type EditorFrame = {
    key: string;
};
/** Frame options */
export interface FrameOptions {
    // height in px
    height?: string;
    resize(value: boolean): void;
}
declare type Mode = 'classic' | 'inline';
"#;
        let file = parse_declaration_source("typedef/frame.d.ts", source).unwrap();
        let extraction = extract_types(&file);

        assert_eq!(
            extraction.items,
            vec![
                TypeDescriptor {
                    name: "EditorFrame".to_string(),
                    definition: "{\n    key: string;\n}".to_string(),
                    kind: TypeKind::TypeAlias,
                    source: "typedef/frame.d.ts".to_string(),
                },
                TypeDescriptor {
                    name: "FrameOptions".to_string(),
                    definition: "height?: string\nresize(value: boolean): void".to_string(),
                    kind: TypeKind::Interface,
                    source: "typedef/frame.d.ts".to_string(),
                },
                TypeDescriptor {
                    name: "Mode".to_string(),
                    definition: "'classic' | 'inline'".to_string(),
                    kind: TypeKind::TypeAlias,
                    source: "typedef/frame.d.ts".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_registry_first_wins() {
        let make = |source: &str| TypeDescriptor {
            name: "Options".to_string(),
            definition: "{}".to_string(),
            kind: TypeKind::TypeAlias,
            source: source.to_string(),
        };

        let registry = TypeRegistry::new()
            .merge(vec![make("typedef/a.d.ts")])
            .merge(vec![make("core/config/options.d.ts")]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Options").unwrap().source, "typedef/a.d.ts");
    }
}
