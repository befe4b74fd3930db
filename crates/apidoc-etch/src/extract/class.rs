//! Public methods of class declarations

use super::signature::{declared_name, render_member};
use super::{Extraction, MethodStrategy};
use crate::model::MethodDescriptor;
use crate::utils::syntax::{find_all, named_children, DeclarationFile};

const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration", "class"];

/// Collects the public methods of every class in a file
///
/// Members whose name starts with `_` (or is a `#private` name) and
/// constructors are skipped. Function-typed properties count as methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassMembers;

impl ClassMembers {
    fn is_public_name(name: &str) -> bool {
        !(name.starts_with('_') || name.starts_with('#') || name == "constructor")
    }
}

impl MethodStrategy for ClassMembers {
    fn label(&self) -> &'static str {
        "class"
    }

    fn extract(&self, file: &DeclarationFile) -> Extraction<MethodDescriptor> {
        let mut extraction = Extraction::new();

        for class in find_all(file.root(), CLASS_KINDS) {
            let Some(body) = class.child_by_field_name("body") else {
                continue;
            };

            for member in named_children(body) {
                match declared_name(file, member) {
                    Some(name) if !Self::is_public_name(name) => continue,
                    _ => {}
                }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::syntax::parse_declaration_source;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn extract(source: &str) -> Extraction<MethodDescriptor> {
        let file = parse_declaration_source("core/editor.d.ts", source).unwrap();
        ClassMembers.extract(&file)
    }

    #[test]
    fn test_focus_method() {
        let extraction = extract("declare class Editor {\n    focus(): void;\n}\n");
        assert_eq!(
            serde_json::to_value(&extraction.items).unwrap(),
            json!([{"name": "focus", "params": "", "returns": "void", "description": "", "example": ""}])
        );
    }

    #[test]
    fn test_skips_private_and_constructor() {
        let extraction = extract(
            r#"
declare class Editor {
    constructor(options: object);
    _internal(): void;
    #secret(): void;
    visible(): void;
}
"#,
        );
        let names: Vec<_> = extraction.items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["visible"]);
    }

    #[test]
    fn test_documented_method() {
        let extraction = extract(
            r#"
export default Editor;
declare class Editor {
    /**
     * @description Sets the editor content.
     * Replaces everything.
     * @example
     * editor.setContent('<p>Hi</p>');
     */
    setContent(this: Editor, html: string, rootKey?: number): Promise<void>;
}
"#,
        );

        let method = &extraction.items[0];
        assert_eq!(method.name, "setContent");
        assert_eq!(method.params_signature(), "html: string, rootKey?: number");
        assert_eq!(method.returns, "Promise<void>");
        assert_eq!(method.description, "Sets the editor content. Replaces everything.");
        assert_eq!(method.example.as_deref(), Some("editor.setContent('<p>Hi</p>');"));
    }

    #[test]
    fn test_nested_classes_and_properties() {
        let extraction = extract(
            r#"
declare namespace Outer {
    class Inner {
        onChange: (value: string) => void;
        label: string;
    }
}
"#,
        );
        assert_eq!(extraction.len(), 1);
        assert_eq!(extraction.items[0].name, "onChange");
        assert_eq!(extraction.items[0].params_signature(), "value: string");
    }

    #[test]
    fn test_no_class() {
        assert!(extract("export function a(): void;\n").is_empty());
        assert!(extract("").is_empty());
    }
}
