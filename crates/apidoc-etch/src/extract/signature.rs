//! Signature rendering shared by the method extractors

use crate::diagnostics::Diagnostic;
use crate::js_doc::doc_for;
use crate::model::{MethodDescriptor, ParamDescriptor};
use crate::utils::syntax::{named_children, DeclarationFile};
use tree_sitter::Node;

/// Return type used when none is declared
pub const VOID: &str = "void";
/// Type used when a type is missing or cannot be rendered
pub const ANY: &str = "any";

/// Types mentioning this are rendered as `void`
const OMIT_MARKER: &str = "Omit<";

/// Member kinds that are always callable
const METHOD_KINDS: &[&str] = &[
    "method_signature",
    "method_definition",
    "abstract_method_signature",
];

/// Member kinds that are callable only when their type is a function type
const PROPERTY_KINDS: &[&str] = &["public_field_definition", "property_signature"];

/// Normalize the source text of a type (or `: type` annotation)
pub fn normalize_type_text(text: &str) -> String {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed).trim();

    if trimmed.contains(OMIT_MARKER) {
        VOID.to_string()
    } else if trimmed.is_empty() {
        ANY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Render a type or type annotation node
pub fn render_type(file: &DeclarationFile, node: Node<'_>) -> String {
    match file.text_for(node) {
        Some(text) => normalize_type_text(text),
        None => ANY.to_string(),
    }
}

/// Render a declared return type, `void` when absent
pub fn render_return(file: &DeclarationFile, node: Option<Node<'_>>) -> String {
    node.map(|n| render_type(file, n))
        .unwrap_or_else(|| VOID.to_string())
}

/// Render a `formal_parameters` node
///
/// `this` parameters only type the receiver and are dropped.
pub fn render_params(file: &DeclarationFile, params: Option<Node<'_>>) -> Vec<ParamDescriptor> {
    let Some(params) = params else {
        return Vec::new();
    };

    named_children(params)
        .into_iter()
        .filter(|p| matches!(p.kind(), "required_parameter" | "optional_parameter"))
        .filter_map(|p| {
            let name = p
                .child_by_field_name("pattern")
                .and_then(|pattern| file.text_for(pattern))
                .unwrap_or("unknown")
                .trim();
            if name == "this" {
                return None;
            }

            let ts_type = p
                .child_by_field_name("type")
                .map(|t| render_type(file, t))
                .unwrap_or_else(|| ANY.to_string());

            Some(ParamDescriptor::new(
                name,
                ts_type,
                p.kind() == "optional_parameter",
            ))
        })
        .collect()
}

/// Name of a member or declaration, if it has a readable one
pub fn declared_name<'f>(file: &'f DeclarationFile, node: Node<'_>) -> Option<&'f str> {
    node.child_by_field_name("name")
        .and_then(|n| file.text_for(n))
}

/// Parameters and return type of a callable member
struct CallShape<'t> {
    params: Option<Node<'t>>,
    returns: Option<Node<'t>>,
}

fn call_shape(member: Node<'_>) -> Option<CallShape<'_>> {
    let kind = member.kind();

    if METHOD_KINDS.contains(&kind) {
        if is_accessor(member) {
            return None;
        }
        return Some(CallShape {
            params: member.child_by_field_name("parameters"),
            returns: member.child_by_field_name("return_type"),
        });
    }

    if PROPERTY_KINDS.contains(&kind) {
        let annotation = member.child_by_field_name("type")?;
        let function = named_children(annotation)
            .into_iter()
            .find(|n| n.kind() == "function_type")?;
        return Some(CallShape {
            params: function.child_by_field_name("parameters"),
            returns: function.child_by_field_name("return_type"),
        });
    }

    None
}

/// `get x()` / `set x(v)` accessors are properties, not methods
fn is_accessor(member: Node<'_>) -> bool {
    let mut cursor = member.walk();
    let found = member
        .children(&mut cursor)
        .any(|c| !c.is_named() && matches!(c.kind(), "get" | "set"));
    found
}

/// Render a class or object-type member as a method
///
/// `Ok(None)` means the member is not callable (a plain property, an index
/// signature, a comment). An unreadable name is reported as a warning.
pub fn render_member(
    file: &DeclarationFile,
    member: Node<'_>,
) -> Result<Option<MethodDescriptor>, Diagnostic> {
    let Some(shape) = call_shape(member) else {
        return Ok(None);
    };

    let Some(name) = declared_name(file, member) else {
        let (line, col) = file.line_col(member);
        return Err(Diagnostic::warning("member has no readable name, skipped")
            .in_file(file.path())
            .at(line, col)
            .with_code("member"));
    };

    Ok(Some(describe(file, member, name, shape.params, shape.returns)))
}

/// Render a function declaration or signature
pub fn render_function(file: &DeclarationFile, function: Node<'_>) -> Option<MethodDescriptor> {
    let name = declared_name(file, function)?;
    Some(describe(
        file,
        function,
        name,
        function.child_by_field_name("parameters"),
        function.child_by_field_name("return_type"),
    ))
}

fn describe(
    file: &DeclarationFile,
    node: Node<'_>,
    name: &str,
    params: Option<Node<'_>>,
    returns: Option<Node<'_>>,
) -> MethodDescriptor {
    let doc = doc_for(file, node);
    MethodDescriptor {
        name: name.to_string(),
        params: render_params(file, params),
        returns: render_return(file, returns),
        description: doc.description,
        example: Some(doc.example),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::syntax::{find_all, parse_declaration_source};

    #[test]
    fn test_normalize_type_text() {
        assert_eq!(normalize_type_text(": string | null"), "string | null");
        assert_eq!(normalize_type_text("Omit<Options, 'x'>"), "void");
        assert_eq!(normalize_type_text("Promise<Omit<A, 'b'>>"), "void");
        assert_eq!(normalize_type_text(":  "), "any");
    }

    #[test]
    fn test_render_params() {
        let source = "declare function f(this: Editor, a: string, b?: number, c, ...rest: any[]): Omit<X, 'y'>;";
        let file = parse_declaration_source("f.d.ts", source).unwrap();
        let func = find_all(file.root(), &["function_signature"])[0];
        let method = render_function(&file, func).unwrap();

        assert_eq!(method.name, "f");
        assert_eq!(
            method.params_signature(),
            "a: string, b?: number, c: any, ...rest: any[]"
        );
        assert_eq!(method.returns, "void");
    }

    #[test]
    fn test_render_member_shapes() {
        let source = r#"
declare class Shapes {
    plain: string;
    handler: (event: Event) => boolean;
    get size(): number;
    get(key: string): any;
    run(): void;
    [key: string]: any;
}
"#;
        let file = parse_declaration_source("shapes.d.ts", source).unwrap();
        let body = find_all(file.root(), &["class_body"])[0];
        let rendered: Vec<_> = named_children(body)
            .into_iter()
            .filter_map(|m| render_member(&file, m).unwrap())
            .map(|m| format!("{}({}): {}", m.name, m.params_signature(), m.returns))
            .collect();

        assert_eq!(rendered, vec![
                "handler(event: Event): boolean",
                "get(key: string): any",
                "run(): void"
            ]);
    }
}
