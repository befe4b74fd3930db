//! tree-sitter TypeScript parsing utilities
//!
//! This module provides utilities for parsing declaration files with the
//! tree-sitter TypeScript grammar. It handles:
//! - Parsing `.d.ts` source text into a syntax tree
//! - Source text extraction for nodes
//! - Location tracking for diagnostics
//! - Small traversal helpers shared by the extractors

use crate::diagnostics::{EtchError, EtchResult};
use tree_sitter::{Node, Parser, Tree};

/// Node kinds that wrap a declaration without changing its meaning
/// (`export ...`, `declare ...`).
const WRAPPER_KINDS: &[&str] = &["export_statement", "ambient_declaration"];

/// A parsed declaration file: the syntax tree plus the text it was parsed from
///
/// Identified by its path relative to the types root. Each file owns its own
/// tree; no extractor holds nodes of one file while looking at another.
pub struct DeclarationFile {
    path: String,
    text: String,
    tree: Tree,
}

impl std::fmt::Debug for DeclarationFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclarationFile")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .finish()
    }
}

impl DeclarationFile {
    /// Path relative to the types root (e.g. `core/editor.d.ts`)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The full source text
    pub fn source_text(&self) -> &str {
        &self.text
    }

    /// Root node of the syntax tree
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Whether the parser had to recover from syntax errors
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Source text covered by a node
    ///
    /// Returns `None` when the node's byte range does not fall on character
    /// boundaries of the source text.
    pub fn text_for(&self, node: Node<'_>) -> Option<&str> {
        self.text.get(node.start_byte()..node.end_byte())
    }

    /// 1-indexed line and 0-indexed column of a node
    pub fn line_col(&self, node: Node<'_>) -> (usize, usize) {
        let pos = node.start_position();
        (pos.row + 1, pos.column)
    }
}

/// Parse declaration source text
///
/// `path` is only used for provenance and error messages.
pub fn parse_declaration_source(
    path: impl Into<String>,
    text: impl Into<String>,
) -> EtchResult<DeclarationFile> {
    let path = path.into();
    let text = text.into();

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .map_err(|e| EtchError::parse(&path, format!("failed to load grammar: {}", e)))?;

    let tree = parser
        .parse(&text, None)
        .ok_or_else(|| EtchError::parse(&path, "parser produced no tree"))?;

    Ok(DeclarationFile { path, text, tree })
}

/// Named children of a node, in source order
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// First named child with the given kind
pub fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    named_children(node).into_iter().find(|c| c.kind() == kind)
}

/// Every node below `root` (inclusive) whose kind is one of `kinds`, in
/// pre-order. Matching nodes are still descended into.
pub fn find_all<'t>(root: Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    collect(root, kinds, &mut found);
    found
}

fn collect<'t>(node: Node<'t>, kinds: &[&str], found: &mut Vec<Node<'t>>) {
    if kinds.contains(&node.kind()) {
        found.push(node);
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect(child, kinds, found);
    }
}

/// Whether a node kind is an `export`/`declare` wrapper
pub fn is_wrapper(kind: &str) -> bool {
    WRAPPER_KINDS.contains(&kind)
}

/// Climb out of `export`/`declare` wrappers to the outermost statement node
pub fn outermost_statement(node: Node<'_>) -> Node<'_> {
    let mut anchor = node;
    while let Some(parent) = anchor.parent() {
        if !is_wrapper(parent.kind()) {
            break;
        }
        anchor = parent;
    }
    anchor
}

/// Whether a declaration sits (possibly under `declare`) inside an `export`
pub fn is_exported(node: Node<'_>) -> bool {
    let mut current = node;
    while let Some(parent) = current.parent() {
        match parent.kind() {
            "export_statement" => return true,
            "ambient_declaration" => current = parent,
            _ => return false,
        }
    }
    false
}

/// File name of a declaration path without the `.d.ts` suffix
pub fn declaration_stem(relative: &str) -> &str {
    let name = relative.rsplit('/').next().unwrap_or(relative);
    name.strip_suffix(".d.ts").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declaration_source() {
        let source = r#"
/**
 * Focus the editor
 */
export declare class Editor {
    focus(): void;
}
"#;

        let parsed = parse_declaration_source("core/editor.d.ts", source).unwrap();
        assert_eq!(parsed.path(), "core/editor.d.ts");
        assert!(!parsed.has_syntax_errors());
        assert_eq!(find_all(parsed.root(), &["class_declaration"]).len(), 1);
    }

    #[test]
    fn test_text_and_location() {
        let source = "declare function focus(): void;\n";
        let parsed = parse_declaration_source("focus.d.ts", source).unwrap();
        let func = find_all(parsed.root(), &["function_signature"])[0];
        let name = func.child_by_field_name("name").unwrap();

        assert_eq!(parsed.text_for(name), Some("focus"));
        assert_eq!(parsed.line_col(name), (1, 17));
    }

    #[test]
    fn test_is_exported() {
        let source = r#"
export declare function shown(): void;
export function alsoShown(): void;
declare function hidden(): void;
"#;
        let parsed = parse_declaration_source("helper/x.d.ts", source).unwrap();
        let exported: Vec<_> = find_all(parsed.root(), &["function_signature"])
            .into_iter()
            .filter(|f| is_exported(*f))
            .map(|f| parsed.text_for(f.child_by_field_name("name").unwrap()).unwrap())
            .collect();

        assert_eq!(exported, vec!["shown", "alsoShown"]);
    }

    #[test]
    fn test_declaration_stem() {
        assert_eq!(declaration_stem("core/class/selection.d.ts"), "selection");
        assert_eq!(declaration_stem("events.d.ts"), "events");
        assert_eq!(declaration_stem("plain"), "plain");
    }
}
