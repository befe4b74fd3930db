//! JSDoc comment handling
//!
//! Declarations carry at most a description and an example. Both come from
//! the block comment directly above the declaration.

use crate::utils::syntax::{outermost_statement, DeclarationFile};
use lazy_static::lazy_static;
use regex::Regex;
use tree_sitter::Node;

lazy_static! {
    /// `@description` text: the rest of its line plus continuation lines
    /// that do not start a new tag
    static ref DESCRIPTION_TAG: Regex =
        Regex::new(r"@description\s+([^\n]+(?:\n\s*\*\s*[^@\n]+)*)").unwrap();
    static ref EXAMPLE_TAG: Regex = Regex::new(r"@example\s+").unwrap();
    /// A tag opening a comment line
    static ref NEXT_TAG: Regex = Regex::new(r"(?m)^[ \t]*\*?[ \t]*@\w").unwrap();
}

/// Description and example pulled out of a JSDoc block comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDoc {
    pub description: String,
    pub example: String,
}

impl CommentDoc {
    /// Parse the raw text of a block comment, delimiters included
    ///
    /// With an `@description` tag, the description is the tag's text. Without
    /// one it is every line that does not start a tag. Lines are joined with
    /// single spaces.
    ///
    /// The example is everything after `@example` up to the next tag, one
    /// cleaned line per line.
    pub fn parse(raw: &str) -> Self {
        Self {
            description: parse_description(raw),
            example: parse_example(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.example.is_empty()
    }
}

fn parse_description(raw: &str) -> String {
    if let Some(caps) = DESCRIPTION_TAG.captures(raw) {
        return caps[1]
            .lines()
            .map(clean_line)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }

    raw.lines()
        .map(clean_line)
        .filter(|line| !line.is_empty() && !line.starts_with('@'))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_example(raw: &str) -> String {
    let Some(tag) = EXAMPLE_TAG.find(raw) else {
        return String::new();
    };

    let rest = &raw[tag.end()..];
    let body = match NEXT_TAG.find(rest) {
        Some(next) => &rest[..next.start()],
        None => rest,
    };

    body.lines()
        .map(clean_line)
        .filter(|line| !line.is_empty() && *line != "/")
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Strip comment delimiters and the leading asterisk from one comment line
fn clean_line(line: &str) -> &str {
    let mut content = line.trim();
    if let Some(rest) = content.strip_prefix("/**") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix("/*") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("*/") {
        content = rest;
    }
    if let Some(rest) = content.trim_start().strip_prefix('*') {
        content = rest;
    }
    content.trim()
}

/// The block comment attached to a declaration, if any
///
/// Looks through `export`/`declare` wrappers, then at the run of comments
/// immediately preceding the declaration. The closest `/* ... */` comment
/// wins; line comments are skipped over.
pub fn leading_block_comment<'f>(file: &'f DeclarationFile, node: Node<'_>) -> Option<&'f str> {
    let anchor = outermost_statement(node);
    let mut current = anchor.prev_sibling();

    while let Some(sibling) = current {
        if sibling.kind() != "comment" {
            break;
        }
        let text = file.text_for(sibling)?;
        if text.starts_with("/*") {
            return Some(text);
        }
        current = sibling.prev_sibling();
    }

    None
}

/// Parsed documentation for a declaration; empty when it has none
pub fn doc_for(file: &DeclarationFile, node: Node<'_>) -> CommentDoc {
    leading_block_comment(file, node)
        .map(CommentDoc::parse)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::syntax::{find_all, parse_declaration_source};

    #[test]
    fn test_description_tag_round_trip() {
        let doc = CommentDoc::parse(
            "/**\n * @description A.\n * B.\n * @example\n * line1\n * line2\n */",
        );
        assert_eq!(doc.description, "A. B.");
        assert_eq!(doc.example, "line1\nline2");
    }

    #[test]
    fn test_description_without_tag() {
        let doc = CommentDoc::parse("/**\n * Sets focus.\n * Really.\n * @param x ignored\n */");
        assert_eq!(doc.description, "Sets focus. Really.");
        assert_eq!(doc.example, "");
    }

    #[test]
    fn test_single_line_comment() {
        let doc = CommentDoc::parse("/** @description Focus the editor. */");
        assert_eq!(doc.description, "Focus the editor.");
    }

    #[test]
    fn test_example_stops_at_next_tag() {
        let doc = CommentDoc::parse(
            "/**\n * @example\n * editor.focus();\n *   editor.blur();\n * @returns nothing\n */",
        );
        assert_eq!(doc.example, "editor.focus();\neditor.blur();");
    }

    #[test]
    fn test_empty_comment() {
        let doc = CommentDoc::parse("/** */");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_leading_block_comment() {
        let source = r#"
/** Not this one */
declare function first(): void;
/**
 * @description Exported.
 */
// trailing note
export function second(): void;
declare function third(): void;
"#;
        let file = parse_declaration_source("x.d.ts", source).unwrap();
        let funcs = find_all(file.root(), &["function_signature"]);

        let first = doc_for(&file, funcs[0]);
        assert_eq!(first.description, "Not this one");

        let second = doc_for(&file, funcs[1]);
        assert_eq!(second.description, "Exported.");

        assert!(leading_block_comment(&file, funcs[2]).is_none());
    }

    #[test]
    fn test_member_comment() {
        let source = r#"
declare class Editor {
    /**
     * @description Focus.
     * @example editor.focus();
     */
    focus(): void;
    blur(): void;
}
"#;
        let file = parse_declaration_source("core/editor.d.ts", source).unwrap();
        let members = find_all(file.root(), &["method_signature"]);

        let focus = doc_for(&file, members[0]);
        assert_eq!(focus.description, "Focus.");
        assert_eq!(focus.example, "editor.focus();");
        assert!(doc_for(&file, members[1]).is_empty());
    }
}
