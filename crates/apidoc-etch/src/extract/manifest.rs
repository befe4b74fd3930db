//! Index manifests
//!
//! `plugins/index.d.ts` and `modules/index.d.ts` list their members as
//! default imports from relative paths:
//!
//! ```ts
//! import blockquote from './command/blockquote';
//! ```

use crate::utils::syntax::{child_of_kind, named_children, DeclarationFile};

/// One `import name from './path'` line of an index file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// The imported identifier
    pub name: String,
    /// The import path with its leading `./` removed
    pub path: String,
}

impl ManifestEntry {
    /// First path segment, used as the plugin category
    pub fn category(&self) -> &str {
        self.path.split('/').next().unwrap_or(&self.path)
    }
}

/// Read the default imports of an index file, in source order
///
/// Only imports from `./` paths count. Named and namespace imports, and
/// imports from packages, are ignored.
pub fn read_manifest(file: &DeclarationFile) -> Vec<ManifestEntry> {
    named_children(file.root())
        .into_iter()
        .filter(|n| n.kind() == "import_statement")
        .filter_map(|import| {
            let source = import
                .child_by_field_name("source")
                .and_then(|s| file.text_for(s))?;
            let path = unquote(source).strip_prefix("./")?;
            if path.is_empty() {
                return None;
            }

            let clause = child_of_kind(import, "import_clause")?;
            let name = child_of_kind(clause, "identifier").and_then(|n| file.text_for(n))?;

            Some(ManifestEntry {
                name: name.to_string(),
                path: path.to_string(),
            })
        })
        .collect()
}

fn unquote(literal: &str) -> &str {
    literal.trim_matches(|c| c == '\'' || c == '"' || c == '`')
}
