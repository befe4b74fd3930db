//! Documentation model
//!
//! These types serialize to the JSON document consumed by the docs site.
//! Field names and nesting are part of that contract.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A single rendered parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    /// Parameter name as written (rest parameters keep their `...`)
    pub name: String,
    /// Rendered type text
    pub ts_type: String,
    /// Declared with `?`
    pub optional: bool,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, ts_type: impl Into<String>, optional: bool) -> Self {
        Self {
            name: name.into(),
            ts_type: ts_type.into(),
            optional,
        }
    }

    /// `name: type` or `name?: type`
    pub fn render(&self) -> String {
        let marker = if self.optional { "?" } else { "" };
        format!("{}{}: {}", self.name, marker, self.ts_type)
    }
}

/// A documented method, function or event callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(serialize_with = "serialize_params")]
    pub params: Vec<ParamDescriptor>,
    pub returns: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl MethodDescriptor {
    /// Parameters joined as they appear in the document: `a: string, b?: number`
    pub fn params_signature(&self) -> String {
        self.params
            .iter()
            .map(ParamDescriptor::render)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[allow(clippy::ptr_arg)]
fn serialize_params<S: Serializer>(
    params: &Vec<ParamDescriptor>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let joined = params
        .iter()
        .map(ParamDescriptor::render)
        .collect::<Vec<_>>()
        .join(", ");
    serializer.serialize_str(&joined)
}

/// Which declaration form a type entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    #[serde(rename = "type")]
    TypeAlias,
    #[serde(rename = "interface")]
    Interface,
}

/// A named type alias or interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub name: String,
    /// Alias right-hand side, or interface members one per line
    pub definition: String,
    pub kind: TypeKind,
    /// Declaring file, relative to the types root
    pub source: String,
}

/// A titled list of methods inside a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subgroup {
    pub title: String,
    /// Plugin category (the first path segment of its manifest entry)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub methods: Vec<MethodDescriptor>,
}

impl Subgroup {
    /// A subgroup with a description
    pub fn described(
        title: impl Into<String>,
        description: impl Into<String>,
        methods: Vec<MethodDescriptor>,
    ) -> Self {
        Self {
            title: title.into(),
            category: None,
            description: Some(description.into()),
            methods,
        }
    }

    /// A plugin subgroup tagged with its category
    pub fn categorized(
        title: impl Into<String>,
        category: impl Into<String>,
        methods: Vec<MethodDescriptor>,
    ) -> Self {
        Self {
            title: title.into(),
            category: Some(category.into()),
            description: None,
            methods,
        }
    }
}

/// The editor group: top-level methods plus one subgroup per core class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorGroup {
    pub title: String,
    pub description: String,
    pub methods: Vec<MethodDescriptor>,
    pub subgroups: IndexMap<String, Subgroup>,
}

/// A group made only of keyed subgroups (plugins, modules, helpers)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub title: String,
    pub description: String,
    pub subgroups: IndexMap<String, Subgroup>,
}

impl CategoryGroup {
    fn titled(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            subgroups: IndexMap::new(),
        }
    }
}

/// The event callbacks group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventGroup {
    pub title: String,
    pub description: String,
    pub methods: Vec<MethodDescriptor>,
}

/// The type definitions group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeGroup {
    pub title: String,
    pub description: String,
    pub items: Vec<TypeDescriptor>,
}

/// All six groups, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Structure {
    pub editor: EditorGroup,
    pub plugins: CategoryGroup,
    pub modules: CategoryGroup,
    pub helpers: CategoryGroup,
    pub events: EventGroup,
    pub types: TypeGroup,
}

impl Default for Structure {
    fn default() -> Self {
        Self {
            editor: EditorGroup {
                title: "Editor Instance".to_string(),
                description: "Main editor methods (editor.method())".to_string(),
                methods: Vec::new(),
                subgroups: IndexMap::new(),
            },
            plugins: CategoryGroup::titled("Plugins", "Feature plugins"),
            modules: CategoryGroup::titled("Modules", "Reusable UI components"),
            helpers: CategoryGroup::titled("Helper Utilities", "Pure utility functions"),
            events: EventGroup {
                title: "Event Callbacks".to_string(),
                description: "Event handlers (options.events)".to_string(),
                methods: Vec::new(),
            },
            types: TypeGroup {
                title: "Type Definitions".to_string(),
                description: "TypeScript type and interface definitions".to_string(),
                items: Vec::new(),
            },
        }
    }
}

impl Structure {
    /// Editor methods, editor subgroup methods and events
    ///
    /// Plugins, modules and helpers are not counted.
    pub fn total_methods(&self) -> usize {
        let subgroup_methods: usize = self
            .editor
            .subgroups
            .values()
            .map(|s| s.methods.len())
            .sum();
        self.editor.methods.len() + subgroup_methods + self.events.methods.len()
    }
}

/// The complete document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentationTree {
    pub version: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
    pub structure: Structure,
}

impl DocumentationTree {
    /// Stamp a structure with a version and the current UTC time
    pub fn new(version: impl Into<String>, structure: Structure) -> Self {
        Self::with_timestamp(version, current_timestamp(), structure)
    }

    /// Build with an explicit timestamp
    pub fn with_timestamp(
        version: impl Into<String>,
        generated_at: impl Into<String>,
        structure: Structure,
    ) -> Self {
        Self {
            version: version.into(),
            generated_at: generated_at.into(),
            structure,
        }
    }
}

/// ISO-8601 UTC timestamp with millisecond precision
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn focus() -> MethodDescriptor {
        MethodDescriptor {
            name: "focus".to_string(),
            params: Vec::new(),
            returns: "void".to_string(),
            description: String::new(),
            example: Some(String::new()),
        }
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(
            serde_json::to_value(focus()).unwrap(),
            json!({"name": "focus", "params": "", "returns": "void", "description": "", "example": ""})
        );

        let event = MethodDescriptor {
            name: "onload".to_string(),
            params: vec![ParamDescriptor::new("...args", "any[]", false)],
            returns: "any".to_string(),
            description: "Event triggered load".to_string(),
            example: None,
        };
        assert_eq!(
            serde_json::to_value(event).unwrap(),
            json!({"name": "onload", "params": "...args: any[]", "returns": "any", "description": "Event triggered load"})
        );
    }

    #[test]
    fn test_params_signature() {
        let method = MethodDescriptor {
            params: vec![
                ParamDescriptor::new("a", "string", false),
                ParamDescriptor::new("b", "number", true),
            ],
            ..focus()
        };
        assert_eq!(method.params_signature(), "a: string, b?: number");
    }

    #[test]
    fn test_subgroup_shapes() {
        let plugin = Subgroup::categorized("Bold", "command", vec![focus()]);
        let value = serde_json::to_value(plugin).unwrap();
        assert_eq!(value["type"], "command");
        assert!(value.get("description").is_none());

        let helper = Subgroup::described("Converter", "Converter utility functions", vec![]);
        let value = serde_json::to_value(helper).unwrap();
        assert!(value.get("type").is_none());
        assert_eq!(value["description"], "Converter utility functions");
    }

    #[test]
    fn test_type_kind_serialization() {
        let item = TypeDescriptor {
            name: "EditorFrame".to_string(),
            definition: "{ key: string }".to_string(),
            kind: TypeKind::TypeAlias,
            source: "typedef/frame.d.ts".to_string(),
        };
        assert_eq!(serde_json::to_value(item).unwrap()["kind"], "type");
        assert_eq!(serde_json::to_value(TypeKind::Interface).unwrap(), "interface");
    }

    #[test]
    fn test_document_shape() {
        let tree = DocumentationTree::with_timestamp("3.0.0", "2026-01-01T00:00:00.000Z", Structure::default());
        let value = serde_json::to_value(&tree).unwrap();

        assert_eq!(value["generatedAt"], "2026-01-01T00:00:00.000Z");
        let keys: Vec<_> = value["structure"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["editor", "plugins", "modules", "helpers", "events", "types"]);
        assert!(value["structure"]["plugins"].get("methods").is_none());
        assert_eq!(value["structure"]["types"]["items"], json!([]));
    }

    #[test]
    fn test_total_methods() {
        let mut structure = Structure::default();
        structure.editor.methods.push(focus());
        structure
            .editor
            .subgroups
            .insert("selection".to_string(), Subgroup::described("editor.selection", "selection class methods", vec![focus(), focus()]));
        structure
            .plugins
            .subgroups
            .insert("bold".to_string(), Subgroup::categorized("Bold", "command", vec![focus()]));
        structure.events.methods.push(focus());

        assert_eq!(structure.total_methods(), 4);
    }

    #[test]
    fn test_current_timestamp_format() {
        let stamp = current_timestamp();
        assert!(stamp.ends_with('Z'));
        assert_eq!(stamp.len(), "2026-01-01T00:00:00.000Z".len());
    }
}
