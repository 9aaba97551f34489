//! Ansible-facing renderings: the `DOCUMENTATION`, `RETURN` and `EXAMPLES`
//! blocks of a module, and the argument spec passed to the module runtime.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use tracing::debug;

use specdoc_spec::{DeprecationInfo, Document, Field, ReturnValue};

use crate::error::{TemplateError, TemplateResult};
use crate::renderer::Renderer;

/// Rendered YAML text for each injectable section of a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnsibleDocSections {
    pub documentation: String,
    pub returns: String,
    pub examples: String,
}

impl AnsibleDocSections {
    /// Sections with empty content, used to clear injected fields.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Builds the documentation blocks that `ansible-doc` reads.
pub struct AnsibleDoc;

impl AnsibleDoc {
    pub fn render(document: &Document) -> TemplateResult<AnsibleDocSections> {
        debug!("Rendering Ansible doc sections for {}", document.module);

        Ok(AnsibleDocSections {
            documentation: serde_yaml::to_string(&Self::documentation(document))?,
            returns: serde_yaml::to_string(&Self::returns(&document.return_values))?,
            examples: Self::examples(document)?,
        })
    }

    /// The `DOCUMENTATION` mapping.
    pub fn documentation(document: &Document) -> Value {
        let mut doc = Map::new();
        doc.insert("module".into(), json!(document.module));
        doc.insert("short_description".into(), json!(document.summary()));
        doc.insert("description".into(), json!(document.description));
        doc.insert("author".into(), json!(document.author));
        doc.insert("requirements".into(), json!(document.requirements));
        doc.insert("notes".into(), json!(document.notes));

        let options: Map<String, Value> = document
            .visible_options()
            .map(|(name, field)| (name.clone(), Self::option(field)))
            .collect();
        doc.insert("options".into(), Value::Object(options));

        if let Some(version) = &document.version_added {
            doc.insert("version_added".into(), json!(version));
        }
        if let Some(deprecated) = &document.deprecated {
            doc.insert("deprecated".into(), Self::deprecation(deprecated));
        }

        Value::Object(doc)
    }

    fn option(field: &Field) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!(field.field_type.ansible_name()));
        out.insert("required".into(), json!(field.required));
        out.insert("description".into(), json!(field.description));

        if let Some(default) = &field.default {
            out.insert("default".into(), default.clone());
        }
        if let Some(choices) = &field.choices {
            out.insert("choices".into(), json!(choices));
        }
        if let Some(elements) = field.element_type {
            out.insert("elements".into(), json!(elements.ansible_name()));
        }
        if let Some(aliases) = &field.aliases {
            out.insert("aliases".into(), json!(aliases));
        }
        if let Some(version) = &field.version_added {
            out.insert("version_added".into(), json!(version));
        }
        if let Some(suboptions) = &field.suboptions {
            let nested: Map<String, Value> = suboptions
                .iter()
                .filter(|(_, child)| !child.doc_hide)
                .map(|(name, child)| (name.clone(), Self::option(child)))
                .collect();
            out.insert("suboptions".into(), Value::Object(nested));
        }

        Value::Object(out)
    }

    /// The `RETURN` mapping.
    pub fn returns(values: &IndexMap<String, ReturnValue>) -> Value {
        let map: Map<String, Value> = values
            .iter()
            .map(|(name, value)| (name.clone(), Self::return_value(value)))
            .collect();
        Value::Object(map)
    }

    fn return_value(value: &ReturnValue) -> Value {
        let mut out = Map::new();
        out.insert("description".into(), json!(value.description));
        out.insert("type".into(), json!(value.value_type.ansible_name()));
        out.insert("returned".into(), json!(value.returned));
        out.insert("sample".into(), json!(value.sample));

        if let Some(elements) = value.elements {
            out.insert("elements".into(), json!(elements.ansible_name()));
        }
        if let Some(contains) = &value.contains {
            out.insert("contains".into(), Self::returns(contains));
        }
        if let Some(version) = &value.version_added {
            out.insert("version_added".into(), json!(version));
        }

        Value::Object(out)
    }

    fn deprecation(deprecated: &DeprecationInfo) -> Value {
        let mut out = Map::new();
        out.insert("alternative".into(), json!(deprecated.alternative));
        for (key, value) in [
            ("removed_in", &deprecated.removed_in),
            ("removed_by_date", &deprecated.removed_by_date),
            ("why", &deprecated.why),
        ] {
            if let Some(value) = value {
                out.insert(key.into(), json!(value));
            }
        }
        Value::Object(out)
    }

    /// The `EXAMPLES` text: the example lines parsed as one YAML document
    /// and emitted again.
    pub fn examples(document: &Document) -> TemplateResult<String> {
        let joined = document.examples.join("\n");
        let parsed: serde_yaml::Value = serde_yaml::from_str(&joined)
            .map_err(|e| TemplateError::InvalidExamples(e.to_string()))?;

        if parsed.is_null() {
            return Ok(String::new());
        }
        Ok(serde_yaml::to_string(&parsed)?)
    }

    /// The argument spec a module hands to its runtime.
    pub fn argument_spec(fields: &IndexMap<String, Field>) -> Value {
        let map: Map<String, Value> = fields
            .iter()
            .map(|(name, field)| (name.clone(), Self::argument(field)))
            .collect();
        Value::Object(map)
    }

    fn argument(field: &Field) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!(field.field_type.ansible_name()));
        out.insert("no_log".into(), json!(field.no_log));
        out.insert("required".into(), json!(field.required));

        if let Some(default) = &field.default {
            out.insert("default".into(), default.clone());
        }
        if let Some(choices) = &field.choices {
            out.insert("choices".into(), json!(choices));
        }
        if let Some(aliases) = &field.aliases {
            out.insert("aliases".into(), json!(aliases));
        }
        if let Some(suboptions) = &field.suboptions {
            out.insert("options".into(), Self::argument_spec(suboptions));
        }
        if let Some(elements) = field.element_type {
            out.insert("elements".into(), json!(elements.ansible_name()));
        }
        for (key, value) in &field.additional_fields {
            out.insert(key.clone(), value.clone());
        }

        Value::Object(out)
    }
}

/// Renders the argument spec as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgSpecDump;

impl Renderer for ArgSpecDump {
    fn render(&self, document: &Document) -> TemplateResult<String> {
        let spec = AnsibleDoc::argument_spec(&document.options);
        let mut out = serde_json::to_string_pretty(&spec)?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specdoc_spec::FieldType;

    fn document() -> Document {
        let mut doc = Document::new("widget");
        doc.description = vec!["Manage".into(), "widgets.".into()];
        doc.author = vec!["Ada".into()];
        doc.examples = vec!["- name: Create a widget".into(), "  widget:".into(), "    size: 3".into()];

        let mut token = Field::new(FieldType::String).with_description("API token");
        token.no_log = true;
        token
            .additional_fields
            .insert("fallback".into(), json!(["env", "TOKEN"]));
        doc.options.insert("token".into(), token);
        doc.options.insert(
            "sizes".into(),
            Field::new(FieldType::List)
                .with_elements(FieldType::Integer)
                .with_default(json!([1])),
        );
        doc.options
            .insert("internal".into(), Field::new(FieldType::Boolean).hidden());

        let mut rv = ReturnValue::new(FieldType::Dict, "The widget");
        let mut contains = IndexMap::new();
        contains.insert("id".to_string(), ReturnValue::new(FieldType::Integer, "ID"));
        rv.contains = Some(contains);
        doc.return_values.insert("widget".into(), rv);

        doc.deprecated = Some(DeprecationInfo {
            alternative: "gadget".into(),
            removed_in: Some("2.0.0".into()),
            removed_by_date: None,
            why: None,
        });
        doc
    }

    #[test]
    fn test_documentation_block() {
        let doc = AnsibleDoc::documentation(&document());

        assert_eq!(doc["short_description"], "Manage widgets.");
        assert_eq!(doc["options"]["token"]["type"], "str");
        assert_eq!(doc["options"]["sizes"]["elements"], "int");
        assert_eq!(doc["options"]["sizes"]["default"], json!([1]));
        assert!(doc["options"].get("internal").is_none());
        assert!(doc["options"]["token"].get("default").is_none());
        assert_eq!(doc["deprecated"], json!({"alternative": "gadget", "removed_in": "2.0.0"}));
    }

    #[test]
    fn test_return_block() {
        let returns = AnsibleDoc::returns(&document().return_values);
        assert_eq!(returns["widget"]["type"], "dict");
        assert_eq!(returns["widget"]["returned"], "always");
        assert_eq!(returns["widget"]["contains"]["id"]["type"], "int");
    }

    #[test]
    fn test_examples_are_reemitted() {
        let examples = AnsibleDoc::examples(&document()).unwrap();
        assert_eq!(examples, "- name: Create a widget\n  widget:\n    size: 3\n");

        assert_eq!(AnsibleDoc::examples(&Document::new("empty")).unwrap(), "");

        let mut broken = Document::new("broken");
        broken.examples = vec!["key: [unclosed".into()];
        assert!(matches!(
            AnsibleDoc::examples(&broken),
            Err(TemplateError::InvalidExamples(_))
        ));
    }

    #[test]
    fn test_argument_spec() {
        let spec = AnsibleDoc::argument_spec(&document().options);

        assert_eq!(spec["token"]["no_log"], true);
        assert_eq!(spec["token"]["fallback"], json!(["env", "TOKEN"]));
        assert_eq!(spec["sizes"]["type"], "list");
        // Hidden options still reach the runtime.
        assert_eq!(spec["internal"]["type"], "bool");
    }

    #[test]
    fn test_render_sections() {
        let sections = AnsibleDoc::render(&document()).unwrap();
        assert!(sections.documentation.contains("module: widget\n"));
        assert!(sections.returns.starts_with("widget:\n"));
        assert!(AnsibleDocSections::empty().documentation.is_empty());
    }
}
