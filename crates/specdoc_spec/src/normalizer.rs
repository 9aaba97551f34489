//! Turns a raw specification mapping into a [`Document`].
//!
//! The raw mapping is whatever the module's provider produced: plain JSON
//! data with the shape of a module's `SPECDOC_META`. Structural problems
//! (wrong shapes, missing keys, unknown types) fail immediately with the path
//! of the offending value. Semantic consistency is checked afterwards by
//! [`SpecValidator`], which reports every violation at once.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{SpecError, SpecResult};
use crate::models::{DeprecationInfo, Document, Field, FieldType, ReturnValue};
use crate::validator::SpecValidator;

/// Top-level keys that must be present in every specification.
pub const REQUIRED_KEYS: &[&str] = &["description", "options"];

/// Normalizer for raw specifications.
pub struct SpecNormalizer;

impl SpecNormalizer {
    /// Normalize and validate a raw specification.
    pub fn normalize(module: &str, raw: &Value) -> SpecResult<Document> {
        let document = Self::build_document(module, raw)?;

        let result = SpecValidator::validate_document(&document);
        for warning in &result.warnings {
            warn!("{}: {}", module, warning);
        }
        if !result.valid {
            return Err(SpecError::ValidationFailed(result.errors));
        }

        debug!(
            "Normalized spec for {} ({} options, {} return values)",
            module,
            document.options.len(),
            document.return_values.len()
        );
        Ok(document)
    }

    /// Build the document without running semantic validation.
    pub fn build_document(module: &str, raw: &Value) -> SpecResult<Document> {
        let root = as_object("<root>", raw)?;

        for key in REQUIRED_KEYS {
            if !root.contains_key(*key) {
                return Err(SpecError::MissingKey((*key).to_string()));
            }
        }

        let mut document = Document::new(module);

        for (key, value) in root {
            match key.as_str() {
                "module" => {}
                "description" => document.description = string_lines(key, value)?,
                "short_description" => document.short_description = optional_string(key, value)?,
                "version_added" => document.version_added = optional_string(key, value)?,
                "author" => document.author = string_lines(key, value)?,
                "requirements" => document.requirements = string_lines(key, value)?,
                "notes" => document.notes = string_lines(key, value)?,
                "examples" => document.examples = string_lines(key, value)?,
                "options" => document.options = Self::fields("options", value)?,
                "return_values" => {
                    document.return_values = Self::return_values("return_values", value)?
                }
                "deprecated" => document.deprecated = Self::deprecation(value)?,
                other => warn!("Ignoring unknown top-level key '{}' in {}", other, module),
            }
        }

        Ok(document)
    }

    fn fields(path: &str, value: &Value) -> SpecResult<IndexMap<String, Field>> {
        if value.is_null() {
            return Ok(IndexMap::new());
        }

        as_object(path, value)?
            .iter()
            .map(|(name, raw)| {
                let field_path = format!("{}.{}", path, name);
                Self::field(&field_path, raw).map(|field| (name.clone(), field))
            })
            .collect()
    }

    fn field(path: &str, value: &Value) -> SpecResult<Field> {
        let raw = as_object(path, value)?;

        let type_value = raw
            .get("type")
            .ok_or_else(|| SpecError::MissingKey(format!("{}.type", path)))?;
        let mut field = Field::new(field_type(&format!("{}.type", path), type_value)?);

        for (key, value) in raw {
            let key_path = format!("{}.{}", path, key);
            match key.as_str() {
                "type" => {}
                "description" => field.description = string_lines(&key_path, value)?,
                "required" => field.required = flag(&key_path, value)?,
                "default" => field.default = (!value.is_null()).then(|| value.clone()),
                "choices" => field.choices = optional_list(&key_path, value)?,
                "element_type" | "elements" => {
                    field.element_type = if value.is_null() {
                        None
                    } else {
                        Some(field_type(&key_path, value)?)
                    }
                }
                "aliases" => {
                    field.aliases = if value.is_null() {
                        None
                    } else {
                        Some(string_lines(&key_path, value)?)
                    }
                }
                "version_added" => field.version_added = optional_string(&key_path, value)?,
                "editable" => field.editable = flag(&key_path, value)?,
                "conflicts_with" => field.conflicts_with = string_lines(&key_path, value)?,
                "no_log" => field.no_log = flag(&key_path, value)?,
                "doc_hide" => field.doc_hide = flag(&key_path, value)?,
                "suboptions" | "options" => {
                    field.suboptions = if value.is_null() {
                        None
                    } else {
                        Some(Self::fields(&format!("{}.suboptions", path), value)?)
                    }
                }
                "additional_fields" => {
                    if !value.is_null() {
                        for (extra_key, extra) in as_object(&key_path, value)? {
                            field.additional_fields.insert(extra_key.clone(), extra.clone());
                        }
                    }
                }
                other => {
                    warn!("Passing unknown key {} through as an additional field", key_path);
                    field.additional_fields.insert(other.to_string(), value.clone());
                }
            }
        }

        Ok(field)
    }

    fn return_values(path: &str, value: &Value) -> SpecResult<IndexMap<String, ReturnValue>> {
        if value.is_null() {
            return Ok(IndexMap::new());
        }

        as_object(path, value)?
            .iter()
            .map(|(name, raw)| {
                let value_path = format!("{}.{}", path, name);
                Self::return_value(&value_path, raw).map(|rv| (name.clone(), rv))
            })
            .collect()
    }

    fn return_value(path: &str, value: &Value) -> SpecResult<ReturnValue> {
        let raw = as_object(path, value)?;

        let type_value = raw
            .get("type")
            .ok_or_else(|| SpecError::MissingKey(format!("{}.type", path)))?;
        let mut rv = ReturnValue::new(field_type(&format!("{}.type", path), type_value)?, "");
        rv.description.clear();

        for (key, value) in raw {
            let key_path = format!("{}.{}", path, key);
            match key.as_str() {
                "type" => {}
                "description" => rv.description = string_lines(&key_path, value)?,
                "returned" => {
                    rv.returned = optional_string(&key_path, value)?
                        .unwrap_or_else(|| ReturnValue::DEFAULT_RETURNED.to_string())
                }
                "version_added" => rv.version_added = optional_string(&key_path, value)?,
                "sample" => {
                    rv.sample = match value {
                        Value::Null => Vec::new(),
                        Value::Array(items) => items.clone(),
                        scalar => vec![scalar.clone()],
                    }
                }
                "contains" => {
                    rv.contains = if value.is_null() {
                        None
                    } else {
                        Some(Self::return_values(&format!("{}.contains", path), value)?)
                    }
                }
                "docs_url" => rv.docs_url = optional_string(&key_path, value)?,
                "elements" => {
                    rv.elements = if value.is_null() {
                        None
                    } else {
                        Some(field_type(&key_path, value)?)
                    }
                }
                other => warn!("Ignoring unknown key '{}' in {}", other, path),
            }
        }

        Ok(rv)
    }

    fn deprecation(value: &Value) -> SpecResult<Option<DeprecationInfo>> {
        if value.is_null() {
            return Ok(None);
        }

        let raw = as_object("deprecated", value)?;
        let alternative = raw
            .get("alternative")
            .map(|v| optional_string("deprecated.alternative", v))
            .transpose()?
            .flatten()
            .ok_or_else(|| SpecError::MissingKey("deprecated.alternative".to_string()))?;

        let get = |key: &str| -> SpecResult<Option<String>> {
            match raw.get(key) {
                Some(v) => optional_string(&format!("deprecated.{}", key), v),
                None => Ok(None),
            }
        };

        Ok(Some(DeprecationInfo {
            alternative,
            removed_in: get("removed_in")?,
            removed_by_date: get("removed_by_date")?,
            why: get("why")?,
        }))
    }
}

fn as_object<'a>(path: &str, value: &'a Value) -> SpecResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| SpecError::invalid(path, format!("expected a mapping, found {}", kind(value))))
}

fn field_type(path: &str, value: &Value) -> SpecResult<FieldType> {
    let name = value
        .as_str()
        .ok_or_else(|| SpecError::invalid(path, format!("expected a type name, found {}", kind(value))))?;

    name.parse().map_err(|_| SpecError::UnknownType {
        path: path.to_string(),
        type_name: name.to_string(),
    })
}

fn flag(path: &str, value: &Value) -> SpecResult<bool> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        other => Err(SpecError::invalid(path, format!("expected a boolean, found {}", kind(other)))),
    }
}

/// Strings and versions may be written as numbers (`version_added: 1.2`).
fn optional_string(path: &str, value: &Value) -> SpecResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(SpecError::invalid(path, format!("expected a string, found {}", kind(other)))),
    }
}

/// A single string or a list of strings.
fn string_lines(path: &str, value: &Value) -> SpecResult<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    SpecError::invalid(
                        format!("{}[{}]", path, i),
                        format!("expected a string, found {}", kind(item)),
                    )
                })
            })
            .collect(),
        other => Err(SpecError::invalid(
            path,
            format!("expected a string or list of strings, found {}", kind(other)),
        )),
    }
}

fn optional_list(path: &str, value: &Value) -> SpecResult<Option<Vec<Value>>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(items.clone())),
        other => Err(SpecError::invalid(path, format!("expected a list, found {}", kind(other)))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_minimal_spec() {
        let raw = json!({
            "description": "Does things",
            "options": {
                "name": {"type": "str", "required": true, "description": "The name"}
            }
        });

        let doc = SpecNormalizer::normalize("demo", &raw).unwrap();
        assert_eq!(doc.module, "demo");
        assert_eq!(doc.description, vec!["Does things"]);

        let name = &doc.options["name"];
        assert_eq!(name.field_type, FieldType::String);
        assert!(name.required);
        assert_eq!(name.description, vec!["The name"]);
        assert!(doc.return_values.is_empty());
    }

    #[test]
    fn test_missing_required_key() {
        let raw = json!({"description": ["x"]});
        let err = SpecNormalizer::normalize("demo", &raw).unwrap_err();
        assert!(matches!(err, SpecError::MissingKey(ref key) if key == "options"));
    }

    #[test]
    fn test_unknown_type_reports_path() {
        let raw = json!({
            "description": ["x"],
            "options": {
                "outer": {
                    "type": "dict",
                    "suboptions": {"inner": {"type": "tuple"}}
                }
            }
        });

        match SpecNormalizer::normalize("demo", &raw).unwrap_err() {
            SpecError::UnknownType { path, type_name } => {
                assert_eq!(path, "options.outer.suboptions.inner.type");
                assert_eq!(type_name, "tuple");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_field_keys_become_additional_fields() {
        let raw = json!({
            "description": ["x"],
            "options": {
                "token": {
                    "type": "str",
                    "fallback": ["env", "API_TOKEN"],
                    "additional_fields": {"apply_defaults": true}
                }
            }
        });

        let doc = SpecNormalizer::normalize("demo", &raw).unwrap();
        let extra = &doc.options["token"].additional_fields;
        assert_eq!(extra["fallback"], json!(["env", "API_TOKEN"]));
        assert_eq!(extra["apply_defaults"], json!(true));
    }

    #[test]
    fn test_synonym_keys() {
        let raw = json!({
            "description": ["x"],
            "options": {
                "rules": {
                    "type": "list",
                    "elements": "dict",
                    "options": {"port": {"type": "int"}}
                }
            }
        });

        let doc = SpecNormalizer::normalize("demo", &raw).unwrap();
        let rules = &doc.options["rules"];
        assert_eq!(rules.element_type, Some(FieldType::Dict));
        assert!(rules.suboptions.as_ref().unwrap().contains_key("port"));
    }

    #[test]
    fn test_return_value_defaults() {
        let raw = json!({
            "description": ["x"],
            "options": {},
            "return_values": {
                "id": {"type": "int", "description": "The ID", "sample": 42}
            }
        });

        let doc = SpecNormalizer::normalize("demo", &raw).unwrap();
        let id = &doc.return_values["id"];
        assert_eq!(id.returned, "always");
        assert_eq!(id.sample, vec![json!(42)]);
        assert_eq!(id.description, vec!["The ID"]);
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let raw = json!({"description": ["x"], "options": {"a": {"type": "str", "required": "yes"}}});
        let err = SpecNormalizer::normalize("demo", &raw).unwrap_err();
        assert!(err.to_string().contains("options.a.required"));

        let err = SpecNormalizer::normalize("demo", &json!(["not", "a", "mapping"])).unwrap_err();
        assert!(matches!(err, SpecError::InvalidValue { .. }));
    }

    #[test]
    fn test_deprecation_requires_alternative() {
        let raw = json!({"description": ["x"], "options": {}, "deprecated": {"why": "old"}});
        let err = SpecNormalizer::normalize("demo", &raw).unwrap_err();
        assert!(matches!(err, SpecError::MissingKey(ref key) if key == "deprecated.alternative"));
    }
}
