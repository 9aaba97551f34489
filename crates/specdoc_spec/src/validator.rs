//! Semantic validation of normalized documents.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::models::{DeprecationInfo, Document, Field, FieldType, ReturnValue};

/// Validation result with details.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Validator for normalized documents.
pub struct SpecValidator;

impl SpecValidator {
    /// Validate an entire document.
    pub fn validate_document(document: &Document) -> ValidationResult {
        let mut result = ValidationResult::new();

        if document.description.iter().all(|line| line.trim().is_empty()) {
            result.add_warning("Module description is empty");
        }

        result.merge(Self::validate_fields("options", &document.options));
        result.merge(Self::validate_return_values(
            "return_values",
            &document.return_values,
        ));

        if let Some(deprecation) = &document.deprecated {
            result.merge(Self::validate_deprecation(deprecation));
        }

        result
    }

    /// Validate a set of sibling fields, recursing into suboptions.
    pub fn validate_fields(path: &str, fields: &IndexMap<String, Field>) -> ValidationResult {
        let mut result = ValidationResult::new();

        // Names and aliases share one namespace.
        let mut seen: HashSet<&str> = fields.keys().map(String::as_str).collect();
        for (name, field) in fields {
            for alias in field.aliases.iter().flatten() {
                if !seen.insert(alias.as_str()) {
                    result.add_error(format!(
                        "{}.{}: alias '{}' collides with another option name or alias",
                        path, name, alias
                    ));
                }
            }
        }

        for (name, field) in fields {
            let field_path = format!("{}.{}", path, name);
            result.merge(Self::validate_field(&field_path, field));

            for other in &field.conflicts_with {
                if !fields.contains_key(other) {
                    result.add_warning(format!(
                        "{}: conflicts_with names unknown option '{}'",
                        field_path, other
                    ));
                }
            }
        }

        result
    }

    /// Validate one field's type, default and choices.
    pub fn validate_field(path: &str, field: &Field) -> ValidationResult {
        let mut result = ValidationResult::new();

        if field.element_type.is_some() && field.field_type != FieldType::List {
            result.add_error(format!(
                "{}: element_type is only allowed on list fields, not {}",
                path, field.field_type
            ));
        }

        if field.required && field.default.is_some() {
            result.add_error(format!("{}: a required field cannot declare a default", path));
        }

        if let Some(choices) = &field.choices {
            if choices.is_empty() {
                result.add_error(format!("{}: choices must not be empty", path));
            }
            let expected = field
                .choice_type()
                .map_or_else(|| "scalar".to_string(), |t| t.to_string());
            for choice in choices {
                if !field.accepts_choice(choice) {
                    result.add_error(format!(
                        "{}: choice {} is not a valid {}",
                        path, choice, expected
                    ));
                }
            }
        }

        if let Some(default) = &field.default {
            result.merge(Self::validate_default(path, field, default));
        }

        if let Some(suboptions) = &field.suboptions {
            if field.allows_suboptions() {
                result.merge(Self::validate_fields(&format!("{}.suboptions", path), suboptions));
            } else {
                result.add_error(format!(
                    "{}: suboptions require a dict or a list of dicts, not {}",
                    path, field.field_type
                ));
            }
        }

        result
    }

    fn validate_default(path: &str, field: &Field, default: &serde_json::Value) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !field.field_type.accepts(default) {
            result.add_error(format!(
                "{}: default {} is not a valid {}",
                path, default, field.field_type
            ));
            return result;
        }

        // A list default is checked element by element.
        let values: Vec<&serde_json::Value> = match (field.field_type, default.as_array()) {
            (FieldType::List, Some(items)) => items.iter().collect(),
            _ => vec![default],
        };

        if field.field_type == FieldType::List {
            if let Some(element_type) = field.element_type {
                for value in &values {
                    if !element_type.accepts(value) {
                        result.add_error(format!(
                            "{}: default element {} is not a valid {}",
                            path, value, element_type
                        ));
                    }
                }
            }
        }

        if let Some(choices) = &field.choices {
            for value in values {
                if !choices.contains(value) {
                    result.add_error(format!(
                        "{}: default {} is not one of the declared choices",
                        path, value
                    ));
                }
            }
        }

        result
    }

    /// Validate return values, recursing into `contains`.
    pub fn validate_return_values(
        path: &str,
        values: &IndexMap<String, ReturnValue>,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (name, value) in values {
            let value_path = format!("{}.{}", path, name);

            if value.description.is_empty() {
                result.add_warning(format!("{}: return value has no description", value_path));
            }

            if value.elements.is_some() && value.value_type != FieldType::List {
                result.add_error(format!(
                    "{}: elements is only allowed on list return values, not {}",
                    value_path, value.value_type
                ));
            }

            if let Some(contains) = &value.contains {
                if value.value_type.is_structured() {
                    result.merge(Self::validate_return_values(
                        &format!("{}.contains", value_path),
                        contains,
                    ));
                } else {
                    result.add_error(format!(
                        "{}: contains requires a dict or list return value, not {}",
                        value_path, value.value_type
                    ));
                }
            }
        }

        result
    }

    /// Validate a deprecation notice.
    pub fn validate_deprecation(deprecation: &DeprecationInfo) -> ValidationResult {
        let mut result = ValidationResult::new();

        if deprecation.alternative.trim().is_empty() {
            result.add_error("deprecated.alternative cannot be empty");
        }

        if deprecation.removed_in.is_some() && deprecation.removed_by_date.is_some() {
            result.add_error("deprecated: removed_in and removed_by_date are mutually exclusive");
        }

        result
    }
}
