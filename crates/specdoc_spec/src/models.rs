//! Data models for module specifications.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type of a specification field or return value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldType {
    #[serde(rename = "string", alias = "str")]
    String,
    #[serde(rename = "integer", alias = "int")]
    Integer,
    #[serde(rename = "boolean", alias = "bool")]
    Boolean,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "list")]
    List,
    #[serde(rename = "dict")]
    Dict,
    #[serde(rename = "path")]
    Path,
    #[serde(rename = "raw")]
    Raw,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "jsonarg")]
    JsonArg,
    #[serde(rename = "bytes")]
    Bytes,
    #[serde(rename = "bits")]
    Bits,
}

impl FieldType {
    pub const ALL: [FieldType; 12] = [
        Self::String,
        Self::Integer,
        Self::Boolean,
        Self::Float,
        Self::List,
        Self::Dict,
        Self::Path,
        Self::Raw,
        Self::Json,
        Self::JsonArg,
        Self::Bytes,
        Self::Bits,
    ];

    /// Name used in the documentation model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::List => "list",
            Self::Dict => "dict",
            Self::Path => "path",
            Self::Raw => "raw",
            Self::Json => "json",
            Self::JsonArg => "jsonarg",
            Self::Bytes => "bytes",
            Self::Bits => "bits",
        }
    }

    /// Name understood by Ansible's argument spec and `ansible-doc`.
    pub fn ansible_name(&self) -> &'static str {
        match self {
            Self::String => "str",
            Self::Integer => "int",
            Self::Boolean => "bool",
            other => other.as_str(),
        }
    }

    /// Whether values of this type can carry nested fields.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::List | Self::Dict)
    }

    /// Check that a literal value (default, choice) fits this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String | Self::Path => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Dict => value.is_object(),
            Self::Raw | Self::Json | Self::JsonArg => true,
            Self::Bytes | Self::Bits => value.is_string() || value.is_i64() || value.is_u64(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == name || t.ansible_name() == name)
            .ok_or_else(|| {
                format!(
                    "expected one of: {}",
                    Self::ALL.map(|t| t.as_str()).join(", ")
                )
            })
    }
}

/// A single option accepted by a module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub description: Vec<String>,
    pub required: bool,
    pub default: Option<Value>,
    pub choices: Option<Vec<Value>>,
    pub element_type: Option<FieldType>,
    pub aliases: Option<Vec<String>>,
    pub version_added: Option<String>,
    pub editable: bool,
    pub conflicts_with: Vec<String>,
    pub no_log: bool,
    pub doc_hide: bool,
    pub suboptions: Option<IndexMap<String, Field>>,
    pub additional_fields: IndexMap<String, Value>,
}

impl Field {
    /// Create a field of the given type with every other attribute unset.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            description: Vec::new(),
            required: false,
            default: None,
            choices: None,
            element_type: None,
            aliases: None,
            version_added: None,
            editable: false,
            conflicts_with: Vec::new(),
            no_log: false,
            doc_hide: false,
            suboptions: None,
            additional_fields: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, line: impl Into<String>) -> Self {
        self.description.push(line.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_choices(mut self, choices: Vec<Value>) -> Self {
        self.choices = Some(choices);
        self
    }

    pub fn with_elements(mut self, element_type: FieldType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    pub fn with_suboption(mut self, name: impl Into<String>, field: Field) -> Self {
        self.suboptions
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), field);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.doc_hide = true;
        self
    }

    /// The type each choice must have. List choices apply per element, so a
    /// typed list yields its element type and an untyped list yields `None`.
    pub fn choice_type(&self) -> Option<FieldType> {
        match (self.field_type, self.element_type) {
            (FieldType::List, element) => element,
            (field_type, _) => Some(field_type),
        }
    }

    /// Whether a single choice value fits this field.
    pub fn accepts_choice(&self, value: &Value) -> bool {
        match self.choice_type() {
            Some(choice_type) => choice_type.accepts(value),
            None => !value.is_array() && !value.is_object(),
        }
    }

    /// Whether this field may declare suboptions.
    pub fn allows_suboptions(&self) -> bool {
        match self.field_type {
            FieldType::Dict => true,
            FieldType::List => matches!(self.element_type, None | Some(FieldType::Dict)),
            _ => false,
        }
    }
}

/// A value returned by a module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnValue {
    pub description: Vec<String>,
    #[serde(rename = "type")]
    pub value_type: FieldType,
    pub returned: String,
    pub version_added: Option<String>,
    pub sample: Vec<Value>,
    pub contains: Option<IndexMap<String, ReturnValue>>,
    pub docs_url: Option<String>,
    pub elements: Option<FieldType>,
}

impl ReturnValue {
    pub const DEFAULT_RETURNED: &'static str = "always";

    pub fn new(value_type: FieldType, description: impl Into<String>) -> Self {
        Self {
            description: vec![description.into()],
            value_type,
            returned: Self::DEFAULT_RETURNED.to_string(),
            version_added: None,
            sample: Vec::new(),
            contains: None,
            docs_url: None,
            elements: None,
        }
    }
}

/// Deprecation notice for a whole module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeprecationInfo {
    pub alternative: String,
    pub removed_in: Option<String>,
    pub removed_by_date: Option<String>,
    pub why: Option<String>,
}

/// The normalized documentation model of one module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub module: String,
    pub description: Vec<String>,
    pub short_description: Option<String>,
    pub version_added: Option<String>,
    pub author: Vec<String>,
    pub requirements: Vec<String>,
    pub notes: Vec<String>,
    pub examples: Vec<String>,
    pub options: IndexMap<String, Field>,
    pub return_values: IndexMap<String, ReturnValue>,
    pub deprecated: Option<DeprecationInfo>,
}

impl Document {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            description: Vec::new(),
            short_description: None,
            version_added: None,
            author: Vec::new(),
            requirements: Vec::new(),
            notes: Vec::new(),
            examples: Vec::new(),
            options: IndexMap::new(),
            return_values: IndexMap::new(),
            deprecated: None,
        }
    }

    /// The explicit short description, or the description lines joined.
    pub fn summary(&self) -> String {
        self.short_description
            .clone()
            .unwrap_or_else(|| self.description.join(" "))
    }

    /// Options that appear in generated documentation.
    pub fn visible_options(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.options.iter().filter(|(_, field)| !field.doc_hide)
    }
}
