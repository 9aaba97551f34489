//! The documentation context shared by every documentation renderer.

use serde_json::{Map, Value};

use specdoc_spec::Document;

use crate::error::TemplateResult;

/// Serialize a document into the value that renderers and templates see.
///
/// Fields marked `doc_hide` are removed at every nesting level. Declaration
/// order is kept and absent optional attributes stay present as `null`.
pub fn document_context(document: &Document) -> TemplateResult<Value> {
    let mut value = serde_json::to_value(document)?;

    if let Some(options) = value.get_mut("options").and_then(Value::as_object_mut) {
        prune_hidden(options);
    }

    Ok(value)
}

fn prune_hidden(options: &mut Map<String, Value>) {
    options.retain(|_, field| field.get("doc_hide").and_then(Value::as_bool) != Some(true));

    for field in options.values_mut() {
        if let Some(children) = field.get_mut("suboptions").and_then(Value::as_object_mut) {
            prune_hidden(children);
        }
    }
}
