//! Integration tests for the spec normalizer.

use serde_json::{json, Value};

use specdoc_spec::{Document, FieldType, SpecError, SpecNormalizer};

fn sample_spec() -> Value {
    json!({
        "description": ["My really cool Ansible module!"],
        "requirements": ["python >= 3.8"],
        "author": ["Lena Garber"],
        "examples": ["- name: create\n  demo:\n    my-string: hello"],
        "deprecated": {
            "alternative": "use something else",
            "removed_in": "1.0.0",
            "why": "cuz"
        },
        "return_values": {
            "cool": {
                "description": "COOL",
                "docs_url": "http://localhost",
                "type": "list",
                "elements": "str",
                "sample": ["[\"COOL\"]"]
            }
        },
        "options": {
            "my-string": {
                "type": "str",
                "required": true,
                "description": ["A really cool string that does stuff!"]
            },
            "my-list": {
                "type": "list",
                "element_type": "str",
                "description": ["A really cool list of strings"]
            },
            "my-dict": {
                "type": "dict",
                "description": ["A really cool dict"],
                "suboptions": {
                    "my-int": {
                        "type": "int",
                        "required": true,
                        "editable": true,
                        "conflicts_with": ["my-bool"],
                        "description": ["A really cool required int"]
                    },
                    "my-bool": {
                        "type": "bool",
                        "conflicts_with": ["my-int"],
                        "description": [
                            "A really cool bool that does stuff",
                            "Here's another line :)"
                        ]
                    },
                    "my-hidden-var": {
                        "type": "bool",
                        "description": ["dont show this!!!"],
                        "doc_hide": true
                    }
                }
            }
        }
    })
}

/// Normalizing, serializing and normalizing again yields the same document.
#[test]
fn test_json_round_trip() {
    let original = SpecNormalizer::normalize("module_1", &sample_spec()).unwrap();

    let serialized = serde_json::to_string(&original).unwrap();
    let reparsed: Value = serde_json::from_str(&serialized).unwrap();
    let again = SpecNormalizer::normalize("module_1", &reparsed).unwrap();

    assert_eq!(original, again);
}

#[test]
fn test_yaml_round_trip() {
    let original = SpecNormalizer::normalize("module_1", &sample_spec()).unwrap();

    let yaml = serde_yaml::to_string(&original).unwrap();
    let reparsed: Value = serde_yaml::from_str(&yaml).unwrap();
    let again = SpecNormalizer::normalize("module_1", &reparsed).unwrap();

    assert_eq!(original, again);
}

/// The model also deserializes directly from its own serialization.
#[test]
fn test_serde_round_trip() {
    let original = SpecNormalizer::normalize("module_1", &sample_spec()).unwrap();
    let value = serde_json::to_value(&original).unwrap();
    let decoded: Document = serde_json::from_value(value).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_declared_order_is_preserved() {
    let doc = SpecNormalizer::normalize("module_1", &sample_spec()).unwrap();

    let names: Vec<_> = doc.options.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["my-string", "my-list", "my-dict"]);

    let nested: Vec<_> = doc.options["my-dict"]
        .suboptions
        .as_ref()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(nested, vec!["my-int", "my-bool", "my-hidden-var"]);
}

#[test]
fn test_sample_spec_contents() {
    let doc = SpecNormalizer::normalize("module_1", &sample_spec()).unwrap();

    assert_eq!(doc.module, "module_1");
    assert_eq!(doc.options["my-list"].element_type, Some(FieldType::String));

    let cool = &doc.return_values["cool"];
    assert_eq!(cool.value_type, FieldType::List);
    assert_eq!(cool.elements, Some(FieldType::String));
    assert_eq!(cool.returned, "always");

    let deprecated = doc.deprecated.as_ref().unwrap();
    assert_eq!(deprecated.removed_in.as_deref(), Some("1.0.0"));

    let visible: Vec<_> = doc.visible_options().map(|(name, _)| name.as_str()).collect();
    assert_eq!(visible.len(), 3);
}

#[test]
fn test_all_violations_reported_together() {
    let mut spec = sample_spec();
    spec["options"]["my-string"]["default"] = json!(5);
    spec["options"]["my-list"]["choices"] = json!([]);
    spec["deprecated"]["removed_by_date"] = json!("2030-01-01");

    match SpecNormalizer::normalize("module_1", &spec).unwrap_err() {
        SpecError::ValidationFailed(errors) => {
            // required+default, default type, empty choices, exclusive removal
            assert_eq!(errors.len(), 4, "{errors:#?}");
            assert!(errors.iter().any(|e| e.contains("options.my-string")));
            assert!(errors.iter().any(|e| e.contains("mutually exclusive")));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_deep_nesting() {
    let mut leaf = json!({"type": "str", "description": "leaf"});
    for depth in 0..32 {
        leaf = json!({
            "type": "dict",
            "description": format!("level {depth}"),
            "suboptions": {"child": leaf}
        });
    }
    let spec = json!({"description": "deep", "options": {"root": leaf}});

    let doc = SpecNormalizer::normalize("deep", &spec).unwrap();
    let mut field = &doc.options["root"];
    let mut depth = 0;
    while let Some(children) = &field.suboptions {
        field = &children["child"];
        depth += 1;
    }
    assert_eq!(depth, 32);
    assert_eq!(field.field_type, FieldType::String);
}

#[test]
fn test_untyped_list_with_choices_and_default() {
    let raw = json!({
        "description": "Tagging",
        "options": {
            "tags": {"type": "list", "choices": ["a", "b"], "default": ["a"]}
        }
    });

    let doc = SpecNormalizer::normalize("tagger", &raw).unwrap();
    assert_eq!(doc.options["tags"].default, Some(json!(["a"])));
    assert_eq!(doc.options["tags"].choices, Some(vec![json!("a"), json!("b")]));
}
