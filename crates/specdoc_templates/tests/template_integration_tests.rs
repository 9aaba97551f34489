//! Integration tests for the renderers.

use std::fs;
use std::path::Path;

use serde_json::json;
use specdoc_spec::SpecNormalizer;
use specdoc_templates::{
    AnsibleDoc, ArgSpecDump, Renderer, StructuredDump, TemplateError,
    TemplatedRender,
};
use tempfile::tempdir;

fn module_document() -> specdoc_spec::Document {
    let raw = json!({
        "description": ["Manage widgets", "in bulk."],
        "author": ["Ada Lovelace"],
        "options": {
            "name": {"type": "str", "required": true, "description": "Widget name"},
            "count": {"type": "int", "default": 1, "description": ["How many"]},
            "debug": {"type": "bool", "doc_hide": true, "description": "Internal"}
        },
        "return_values": {
            "widget": {"type": "dict", "description": "The widget", "sample": [{"id": 1}]}
        },
        "examples": ["- name: Make one", "  widget:", "    name: foo"]
    });
    SpecNormalizer::normalize("widget", &raw).unwrap()
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

#[test]
fn test_template_file_render() {
    let tmpl = TemplatedRender::from_file(fixture("module_doc.hbs")).unwrap();
    let out = tmpl.render(&module_document()).unwrap();

    assert!(out.starts_with("# widget\n"));
    assert!(out.contains("Manage widgets in bulk."));
    assert!(out.contains("- `name` (string, required): Widget name"));
    assert!(out.contains("- `count` (integer): How many"));
    assert!(out.contains("- `widget` (dict, always)"));
    assert!(!out.contains("debug"));
}

#[test]
fn test_missing_template_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.hbs");

    let err = TemplatedRender::from_file(&path).err().unwrap();
    assert!(matches!(err, TemplateError::NotFound(p) if p == path));
}

#[test]
fn test_template_written_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("names.hbs");
    fs::write(&path, "{{#each options}}{{@key}} {{/each}}").unwrap();

    let out = TemplatedRender::from_file(&path)
        .unwrap()
        .render(&module_document())
        .unwrap();
    assert_eq!(out, "name count ");
}

#[test]
fn test_structured_dumps_agree() {
    let doc = module_document();
    let yaml: serde_json::Value =
        serde_yaml::from_str(&StructuredDump::Yaml.render(&doc).unwrap()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&StructuredDump::Json.render(&doc).unwrap()).unwrap();

    assert_eq!(yaml, json);
    assert!(json["options"].get("debug").is_none());
    assert!(json["options"]["count"]["choices"].is_null());
}

#[test]
fn test_ansible_sections() {
    let sections = AnsibleDoc::render(&module_document()).unwrap();

    let documentation: serde_json::Value = serde_yaml::from_str(&sections.documentation).unwrap();
    assert_eq!(documentation["short_description"], "Manage widgets in bulk.");
    assert_eq!(documentation["options"]["count"]["type"], "int");
    assert_eq!(documentation["options"]["count"]["default"], 1);

    let returns: serde_json::Value = serde_yaml::from_str(&sections.returns).unwrap();
    assert_eq!(returns["widget"]["sample"], json!([{"id": 1}]));

    assert_eq!(sections.examples, "- name: Make one\n  widget:\n    name: foo\n");
}

#[test]
fn test_argspec_includes_hidden_options() {
    let out = ArgSpecDump.render(&module_document()).unwrap();
    let spec: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(spec["name"], json!({"type": "str", "no_log": false, "required": true}));
    assert_eq!(spec["debug"]["type"], "bool");
}
