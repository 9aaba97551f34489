//! Integration tests for in-place injection.

use std::fs;

use specdoc_inject::{
    InjectError, Injector, Section, DEFAULT_DOCUMENTATION_MARKER, DEFAULT_EXAMPLES_MARKER,
    DEFAULT_RETURN_MARKER,
};
use tempfile::tempdir;

const MODULE: &str = "#!/usr/bin/python\n\
DOCUMENTATION = r\"\"\"\nmodule: old\n\"\"\"\n\
\n\
EXAMPLES = r\"\"\"\n\"\"\"\n\
\n\
RETURN = r'''\nold: 1\n'''\n\
\n\
def main():\n    pass\n";

fn sections() -> Vec<Section> {
    vec![
        Section::new(DEFAULT_DOCUMENTATION_MARKER, "module: widget\n"),
        Section::new(DEFAULT_RETURN_MARKER, "widget:\n  type: dict\n"),
        Section::new(DEFAULT_EXAMPLES_MARKER, "- name: Make one\n"),
    ]
}

#[test]
fn test_inject_file_rewrites_in_place() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("widget.py");
    fs::write(&path, MODULE).unwrap();

    assert!(Injector::inject_file(&path, &sections()).unwrap());

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("#!/usr/bin/python\nDOCUMENTATION = r\"\"\"\nmodule: widget\n\"\"\"\n"));
    assert!(content.contains("RETURN = r\"\"\"\nwidget:\n  type: dict\n\"\"\"\n"));
    assert!(content.ends_with("def main():\n    pass\n"));

    // Only the target file remains in the directory.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_second_injection_is_a_no_op() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("widget.py");
    fs::write(&path, MODULE).unwrap();

    assert!(Injector::inject_file(&path, &sections()).unwrap());
    let first = fs::read_to_string(&path).unwrap();

    assert!(!Injector::inject_file(&path, &sections()).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn test_clear_then_inject_restores() {
    let injected = Injector::inject(MODULE, &sections()).unwrap();
    let cleared = Injector::clear(
        &injected,
        &[DEFAULT_DOCUMENTATION_MARKER, DEFAULT_RETURN_MARKER, DEFAULT_EXAMPLES_MARKER],
    )
    .unwrap();

    assert!(cleared.contains("DOCUMENTATION = r\"\"\"\n\"\"\"\n"));
    assert_eq!(Injector::inject(&cleared, &sections()).unwrap(), injected);
}

#[test]
fn test_missing_marker_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.py");
    let source = "DOCUMENTATION = ''\n";
    fs::write(&path, source).unwrap();

    let err = Injector::inject_file(&path, &sections()).unwrap_err();
    assert!(matches!(err, InjectError::MissingMarker(m) if m == "RETURN"));
    assert_eq!(fs::read_to_string(&path).unwrap(), source);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = Injector::inject_file(dir.path().join("absent.py"), &sections()).unwrap_err();
    assert!(matches!(err, InjectError::Io(_)));
}

#[test]
fn test_multi_line_values_are_replaced_whole() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("widget.py");
    fs::write(
        &path,
        "DOCUMENTATION = (\n    \"module: old\\n\"\n    \"short_description: x\\n\"\n)\n\
         EXAMPLES = ''\n\
         RETURN = dict(\n    old=1,\n)\n\
         \n\
         def main():\n    pass\n",
    )
    .unwrap();

    assert!(Injector::inject_file(&path, &sections()).unwrap());

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "DOCUMENTATION = r\"\"\"\nmodule: widget\n\"\"\"\n\
         EXAMPLES = r\"\"\"\n- name: Make one\n\"\"\"\n\
         RETURN = r\"\"\"\nwidget:\n  type: dict\n\"\"\"\n\
         \n\
         def main():\n    pass\n"
    );
}

#[test]
fn test_unclosed_value_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.py");
    let source = "DOCUMENTATION = ''\nEXAMPLES = ''\nRETURN = dict(\n    old=1,\n";
    fs::write(&path, source).unwrap();

    let err = Injector::inject_file(&path, &sections()).unwrap_err();
    assert!(matches!(err, InjectError::UnboundedValue { line: 3, .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), source);
}
