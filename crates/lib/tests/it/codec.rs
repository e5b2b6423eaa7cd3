//! Tests for loading JSON and YAML sources into a tree.

use cfgtree::{
    Tree, Value,
    codec::{self, BYTES_ORIGIN, Format},
};

use crate::helpers::*;

#[test]
fn test_load_json_bytes() {
    let tree = Tree::new();
    tree.load_json("", br#"{"a": {"b": 1, "c": [true, null]}}"#, false)
        .expect("Failed to load JSON");

    assert_eq!(tree.int("a.b"), Some(1));
    assert_eq!(tree.bool("a.c.0"), Some(true));
    assert!(!tree.has("a.c.1"));
}

#[test]
fn test_load_yaml_bytes_under_key() {
    let tree = Tree::new();
    let yaml = b"listen:\n  port: 8080\n  ratio: 0.75\nname: svc\n";
    tree.load_yaml("service", yaml, false)
        .expect("Failed to load YAML");

    assert_eq!(tree.int("service.listen.port"), Some(8080));
    assert_eq!(tree.float("service.listen.ratio"), Some(0.75));
    assert_eq!(tree.string("service.name").as_deref(), Some("svc"));
}

#[test]
fn test_yaml_non_string_keys_are_stringified() {
    let tree = Tree::new();
    tree.load_yaml("", b"codes:\n  404: missing\n  true: yes\n", false)
        .expect("Failed to load YAML");

    assert_eq!(tree.string("codes.404").as_deref(), Some("missing"));
    assert_branches(&tree, "codes", &["404", "true"]);
}

#[test]
fn test_json_then_yaml_keeps_first_values() {
    let tree = Tree::new();
    tree.load_json("", br#"{"port": 1}"#, false).unwrap();
    tree.load_yaml("", b"port: 2\nhost: h\n", false).unwrap();

    assert_eq!(tree.int("port"), Some(1));
    assert_eq!(tree.string("host").as_deref(), Some("h"));

    tree.load_yaml("", b"port: 3\n", true).unwrap();
    assert_eq!(tree.int("port"), Some(3));
}

#[test]
fn test_invalid_json_leaves_tree_untouched() {
    let tree = setup_config_tree();
    let err = tree
        .load_json("server", br#"{"port": 1,"#, true)
        .unwrap_err();

    assert!(err.is_decode_error());
    assert!(!err.is_io_error());
    assert_eq!(err.module(), "codec");
    assert_eq!(tree.int("server.port"), Some(8080));
    assert_eq!(tree.node_num("server"), 3);
}

#[test]
fn test_invalid_yaml_reports_bytes_origin() {
    let err = codec::decode_yaml(b"a: [1, 2\n").unwrap_err();
    assert!(err.is_decode_error());
    assert_eq!(err.origin(), BYTES_ORIGIN);
}

#[test]
fn test_load_json_file_with_comment_lines() {
    let file = write_temp(
        "// service defaults\n{\n    # the public port\n    \"port\": 8080,\n  // \"debug\": true,\n    \"url\": \"http://example.com\"\n}\n",
        ".json",
    );
    let tree = Tree::new();
    tree.load_json_file("", file.path(), false)
        .expect("Failed to load JSON file");

    assert_eq!(tree.int("port"), Some(8080));
    assert_eq!(tree.string("url").as_deref(), Some("http://example.com"));
    assert!(!tree.has("debug"));
}

#[test]
fn test_load_yaml_file() {
    let file = write_temp("db:\n  hosts: [a, b]\n", ".yaml");
    let tree = Tree::new();
    tree.load_yaml_file("", file.path(), false)
        .expect("Failed to load YAML file");

    assert_eq!(tree.node_num("db.hosts"), 2);
    assert_eq!(tree.string("db.hosts.1").as_deref(), Some("b"));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let tree = Tree::new();
    let err = tree.load_json_file("", &path, false).unwrap_err();

    assert!(err.is_not_found());
    assert!(err.is_io_error());
    assert!(!err.is_decode_error());
    assert_eq!(tree.node_num(""), 0);
}

#[test]
fn test_invalid_file_reports_its_path() {
    let file = write_temp("{ nope", ".json");
    let err = codec::decode_json_file(file.path()).unwrap_err();
    assert_eq!(err.origin(), file.path().display().to_string());
}

#[test]
fn test_decode_file_picks_format_by_extension() {
    let yaml = write_temp("a: 1\n", ".YML");
    let json = write_temp("{\"a\": 2}", ".conf");

    assert_eq!(Format::from_path(yaml.path()), Format::Yaml);
    assert_eq!(Format::from_path(json.path()), Format::Json);

    let from_yaml = codec::decode_file(yaml.path()).unwrap();
    let from_json = codec::decode_file(json.path()).unwrap();
    assert_eq!(from_yaml.to_json(), serde_json::json!({"a": 1}));
    assert_eq!(from_json.to_json(), serde_json::json!({"a": 2}));
}

#[test]
fn test_decoded_arrays_are_generic_lists() {
    let value = codec::decode_json(br#"["a", "b"]"#).unwrap();
    assert_eq!(value, Value::List(vec![Value::from("a"), Value::from("b")]));
}

#[test]
fn test_yaml_merge_keys_are_expanded() {
    let tree = Tree::new();
    let yaml = b"base: &base\n  host: h\n  port: 1\nprod:\n  <<: *base\n  port: 2\n";
    tree.load_yaml("", yaml, false).expect("Failed to load YAML");

    assert_branches(&tree, "prod", &["host", "port"]);
    assert_eq!(tree.string("prod.host").as_deref(), Some("h"));
    assert_eq!(tree.int("prod.port"), Some(2));
    assert_eq!(tree.int("base.port"), Some(1));
}

#[test]
fn test_yaml_merge_of_scalar_is_decode_error() {
    let err = codec::decode_yaml(b"a:\n  <<: 1\n").unwrap_err();
    assert!(err.is_decode_error());
}
