//! Tests for path addressing and single-node operations on a Tree.

use cfgtree::{Tree, Value};

use crate::helpers::*;

#[test]
fn test_set_then_get_returns_value() {
    let tree = Tree::new();
    let cases = [
        ("a", Value::Int(1)),
        ("a.b", Value::from("text")),
        ("x.y.z", Value::Float(0.5)),
        ("list", Value::from(vec!["p".to_string(), "q".to_string()])),
        ("flag", Value::Bool(false)),
    ];
    for (path, value) in cases {
        tree.set(path, value.clone());
        assert_eq!(tree.get(path), Some(value), "round trip failed for '{path}'");
    }
}

#[test]
fn test_set_overwrites_unconditionally() {
    let tree = Tree::new();
    tree.set("a.b", 1);
    tree.set("a.b", 2);
    assert_eq!(tree.get("a.b"), Some(Value::Int(2)));
}

#[test]
fn test_add_only_assigns_unset_value() {
    let tree = Tree::new();
    assert!(tree.add("a.b", 1));
    assert!(!tree.add("a.b", 2));
    assert_eq!(tree.get("a.b"), Some(Value::Int(1)));
}

#[test]
fn test_add_fills_intermediate_node_created_by_set() {
    let tree = Tree::new();
    tree.set("a.b", 1);
    // "a" exists as a node but holds no value yet
    assert!(tree.add("a", "parent"));
    assert_eq!(tree.string("a").as_deref(), Some("parent"));
}

#[test]
fn test_paths_are_case_insensitive() {
    let tree = Tree::new();
    tree.set("A.B", 1);
    assert_eq!(tree.get("a.b"), Some(Value::Int(1)));
    assert_eq!(tree.get("A.b"), Some(Value::Int(1)));
    assert_eq!(tree.node_num("a"), 1);
}

#[test]
fn test_surrounding_separators_are_ignored() {
    let tree = Tree::new();
    tree.set(".a.b.", 1);
    assert_eq!(tree.get("a.b"), Some(Value::Int(1)));
    assert_eq!(tree.get("..a.b"), Some(Value::Int(1)));
}

#[test]
fn test_internal_double_separator_addresses_empty_segment() {
    let tree = Tree::new();
    tree.set("a..b", 1);
    assert_eq!(tree.get("a.b"), None);
    assert_eq!(tree.get("a..b"), Some(Value::Int(1)));
    assert_branches(&tree, "a", &[""]);
}

#[test]
fn test_empty_key_addresses_the_tree_itself() {
    let tree = Tree::new();
    tree.set("", "root value");
    assert_eq!(tree.string("").as_deref(), Some("root value"));
    assert_eq!(tree.node_num(""), 0);

    let sub = tree.tree("").unwrap();
    assert!(sub.is_root());
    assert!(sub.same_tree(&tree));
}

#[test]
fn test_get_missing_path_is_none() {
    let tree = setup_config_tree();
    assert_eq!(tree.get("server.missing"), None);
    assert_eq!(tree.get("nope.deeper"), None);
    assert!(!tree.has("server.missing"));
}

#[test]
fn test_reads_never_create_nodes() {
    let tree = Tree::new();
    assert_eq!(tree.get("a.b.c"), None);
    assert!(tree.tree("a").is_none());
    assert_eq!(tree.node_num(""), 0);
}

#[test]
fn test_has_requires_a_value() {
    let tree = Tree::new();
    tree.set("a.b", 1);
    assert!(tree.has("a.b"));
    // The intermediate node exists but holds nothing
    assert!(!tree.has("a"));
    assert!(tree.tree("a").is_some());
}

#[test]
fn test_set_null_unsets_value() {
    let tree = Tree::new();
    tree.set("a", 1);
    tree.set("a", Value::Null);
    assert_eq!(tree.get("a"), None);
    assert!(!tree.has("a"));
    assert!(tree.add("a", 2));
}

#[test]
fn test_node_num_counts_immediate_children() {
    let tree = setup_config_tree();
    assert_eq!(tree.node_num("server"), 3);
    assert_eq!(tree.node_num("features"), 2);
    assert_eq!(tree.node_num("server.port"), 0);
    assert_eq!(tree.node_num("does.not.exist"), 0);
}

#[test]
fn test_subtree_handle_shares_state() {
    let tree = setup_config_tree();
    let server = tree.tree("server").unwrap();

    assert_eq!(server.int("port"), Some(8080));
    server.set("port", 9090);
    assert_eq!(tree.int("server.port"), Some(9090));

    tree.set("server.tls.enabled", true);
    assert_eq!(server.bool("tls.enabled"), Some(true));
    assert!(server.same_tree(&tree));
}

#[test]
fn test_subtree_handle_navigation() {
    let tree = setup_config_tree();
    let server = tree.tree("Server").unwrap();
    assert_eq!(server.name(), "server");
    assert_eq!(server.path(), "server");
    assert!(!server.is_root());

    let parent = server.parent().unwrap();
    assert!(parent.is_root());
    assert_eq!(parent.name(), "");
    assert!(parent.parent().is_none());
    assert_eq!(parent.node_num("server"), 3);
}

#[test]
fn test_branches_are_live_handles() {
    let tree = setup_config_tree();
    let branches = tree.branches();
    let names: Vec<&str> = branches.keys().map(String::as_str).collect();
    assert_eq!(names, ["features", "server"]);

    branches["server"].set("host", "example.com");
    assert_eq!(tree.string("server.host").as_deref(), Some("example.com"));
}

#[test]
fn test_branches_of_leaf_is_empty() {
    let tree = setup_config_tree();
    assert!(tree.tree("server.port").unwrap().branches().is_empty());
}

#[test]
fn test_clear_keeps_node_addressable() {
    let tree = Tree::new();
    tree.load_data("", Value::from(serde_json::json!({"x": {"y": 1}})), false);

    tree.clear("x");
    assert_eq!(tree.get("x.y"), None);
    assert_eq!(tree.get("x"), None);
    assert!(tree.tree("x").is_some());
    assert_eq!(tree.node_num("x"), 0);
    assert_eq!(tree.node_num(""), 1);
}

#[test]
fn test_clear_missing_path_is_noop() {
    let tree = setup_config_tree();
    tree.clear("no.such.node");
    assert!(tree.tree("no").is_none());
    assert_eq!(tree.node_num(""), 2);
}

#[test]
fn test_clear_through_subtree_handle() {
    let tree = setup_config_tree();
    let server = tree.tree("server").unwrap();
    server.clear("");
    assert_eq!(tree.node_num("server"), 0);
    assert_eq!(tree.get("server.port"), None);
}

#[test]
fn test_handle_to_cleared_descendant_sees_nothing() {
    let tree = setup_config_tree();
    let server = tree.tree("server").unwrap();
    tree.clear("");
    assert_eq!(server.get("port"), None);
    assert_eq!(server.node_num(""), 0);

    // Writing through the handle recreates its path
    server.set("port", 1);
    assert_eq!(tree.int("server.port"), Some(1));
}

#[test]
fn test_to_value_snapshots_subtree() {
    let tree = setup_config_tree();
    tree.set("server.port", 1234);
    let snapshot = tree.to_value("server").unwrap();
    assert_eq!(
        snapshot.to_json(),
        serde_json::json!({"host": "localhost", "port": 1234, "timeout": 2.5})
    );
    assert_eq!(tree.to_value("missing"), None);
}

#[test]
fn test_separate_trees_do_not_share_state() {
    let a = Tree::new();
    let b = Tree::new();
    a.set("k", 1);
    assert_eq!(b.get("k"), None);
    assert!(!a.same_tree(&b));
}
