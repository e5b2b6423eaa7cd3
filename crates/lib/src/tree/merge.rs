//! Merging decoded values into the node graph.
//!
//! A load walks the value and the nodes in lockstep. Composite values (`Map`,
//! `List`) are expanded into child nodes named by map key or decimal list
//! index; existing children are reused, so a load is always a union over the
//! child maps and never replaces a subtree wholesale. After the structural
//! merge every visited node applies the replace-or-keep policy to its own
//! value: it takes the incoming value when `replace` is set or when it had no
//! value yet.
//!
//! Every composite node stores its own copy of the value it was loaded from,
//! and each child stores a copy of its entry. A document of `n` nodes nested
//! `d` levels deep therefore costs `O(n * d)` memory, and [`Tree::get`] on a
//! composite node clones the whole stored document. [`Tree::to_value`] rebuilds
//! from the current nodes instead and reflects later writes.
//!
//! Map keys become child names verbatim. Keys with uppercase characters are
//! therefore not reachable through the lowercasing dot-path API, only through
//! [`Tree::branches`] handles.

use std::path::Path;

use super::{Node, Tree};
use crate::{Result, Value, codec};

impl Node {
    /// Recursively merges `value` into this node.
    pub(crate) fn merge(&mut self, value: Value, replace: bool) {
        if replace || self.value.is_none() {
            // The composite is kept on this node too, so children get copies.
            match &value {
                Value::Map(entries) => {
                    for (key, entry) in entries {
                        self.child_or_insert(key).merge(entry.clone(), replace);
                    }
                }
                Value::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        self.child_or_insert(&index.to_string()).merge(item.clone(), replace);
                    }
                }
                _ => {}
            }
            self.assign(value);
        } else {
            match value {
                Value::Map(entries) => {
                    for (key, entry) in entries {
                        self.child_or_insert(&key).merge(entry, replace);
                    }
                }
                Value::List(items) => {
                    for (index, item) in items.into_iter().enumerate() {
                        self.child_or_insert(&index.to_string()).merge(item, replace);
                    }
                }
                _ => {}
            }
        }
    }
}

impl Tree {
    /// Merges an already decoded value into the node at `key`.
    ///
    /// The path is created if missing. The exclusive lock is held for the full
    /// recursive merge, so readers never observe a partially applied load.
    pub fn load_data(&self, key: &str, value: impl Into<Value>, replace: bool) {
        let value = value.into();
        tracing::debug!(
            path = %self.resolve(key),
            kind = value.type_name(),
            replace,
            "Loading data"
        );
        self.prepare(key, |node| node.merge(value, replace));
    }

    /// Decodes JSON bytes and merges them at `key`.
    ///
    /// On a decode error the tree is left untouched.
    pub fn load_json(&self, key: &str, bytes: &[u8], replace: bool) -> Result<()> {
        let value = codec::decode_json(bytes)?;
        self.load_data(key, value, replace);
        Ok(())
    }

    /// Decodes YAML bytes and merges them at `key`.
    ///
    /// On a decode error the tree is left untouched.
    pub fn load_yaml(&self, key: &str, bytes: &[u8], replace: bool) -> Result<()> {
        let value = codec::decode_yaml(bytes)?;
        self.load_data(key, value, replace);
        Ok(())
    }

    /// Reads a JSON file (whole-line `//` and `#` comments allowed) and merges it at `key`.
    pub fn load_json_file(&self, key: &str, file: impl AsRef<Path>, replace: bool) -> Result<()> {
        let value = codec::decode_json_file(file)?;
        self.load_data(key, value, replace);
        Ok(())
    }

    /// Reads a YAML file and merges it at `key`.
    pub fn load_yaml_file(&self, key: &str, file: impl AsRef<Path>, replace: bool) -> Result<()> {
        let value = codec::decode_yaml_file(file)?;
        self.load_data(key, value, replace);
        Ok(())
    }

    /// Grafts the immediate branches of `other` under the node at `key`.
    ///
    /// Branches of the same name already present at `key` are replaced; other
    /// branches are kept. The grafted nodes are copies: `other` is read under
    /// its own lock first and is not modified or shared afterwards.
    pub fn load_tree(&self, key: &str, other: &Tree) {
        let branches = other
            .find("", |node| node.children.clone())
            .flatten()
            .unwrap_or_default();
        tracing::debug!(
            path = %self.resolve(key),
            branches = branches.len(),
            "Grafting tree"
        );
        self.prepare(key, |node| {
            for (name, branch) in branches {
                node.graft(name, branch);
            }
        });
    }
}
