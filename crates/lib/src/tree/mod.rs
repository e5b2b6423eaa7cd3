//! The hierarchical key-value store.
//!
//! A [`Tree`] is a handle onto a shared graph of nodes addressed by dot-paths.
//! Every handle derived from one [`Tree::new`] (through [`Tree::tree`],
//! [`Tree::branches`] or [`Tree::parent`]) operates on the same nodes and is
//! guarded by the same single read/write lock.
//!
//! # Locking
//!
//! - Reads (`get`, `has`, typed accessors, `node_num`, `tree`) hold the shared
//!   lock for the whole traversal.
//! - Writes (`set`, `add`, `clear`, `load_data`, `load_tree`) hold the exclusive
//!   lock for the whole operation, including the full recursive merge of a load.
//! - The lock is coarse: operations on unrelated subtrees still serialize.
//!
//! # Usage
//!
//! ```
//! # use cfgtree::Tree;
//! let tree = Tree::new();
//! tree.set("Server.Port", 8080);
//!
//! assert_eq!(tree.int("server.port"), Some(8080));
//! assert!(tree.add("server.host", "localhost"));
//! assert!(!tree.add("server.host", "example.com"));
//!
//! let server = tree.tree("server").unwrap();
//! assert_eq!(server.string("host").as_deref(), Some("localhost"));
//! assert_eq!(tree.node_num("server"), 2);
//! ```

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::Value;

mod merge;
pub mod path;
mod typed;

pub use path::KeyPath;

/// One addressable point in the hierarchy.
///
/// Each node is exclusively owned by its parent's child map. Upward navigation
/// goes through the [`KeyPath`] carried by a [`Tree`] handle; nodes hold no
/// reference to their parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Node {
    name: String,
    /// Unset when `None`. Never holds `Value::Null`.
    value: Option<Value>,
    /// Absent until the first child is inserted.
    children: Option<BTreeMap<String, Node>>,
}

impl Node {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Overwrites the value. Assigning `Null` unsets it.
    pub(crate) fn assign(&mut self, value: Value) {
        self.value = (!value.is_null()).then_some(value);
    }

    /// Assigns only when the value is currently unset.
    pub(crate) fn assign_if_unset(&mut self, value: Value) -> bool {
        if self.value.is_some() || value.is_null() {
            return false;
        }
        self.value = Some(value);
        true
    }

    pub(crate) fn child(&self, name: &str) -> Option<&Node> {
        self.children.as_ref()?.get(name)
    }

    /// Returns the named child, creating it (and the child map) when missing.
    pub(crate) fn child_or_insert(&mut self, name: &str) -> &mut Node {
        let parent = &self.name;
        self.children
            .get_or_insert_with(BTreeMap::new)
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::trace!(parent = %parent, child = name, "Creating node");
                Node::named(name)
            })
    }

    /// Replaces or inserts a whole child subtree under `name`.
    pub(crate) fn graft(&mut self, name: String, mut node: Node) {
        node.name.clone_from(&name);
        self.children
            .get_or_insert_with(BTreeMap::new)
            .insert(name, node);
    }

    /// Follows existing children along `segments`.
    pub(crate) fn descend(&self, segments: &[String]) -> Option<&Node> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    pub(crate) fn descend_mut(&mut self, segments: &[String]) -> Option<&mut Node> {
        let mut current = self;
        for segment in segments {
            current = current.children.as_mut()?.get_mut(segment)?;
        }
        Some(current)
    }

    /// Follows `segments`, creating every missing node on the way.
    pub(crate) fn prepare(&mut self, segments: &[String]) -> &mut Node {
        segments
            .iter()
            .fold(self, |node, segment| node.child_or_insert(segment))
    }

    /// Discards the value and the entire child map.
    pub(crate) fn clear(&mut self) {
        self.value = None;
        self.children = None;
    }

    pub(crate) fn branch_count(&self) -> usize {
        self.children.as_ref().map_or(0, BTreeMap::len)
    }

    pub(crate) fn branch_names(&self) -> Vec<String> {
        self.children
            .as_ref()
            .map(|children| children.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Rebuilds a value from the current nodes beneath this one.
    ///
    /// A node with children becomes a `Map` of its children (list elements come
    /// back keyed by their decimal index); a leaf yields its own value.
    pub(crate) fn to_value(&self) -> Option<Value> {
        match &self.children {
            Some(children) if !children.is_empty() => Some(Value::Map(
                children
                    .iter()
                    .map(|(name, child)| (name.clone(), child.to_value().unwrap_or(Value::Null)))
                    .collect(),
            )),
            _ => self.value.clone(),
        }
    }
}

/// A handle onto a node of a shared, lock-guarded tree.
///
/// Cloning a `Tree` is cheap and yields another handle onto the same node.
#[derive(Clone)]
pub struct Tree {
    root: Arc<RwLock<Node>>,
    path: KeyPath,
}

impl Tree {
    /// Creates a new, empty tree with its own lock.
    pub fn new() -> Self {
        Self {
            root: Arc::new(RwLock::new(Node::default())),
            path: KeyPath::root(),
        }
    }

    fn handle(&self, path: KeyPath) -> Tree {
        Tree {
            root: Arc::clone(&self.root),
            path,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Node> {
        self.root.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Node> {
        self.root.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(&self, key: &str) -> KeyPath {
        self.path.join(&KeyPath::parse(key))
    }

    /// Read traversal: runs `f` on the node at `key` under the shared lock.
    ///
    /// Returns `None` as soon as a segment is missing; never creates nodes.
    pub(crate) fn find<R>(&self, key: &str, f: impl FnOnce(&Node) -> R) -> Option<R> {
        let path = self.resolve(key);
        let root = self.read();
        root.descend(path.segments()).map(f)
    }

    /// Write traversal: runs `f` on the node at `key` under the exclusive lock,
    /// creating any missing node along the path.
    pub(crate) fn prepare<R>(&self, key: &str, f: impl FnOnce(&mut Node) -> R) -> R {
        let path = self.resolve(key);
        let mut root = self.write();
        f(root.prepare(path.segments()))
    }

    /// Runs `f` on the node at `key` under the exclusive lock, only if it exists.
    pub(crate) fn find_mut<R>(&self, key: &str, f: impl FnOnce(&mut Node) -> R) -> Option<R> {
        let path = self.resolve(key);
        let mut root = self.write();
        root.descend_mut(path.segments()).map(f)
    }

    /// Overwrites the value at `key`, creating the path if needed.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        self.prepare(key, |node| node.assign(value));
    }

    /// Assigns the value at `key` only if it is currently unset.
    ///
    /// Returns true if the assignment happened.
    pub fn add(&self, key: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.prepare(key, |node| node.assign_if_unset(value))
    }

    /// Returns the value stored at `key`, if the node exists and has one.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.find(key, |node| node.value().cloned()).flatten()
    }

    /// Returns true if [`Tree::get`] would return a value.
    pub fn has(&self, key: &str) -> bool {
        self.find(key, |node| node.value().is_some()).unwrap_or(false)
    }

    /// Returns a handle onto the existing node at `key`.
    ///
    /// The handle shares state and lock with this tree; it is not a copy.
    pub fn tree(&self, key: &str) -> Option<Tree> {
        let path = self.resolve(key);
        let exists = self.read().descend(path.segments()).is_some();
        exists.then(|| self.handle(path))
    }

    /// Returns handles onto the immediate children of this node.
    ///
    /// The map itself is a snapshot of the child names taken under the read
    /// lock; each handle is live, so writing through it writes to the tree.
    /// Children created afterwards do not appear in an already returned map.
    pub fn branches(&self) -> BTreeMap<String, Tree> {
        self.find("", Node::branch_names)
            .unwrap_or_default()
            .into_iter()
            .map(|name| {
                let handle = self.handle(self.path.child(name.as_str()));
                (name, handle)
            })
            .collect()
    }

    /// Returns the number of immediate children of the node at `key`, or 0.
    pub fn node_num(&self, key: &str) -> usize {
        self.find(key, Node::branch_count).unwrap_or(0)
    }

    /// Discards the value and all children of the node at `key`.
    ///
    /// The node itself stays addressable. A missing path is a no-op.
    pub fn clear(&self, key: &str) {
        if self.find_mut(key, Node::clear).is_some() {
            tracing::debug!(path = %self.resolve(key), "Cleared node");
        }
    }

    /// Rebuilds the subtree at `key` as a single value.
    ///
    /// See [`Tree::get`] for the value stored at the node itself; this instead
    /// reflects the nodes currently materialized beneath it.
    pub fn to_value(&self, key: &str) -> Option<Value> {
        self.find(key, Node::to_value).flatten()
    }

    /// The name of this handle's node; empty for the root.
    pub fn name(&self) -> String {
        self.path.name().unwrap_or_default().to_string()
    }

    /// The full dot-path of this handle's node from the root.
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }

    /// Returns a handle onto the enclosing node, or `None` at the root.
    pub fn parent(&self) -> Option<Tree> {
        self.path.parent().map(|path| self.handle(path))
    }

    /// Returns true if both handles belong to the same tree (and lock).
    pub fn same_tree(&self, other: &Tree) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("path", &self.path()).finish()
    }
}
