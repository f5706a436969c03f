//! In-memory directory tree, per-node display flags, and tree construction.

pub mod collapse;
pub mod scan;

use std::path::{Path, PathBuf};

pub use collapse::{apply_collapse_set, build_collapse_set};
pub use scan::{absolute_path, build_tree, build_tree_with, EntryInfo, EntryKind, FsProvider, WalkdirFs};

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One filesystem entry within the scanned subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Base name; for the root, the full path when the base name is empty.
    pub name: String,
    /// Absolute filesystem path.
    pub path: PathBuf,
    /// Directory, or symlink resolving to a directory.
    pub is_dir: bool,
    /// Symbolic link or junction.
    pub is_symlink: bool,
    /// Whether the directory has entries. Symlinked directories carry a probe
    /// result here while their `children` stay empty.
    pub has_children: bool,
    skip: bool,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, is_dir: bool, is_symlink: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir,
            is_symlink,
            has_children: false,
            skip: false,
            children: Vec::new(),
            parent: None,
        }
    }

    /// The collapse flag. Always false for files.
    pub fn skip(&self) -> bool {
        self.is_dir && self.skip
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// What the details panel shows for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDetails {
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_symlink: bool,
    /// Collapse flag, false for files.
    pub skip: bool,
    /// Whether the collapse flag can be changed (directories only).
    pub can_skip: bool,
}

/// A scanned directory tree. Nodes live in an arena; `parent` links are plain
/// indices and never own anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Start a tree from its root node.
    pub fn with_root(mut root: Node) -> Self {
        root.parent = None;
        root.children.clear();
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root. Pairs with [`Tree::len`].
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Append `child` as the last child of `parent` and return its id.
    pub fn push_child(&mut self, parent: NodeId, mut child: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        child.parent = Some(parent);
        child.children.clear();
        self.nodes.push(child);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// All node ids, in insertion order (root first).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Find the node scanned at `path`.
    pub fn find(&self, path: &Path) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.path == path).map(NodeId)
    }

    /// Flip the collapse flag of a directory. Files are left alone.
    /// Returns the new flag value.
    pub fn toggle_skip(&mut self, id: NodeId) -> bool {
        let node = &mut self.nodes[id.0];
        if node.is_dir {
            node.skip = !node.skip;
        }
        node.skip()
    }

    /// Set the collapse flag of a directory. Returns false if `id` is a file.
    pub fn set_skip(&mut self, id: NodeId, skip: bool) -> bool {
        let node = &mut self.nodes[id.0];
        if !node.is_dir {
            return false;
        }
        node.skip = skip;
        true
    }

    pub fn details(&self, id: NodeId) -> NodeDetails {
        let node = &self.nodes[id.0];
        NodeDetails {
            path: node.path.clone(),
            is_dir: node.is_dir,
            is_symlink: node.is_symlink,
            skip: node.skip(),
            can_skip: node.is_dir,
        }
    }

    /// Path of `id` relative to the root, using `/` separators.
    pub fn relative_path(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.nodes[current.0];
            if node.parent.is_none() {
                break;
            }
            parts.push(node.name.as_str());
            cursor = node.parent;
        }
        parts.reverse();
        parts.join("/")
    }
}
