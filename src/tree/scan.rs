use caseless::default_case_fold_str;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, trace};
use walkdir::WalkDir;

use super::{Node, NodeId, Tree};
use crate::error::ScanError;

/// Classification of a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryKind {
    /// The path, after resolving a symlink, is a directory.
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// One direct entry of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub path: PathBuf,
    /// Directory-like: a directory, or a symlink to one.
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// Filesystem access used by the builder, so it can be swapped or mocked.
pub trait FsProvider {
    /// Classify `path`. Fails when the path cannot be accessed at all.
    fn classify(&self, path: &Path) -> io::Result<EntryKind>;

    /// List the direct entries of a directory, in any order.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<EntryInfo>>;

    /// Whether a directory has at least one entry.
    fn has_entries(&self, path: &Path) -> io::Result<bool> {
        self.list_dir(path).map(|entries| !entries.is_empty())
    }
}

/// Default `FsProvider` backed by walkdir and `std::fs`.
pub struct WalkdirFs;

impl FsProvider for WalkdirFs {
    fn classify(&self, path: &Path) -> io::Result<EntryKind> {
        let meta = fs::symlink_metadata(path)?;
        let is_symlink = meta.file_type().is_symlink();
        let is_dir = if is_symlink {
            // A dangling link is a leaf.
            fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            meta.is_dir()
        };
        Ok(EntryKind { is_dir, is_symlink })
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<EntryInfo>> {
        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry?;
            let is_symlink = entry.path_is_symlink();
            let is_dir = if is_symlink {
                fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false)
            } else {
                entry.file_type().is_dir()
            };
            entries.push(EntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
                is_dir,
                is_symlink,
            });
        }
        Ok(entries)
    }

    fn has_entries(&self, path: &Path) -> io::Result<bool> {
        let mut iter = fs::read_dir(path)?;
        Ok(iter.next().is_some())
    }
}

/// Build the tree rooted at `path` from the real filesystem.
pub fn build_tree(path: &Path) -> Result<Tree, ScanError> {
    build_tree_with(&WalkdirFs, path)
}

/// Build the tree rooted at `path`.
///
/// Only an unclassifiable root is an error. A directory that fails to list
/// becomes a childless node, and symlinked directories are never entered.
pub fn build_tree_with<F: FsProvider + ?Sized>(provider: &F, path: &Path) -> Result<Tree, ScanError> {
    let root_unreadable = |source| ScanError::RootUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let path = absolute_path(path).map_err(root_unreadable)?;
    let kind = provider.classify(&path).map_err(root_unreadable)?;

    let name = root_name(&path);
    let mut tree = Tree::with_root(Node::new(name, path, kind.is_dir, kind.is_symlink));
    let root = tree.root();

    let mut pending: Vec<NodeId> = Vec::new();
    if kind.is_dir {
        if kind.is_symlink {
            probe_symlink_dir(provider, &mut tree, root);
        } else {
            pending.push(root);
        }
    }

    while let Some(id) = pending.pop() {
        let dir_path = tree.node(id).path.clone();
        trace!(path = %dir_path.display(), "listing directory");

        // The listing is fully collected before any child is visited.
        let entries = match provider.list_dir(&dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %dir_path.display(), error = %e, "unreadable directory, treating as empty");
                continue;
            }
        };

        let (mut dirs, mut files): (Vec<EntryInfo>, Vec<EntryInfo>) =
            entries.into_iter().partition(|e| e.is_dir);
        dirs.sort_by_cached_key(|e| sort_key(&e.name));
        files.sort_by_cached_key(|e| sort_key(&e.name));

        for entry in dirs {
            let child = tree.push_child(id, Node::new(entry.name, entry.path, true, entry.is_symlink));
            if entry.is_symlink {
                probe_symlink_dir(provider, &mut tree, child);
            } else {
                pending.push(child);
            }
        }
        for entry in files {
            tree.push_child(id, Node::new(entry.name, entry.path, false, entry.is_symlink));
        }

        let node = tree.node_mut(id);
        node.has_children = !node.children.is_empty();
    }

    info!(root = %tree.node(root).path.display(), nodes = tree.len(), "scan complete");
    Ok(tree)
}

fn probe_symlink_dir<F: FsProvider + ?Sized>(provider: &F, tree: &mut Tree, id: NodeId) {
    let node = tree.node_mut(id);
    node.has_children = match provider.has_entries(&node.path) {
        Ok(has) => has,
        Err(e) => {
            debug!(path = %node.path.display(), error = %e, "symlink target unreadable");
            false
        }
    };
}

/// Case-insensitive ordering key using full Unicode case folding (`ß` folds
/// to `ss`). The raw name breaks ties so the order is total.
fn sort_key(name: &str) -> (String, String) {
    (default_case_fold_str(name), name.to_string())
}

/// Final path segment, or the whole path for a filesystem root.
fn root_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Make `path` absolute and resolve `.`/`..` lexically, without following symlinks.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}
