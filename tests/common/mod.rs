#![allow(dead_code)]

use projectmap::render::render_lines;
use projectmap::tree::{EntryInfo, EntryKind, FsProvider, Tree};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Rendered lines after the legend and the ROOT line.
pub fn body(tree: &Tree, root: &Path) -> Vec<String> {
    render_lines(tree, root).split_off(4)
}

/// Names of the root's direct children, in order.
pub fn child_names(tree: &Tree) -> Vec<String> {
    tree.children(tree.root())
        .iter()
        .map(|&id| tree.node(id).name.clone())
        .collect()
}

/// In-memory filesystem: directories map to listings, or to a listing error.
#[derive(Default)]
pub struct MemFs {
    kinds: HashMap<PathBuf, EntryKind>,
    dirs: HashMap<PathBuf, Result<Vec<EntryInfo>, io::ErrorKind>>,
}

impl MemFs {
    pub fn dir(mut self, path: &str) -> Self {
        self.add(path, true, false);
        self.dirs.entry(PathBuf::from(path)).or_insert_with(|| Ok(Vec::new()));
        self
    }

    pub fn file(mut self, path: &str) -> Self {
        self.add(path, false, false);
        self
    }

    pub fn symlink(mut self, path: &str, to_dir: bool) -> Self {
        self.add(path, to_dir, true);
        self
    }

    /// Make listing `path` fail with `kind`.
    pub fn deny(mut self, path: &str, kind: io::ErrorKind) -> Self {
        self.dirs.insert(PathBuf::from(path), Err(kind));
        self
    }

    /// Give a symlink target some content for the probe.
    pub fn target_entries(mut self, path: &str, entries: &[&str]) -> Self {
        let listing = entries
            .iter()
            .map(|name| EntryInfo {
                name: name.to_string(),
                path: Path::new(path).join(name),
                is_dir: false,
                is_symlink: false,
            })
            .collect();
        self.dirs.insert(PathBuf::from(path), Ok(listing));
        self
    }

    fn add(&mut self, path: &str, is_dir: bool, is_symlink: bool) {
        let path = PathBuf::from(path);
        self.kinds.insert(path.clone(), EntryKind { is_dir, is_symlink });
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if let Some(Ok(listing)) = self.dirs.get_mut(parent) {
                listing.push(EntryInfo {
                    name: name.to_string_lossy().into_owned(),
                    path: path.clone(),
                    is_dir,
                    is_symlink,
                });
            }
        }
    }
}

impl FsProvider for MemFs {
    fn classify(&self, path: &Path) -> io::Result<EntryKind> {
        self.kinds
            .get(path)
            .copied()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<EntryInfo>> {
        match self.dirs.get(path) {
            Some(Ok(entries)) => Ok(entries.clone()),
            Some(Err(kind)) => Err(io::Error::from(*kind)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}
