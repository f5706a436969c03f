//! Glob presets that mark directories as collapsed before rendering.

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};

use super::Tree;

/// Directories collapsed by `--collapse-common`.
pub const COMMON_COLLAPSE: &[&str] = &[".git", "node_modules", "__pycache__", "target", ".venv"];

/// Build a GlobSet from user patterns, optionally adding [`COMMON_COLLAPSE`].
/// Invalid patterns are skipped with a warning.
pub fn build_collapse_set(user_patterns: &[String], with_common: bool) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    if with_common {
        for pattern in COMMON_COLLAPSE {
            if let Ok(g) = Glob::new(pattern) {
                builder.add(g);
            }
        }
    }
    let mut invalid = Vec::new();
    for pattern in user_patterns {
        match Glob::new(pattern) {
            Ok(g) => {
                builder.add(g);
            }
            Err(_) => invalid.push(pattern.clone()),
        }
    }
    if !invalid.is_empty() {
        warn!(patterns = ?invalid, "invalid collapse pattern(s), skipped");
    }
    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "failed to build collapse set");
        GlobSet::empty()
    })
}

/// Set `skip` on every non-root directory whose name or root-relative path
/// matches `set`. Returns how many directories were marked.
pub fn apply_collapse_set(tree: &mut Tree, set: &GlobSet) -> usize {
    if set.is_empty() {
        return 0;
    }
    let root = tree.root();
    let matched: Vec<_> = tree
        .ids()
        .filter(|&id| id != root && tree.node(id).is_dir)
        .filter(|&id| {
            let node = tree.node(id);
            set.is_match(node.name.as_str()) || set.is_match(tree.relative_path(id))
        })
        .collect();

    for &id in &matched {
        tree.set_skip(id, true);
        debug!(path = %tree.node(id).path.display(), "collapsed by pattern");
    }
    matched.len()
}
