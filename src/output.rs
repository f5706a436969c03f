//! Persisting a rendered listing: destination naming and conflict-free writes.

use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::SaveError;

/// Default directory for saved listings, relative to the working directory.
pub const DEFAULT_TREES_DIR: &str = "Trees";

const MAX_SUFFIX: u32 = 999;

/// Where a save goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// An explicit file path.
    File(PathBuf),
    /// A directory receiving a timestamped default file name.
    Directory(PathBuf),
}

impl SaveTarget {
    /// Resolve the destination for a tree rooted at `root_name`, saved at `now`.
    pub fn resolve(&self, root_name: &str, now: NaiveDateTime) -> PathBuf {
        match self {
            SaveTarget::File(path) => path.clone(),
            SaveTarget::Directory(dir) => dir.join(default_file_name(root_name, now)),
        }
    }
}

/// `"<root name> <dd.mm.YYYY HH.MM>.txt"`, with the name made safe for a file name.
pub fn default_file_name(root_name: &str, now: NaiveDateTime) -> String {
    format!(
        "{} {}.txt",
        sanitize_file_stem(root_name),
        now.format("%d.%m.%Y %H.%M")
    )
}

/// Replace characters that cannot appear in a file name.
fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c| c == '_' || c == ' ' || c == '.');
    if trimmed.is_empty() {
        "root".to_string()
    } else {
        trimmed.to_string()
    }
}

/// First `<stem>-N<.ext>` next to `dest` that does not exist yet, for N from 2.
/// Falls back to `dest` itself if every candidate is taken.
pub fn suggest_free_path(dest: &Path) -> PathBuf {
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = dest
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (2..=MAX_SUFFIX)
        .map(|n| dest.with_file_name(format!("{stem}-{n}{ext}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| dest.to_path_buf())
}

/// Write `text` to `dest`, refusing to replace an existing file.
///
/// Missing parent directories are created. The bytes written are exactly
/// `text`: UTF-8, no byte-order mark.
pub fn save_tree(text: &str, dest: &Path) -> Result<(), SaveError> {
    let write_failure = |source| SaveError::WriteFailure {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failure)?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(dest) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(SaveError::DestinationConflict {
                path: dest.to_path_buf(),
            });
        }
        Err(e) => return Err(write_failure(e)),
    };

    file.write_all(text.as_bytes()).map_err(write_failure)?;
    file.flush().map_err(write_failure)?;

    info!(path = %dest.display(), bytes = text.len(), "tree saved");
    Ok(())
}
