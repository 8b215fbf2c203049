//! Deterministic single-level directory enumeration

use crate::error::AddError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A regular file found in a directory.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Base name, used as the link name.
    pub name: String,
}

/// An immediate subdirectory.
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
}

/// Walker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Entry names to skip entirely (e.g. ".git"). Empty by default: an
    /// add must reproduce the directory exactly, so filtering is opt-in.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

/// Enumerates one directory level at a time.
///
/// Entries come back sorted by name, so a build over the same tree always
/// sees the same order.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    config: WalkerConfig,
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.config.ignore_patterns.iter().any(|p| p == name)
    }

    /// List the immediate files and subdirectories of `dir`, each sorted
    /// by name. Symlinks and special files are skipped unless
    /// `follow_symlinks` is set.
    pub fn list_level(&self, dir: &Path) -> Result<(Vec<FileEntry>, Vec<DirEntry>), AddError> {
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| AddError::Io {
                path: dir.to_path_buf(),
                source: e.into(),
            })?;

            let name = entry.file_name().to_string_lossy().to_string();
            if self.is_ignored(&name) {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_file() {
                files.push(FileEntry {
                    path: entry.path().to_path_buf(),
                    name,
                });
            } else if file_type.is_dir() {
                dirs.push(DirEntry {
                    path: entry.path().to_path_buf(),
                    name,
                });
            }
            // Anything else (sockets, unfollowed symlinks) is skipped.
        }

        Ok((files, dirs))
    }
}
