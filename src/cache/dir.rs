//! Local download directory housekeeping
//!
//! The directory is never trimmed file by file: once its total size passes
//! the configured limit it is wiped and recreated in one go.

use crate::error::{SyncError, SyncResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Cache size status relative to configured limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSizeStatus {
    /// Under 80% of limit
    Ok,
    /// Between 80% and the limit
    Warning,
    /// Over the limit, will be wiped on the next run
    Exceeded,
}

impl CacheSizeStatus {
    /// Determine status based on current size and limit
    pub fn from_usage(current_bytes: u64, limit_bytes: u64) -> Self {
        if limit_bytes == 0 {
            return Self::Ok;
        }
        if current_bytes > limit_bytes {
            Self::Exceeded
        } else if current_bytes as f64 >= limit_bytes as f64 * 0.8 {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    /// Get percentage of limit used
    pub fn percentage(current_bytes: u64, limit_bytes: u64) -> f64 {
        if limit_bytes == 0 {
            return 0.0;
        }
        (current_bytes as f64 / limit_bytes as f64) * 100.0
    }
}

/// A file sitting in the cache directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFile {
    pub name: String,
    pub size: u64,
}

/// The local artifact cache directory
#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path a cached file with this name would live at
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create the directory if necessary
    pub fn ensure(&self) -> SyncResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            SyncError::io(format!("creating cache directory {}", self.root.display()), e)
        })
    }

    /// Total size in bytes of everything below the directory
    pub fn size(&self) -> SyncResult<u64> {
        if !self.root.exists() {
            return Ok(0);
        }
        dir_size(&self.root)
    }

    /// Wipe the directory if it holds more than `max_bytes`.
    ///
    /// Returns the size that triggered the wipe, or `None` if nothing was removed.
    pub fn prune_if_over(&self, max_bytes: u64) -> SyncResult<Option<u64>> {
        let size = self.size()?;
        debug!(
            "Cache {} holds {} bytes (limit {})",
            self.root.display(),
            size,
            max_bytes
        );

        if size <= max_bytes {
            return Ok(None);
        }

        info!(
            "Cache over limit ({} > {} bytes), clearing {}",
            size,
            max_bytes,
            self.root.display()
        );
        self.clear()?;
        Ok(Some(size))
    }

    /// Remove everything and recreate the empty directory
    pub fn clear(&self) -> SyncResult<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(|e| {
                SyncError::io(format!("removing cache directory {}", self.root.display()), e)
            })?;
        }
        self.ensure()
    }

    /// Top-level files, sorted by name
    pub fn list(&self) -> SyncResult<Vec<CachedFile>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in read_dir(&self.root)? {
            let entry = entry
                .map_err(|e| SyncError::io(format!("listing {}", self.root.display()), e))?;
            let meta = entry.metadata().map_err(|e| {
                SyncError::io(format!("inspecting {}", entry.path().display()), e)
            })?;
            if meta.is_file() {
                files.push(CachedFile {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    size: meta.len(),
                });
            }
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}

fn read_dir(path: &Path) -> SyncResult<fs::ReadDir> {
    fs::read_dir(path).map_err(|e| SyncError::io(format!("listing {}", path.display()), e))
}

fn dir_size(path: &Path) -> SyncResult<u64> {
    let mut total = 0;
    for entry in read_dir(path)? {
        let entry = entry.map_err(|e| SyncError::io(format!("listing {}", path.display()), e))?;
        let meta = entry
            .metadata()
            .map_err(|e| SyncError::io(format!("inspecting {}", entry.path().display()), e))?;
        if meta.is_dir() {
            total += dir_size(&entry.path())?;
        } else {
            total += meta.len();
        }
    }
    Ok(total)
}
