//! Bounded-size asset directories for target and generated photos
//!
//! Writes go to a temporary file in the destination directory and are renamed
//! into place, so concurrent requests never observe partial files. Filenames are
//! random UUIDs and never collide across requests.

use crate::io::error::{Result, file_system, invalid_parameter};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Opaque reference to a stored asset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHandle(String);

impl AssetHandle {
    /// Wrap a stored filename
    pub fn new(filename: impl Into<String>) -> Self {
        Self(filename.into())
    }

    /// Filename the asset was stored under
    pub fn filename(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage for encoded photos referenced by layouts
pub trait AssetStore {
    /// Persist encoded bytes under `filename`
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be written
    fn save(&self, bytes: &[u8], filename: &str) -> Result<AssetHandle>;

    /// Stable path or URL for a stored asset
    fn resolve(&self, handle: &AssetHandle) -> String;
}

/// Unique filename with the given prefix and extension
pub fn unique_filename(prefix: &str, extension: &str) -> String {
    format!("{prefix}{}.{extension}", uuid::Uuid::new_v4().simple())
}

/// Asset store backed by one directory with a file budget
#[derive(Debug, Clone)]
pub struct DirectoryAssetStore {
    root: PathBuf,
    url_prefix: String,
    max_files: usize,
}

impl DirectoryAssetStore {
    /// Open (creating if needed) a directory store
    ///
    /// Resolved references are `url_prefix/filename`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the budget is zero
    pub fn open(
        root: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
        max_files: usize,
    ) -> Result<Self> {
        if max_files == 0 {
            return Err(invalid_parameter(
                "max_files",
                &max_files,
                &"the store must keep at least one file",
            ));
        }
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| file_system(&root, "create directory", e))?;
        Ok(Self {
            root,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
            max_files,
        })
    }

    /// Directory files are written to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a stored asset on disk
    pub fn path_of(&self, handle: &AssetHandle) -> PathBuf {
        self.root.join(handle.filename())
    }

    /// Delete the oldest files until at most the file budget remains
    ///
    /// Files that cannot be removed are logged and skipped. Returns the number of
    /// files deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed
    pub fn cleanup(&self) -> Result<usize> {
        let entries =
            std::fs::read_dir(&self.root).map_err(|e| file_system(&self.root, "list", e))?;

        let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| file_system(&self.root, "list", e))?;
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if metadata.is_file() {
                let stamp = metadata
                    .created()
                    .or_else(|_| metadata.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                files.push((stamp, entry.path()));
            }
        }

        if files.len() <= self.max_files {
            return Ok(0);
        }

        files.sort();
        let excess = files.len() - self.max_files;
        let mut removed = 0;
        for (_, path) in files.iter().take(excess) {
            match std::fs::remove_file(path) {
                Ok(()) => removed += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove old asset"),
            }
        }
        debug!(removed, kept = files.len() - removed, "cleaned asset directory");
        Ok(removed)
    }
}

impl AssetStore for DirectoryAssetStore {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<AssetHandle> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.starts_with('.') {
            return Err(invalid_parameter(
                "filename",
                &filename,
                &"must be a plain file name",
            ));
        }
        let destination = self.root.join(filename);

        let mut temp = NamedTempFile::new_in(&self.root)
            .map_err(|e| file_system(&self.root, "create temporary file", e))?;
        std::io::Write::write_all(&mut temp, bytes)
            .map_err(|e| file_system(temp.path(), "write", e))?;
        temp.persist(&destination)
            .map_err(|e| file_system(&destination, "rename", e.error))?;

        debug!(file = filename, bytes = bytes.len(), "stored asset");
        Ok(AssetHandle::new(filename))
    }

    fn resolve(&self, handle: &AssetHandle) -> String {
        format!("{}/{}", self.url_prefix, handle.filename())
    }
}
