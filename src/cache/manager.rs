//! Cache file for the last successfully fetched facts
//!
//! Provides a `FactsCache` that stores a single `Facts` record as tab-indented
//! JSON, used as the fallback source when the classifier is unreachable.

use crate::data::{to_tab_json, Facts};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Permissions for created cache directories
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Permissions for the cache file
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Errors that can occur when reading or writing the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache directory could not be created
    #[error("could not create cache directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Facts could not be serialized
    #[error("could not encode facts: {0}")]
    Encode(#[source] serde_json::Error),

    /// The cache file could not be written
    #[error("could not write cache {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache file could not be read
    #[error("could not read cache {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache file does not contain a facts document
    #[error("could not decode cache {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and writes the cached facts file
///
/// Writes replace the file atomically: content goes to a temporary file in the
/// same directory which is then renamed over the cache path, so a concurrent
/// reader sees either the old or the new record.
#[derive(Debug, Clone)]
pub struct FactsCache {
    /// Location of the cache file
    path: PathBuf,
}

impl FactsCache {
    /// Creates a cache backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the cache file
    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Ensures the cache directory and its parents exist
    fn ensure_dir(&self) -> Result<(), CacheError> {
        let dir = self.dir();
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }
        builder.create(dir).map_err(|source| CacheError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Replaces the cache content with `facts`
    ///
    /// # Returns
    /// * `Ok(())` once the file holds exactly `to_tab_json(facts)`
    /// * `Err` if directory creation, encoding, or writing fails
    pub fn write(&self, facts: &Facts) -> Result<(), CacheError> {
        self.ensure_dir()?;

        let content = to_tab_json(facts).map_err(CacheError::Encode)?;
        let write_error = |source| CacheError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = NamedTempFile::new_in(self.dir()).map_err(write_error)?;
        file.write_all(&content).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(file.path(), fs::Permissions::from_mode(FILE_MODE))
                .map_err(write_error)?;
        }
        file.persist(&self.path).map_err(|err| write_error(err.error))?;

        Ok(())
    }

    /// Reads the cached facts
    ///
    /// The record is returned exactly as stored; it is not re-enhanced.
    pub fn read(&self) -> Result<Facts, CacheError> {
        let content = fs::read(&self.path).map_err(|source| CacheError::Read {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_slice(&content).map_err(|source| CacheError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Time since the cache file was last written, if it can be determined
    pub fn age(&self) -> Option<Duration> {
        let modified = fs::metadata(&self.path).ok()?.modified().ok()?;
        modified.elapsed().ok()
    }
}
