//! FileKeyValueStore - one JSON file per key under a directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// Directory-backed key-value store.
///
/// `key` lives in `<dir>/<key>.json`. A write goes to a temporary sibling first and is
/// then renamed over the target, so readers see either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn io_error(key: &str, err: io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;

        let target = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        let mut file = fs::File::create(&tmp).map_err(|e| Self::io_error(key, e))?;
        file.write_all(value.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| Self::io_error(key, e))?;
        fs::rename(&tmp, &target).map_err(|e| Self::io_error(key, e))
    }
}
