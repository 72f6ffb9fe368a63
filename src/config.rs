use std::path::PathBuf;

use crate::schema::IdWidth;
use crate::storage::disk::*;

pub const DEFAULT_DB_PATH: &str = "/tmp/authseq";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub path: PathBuf,
    /// Width for a new store. When unset an existing store keeps its recorded width.
    pub width: Option<IdWidth>,
    /// Sync the write-ahead log before an allocation returns.
    pub sync: bool,
    pub create_if_missing: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            width: None,
            sync: true,
            create_if_missing: true,
        }
    }
}

impl StorageConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: IdWidth) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }

    pub fn open(&self) -> Result<DiskStorage<ReadWrite>, DiskStorageError> {
        DiskStorage::read_write(&self.path, self.width, self.sync, self.create_if_missing)
    }

    pub fn open_read_only(&self) -> Result<DiskStorage<ReadOnly>, DiskStorageError> {
        DiskStorage::read_only(&self.path)
    }
}
