use std::ops::RangeInclusive;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use tracing::debug;
use tracing::warn;

use crate::schema::default::default_tables;
use crate::schema::*;
use crate::sequence::*;
use crate::storage::*;

type Result<T, S> = std::result::Result<T, SequenceError<<S as ReadStorage>::Error>>;

/// Hands out identifiers for every bucket of a single store.
///
/// Allocations plan and persist while holding the write lock of the store, so concurrent callers
/// are serialised and an identifier is returned only once its row is saved.
pub struct SequenceGenerator<S> {
    storage: RwLock<S>,
}

impl<S: ReadStorage> SequenceGenerator<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: RwLock::new(storage),
        }
    }

    pub fn max(&self, bucket: Bucket) -> Result<u64, S> {
        Ok(self.read()?.max_id(bucket)?)
    }

    pub fn contains(&self, bucket: Bucket, id: u64) -> Result<bool, S> {
        Ok(self.read()?.contains(bucket, id)?)
    }

    pub fn ids(&self, bucket: Bucket, from: u64) -> Result<Vec<u64>, S> {
        let storage = self.read()?;
        let ids = storage.ids(bucket, from).collect::<std::result::Result<_, _>>()?;
        Ok(ids)
    }

    pub fn width(&self) -> Result<IdWidth, S> {
        Ok(self.read()?.width())
    }

    pub fn tables(&self) -> Result<Vec<Table>, S> {
        Ok(default_tables(self.width()?))
    }

    pub fn into_inner(self) -> Result<S, S> {
        self.storage.into_inner().map_err(|_| SequenceError::Poisoned)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, S>, S> {
        self.storage.read().map_err(|_| SequenceError::Poisoned)
    }
}

impl<S: WriteStorage> SequenceGenerator<S> {
    pub fn next(&self, bucket: Bucket) -> Result<u64, S> {
        let ids = self.reserve(bucket, 1)?;
        Ok(*ids.start())
    }

    /// Claims `count` consecutive identifiers of `bucket`.
    pub fn reserve(&self, bucket: Bucket, count: u64) -> Result<RangeInclusive<u64>, S> {
        let mut storage = self.write()?;
        let allocation = match allocator::next(&*storage, bucket, count) {
            Ok(allocation) => allocation,
            Err(err) => {
                warn!(%bucket, count, error = %err, "rejected allocation");
                return Err(err);
            }
        };
        storage.save(&allocation)?;
        debug!(
            %bucket,
            first = allocation.first(),
            last = allocation.last(),
            "allocated ids"
        );
        Ok(allocation.ids)
    }

    /// Stores an explicit identifier, e.g. one carried over from an import.
    pub fn insert(&self, bucket: Bucket, id: u64) -> Result<(), S> {
        let mut storage = self.write()?;
        let allocation = match allocator::insert(&*storage, bucket, id) {
            Ok(allocation) => allocation,
            Err(err) => {
                warn!(%bucket, id, error = %err, "rejected insert");
                return Err(err);
            }
        };
        storage.save(&allocation)?;
        debug!(%bucket, id, "inserted id");
        Ok(())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, S>, S> {
        self.storage.write().map_err(|_| SequenceError::Poisoned)
    }
}
