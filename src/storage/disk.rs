use std::marker::PhantomData;
use std::path::Path;

use either::Either;
use rocksdb::{ColumnFamily, Direction, IteratorMode, Options, WriteBatch, WriteOptions, DB};
use thiserror::Error;
use tracing::info;

use crate::schema::*;
use crate::sequence::Allocation;
use crate::storage::*;

pub struct ReadOnly;
pub struct ReadWrite;

/// Stores every bucket in a dedicated column family named after its table. A `meta` column
/// family records the id width the tables were created with.
pub struct DiskStorage<Mode> {
    db: DB,
    width: IdWidth,
    sync: bool,
    marker: PhantomData<Mode>,
}

#[derive(Debug, Error)]
pub enum DiskStorageError {
    #[error("rocksdb error")]
    DbError(#[from] rocksdb::Error),
    #[error("read error")]
    ReadError(#[from] serde::ReadError),
    #[error("table `{0}` does not exist")]
    MissingTable(&'static str),
    #[error("tables were created with width `{stored}`, cannot open with `{requested}`")]
    WidthMismatch { stored: IdWidth, requested: IdWidth },
}

fn table_names() -> Vec<&'static str> {
    let mut names: Vec<_> = Bucket::ALL.iter().map(Bucket::table_name).collect();
    names.push(META_TABLE);
    names
}

/// Fails with the first table the store at `path` lacks.
fn check_tables(options: &Options, path: &Path) -> Result<(), DiskStorageError> {
    let existing = DB::list_cf(options, path)?;
    let missing = table_names()
        .into_iter()
        .find(|name| !existing.iter().any(|cf| cf.as_str() == *name));
    match missing {
        Some(name) => Err(DiskStorageError::MissingTable(name)),
        None => Ok(()),
    }
}

fn write_options(sync: bool) -> WriteOptions {
    let mut write_options = WriteOptions::default();
    write_options.set_sync(sync);
    write_options
}

fn stored_width(db: &DB) -> Result<Option<IdWidth>, DiskStorageError> {
    let meta = db
        .cf_handle(META_TABLE)
        .ok_or(DiskStorageError::MissingTable(META_TABLE))?;
    match db.get_cf(meta, META_WIDTH_KEY)? {
        Some(bytes) => Ok(Some(serde::width::deserialize(&bytes)?)),
        None => Ok(None),
    }
}

impl DiskStorage<ReadWrite> {
    /// Without a requested `width` the store keeps the width it was created with, a new store
    /// gets the default one.
    pub fn read_write(
        path: impl AsRef<Path>,
        width: Option<IdWidth>,
        sync: bool,
        create_if_missing: bool,
    ) -> Result<Self, DiskStorageError> {
        let path = path.as_ref();
        let mut options = Options::default();
        options.create_if_missing(create_if_missing);
        options.create_missing_column_families(create_if_missing);
        if !create_if_missing {
            check_tables(&options, path)?;
        }
        let db = DB::open_cf(&options, path, table_names())?;
        let width = Self::init_width(&db, width, sync)?;
        info!(path = %path.display(), %width, sync, "opened sequence tables");
        Ok(Self {
            db,
            width,
            sync,
            marker: PhantomData,
        })
    }

    fn init_width(
        db: &DB,
        requested: Option<IdWidth>,
        sync: bool,
    ) -> Result<IdWidth, DiskStorageError> {
        match (stored_width(db)?, requested) {
            (Some(stored), Some(requested)) if stored != requested => {
                Err(DiskStorageError::WidthMismatch { stored, requested })
            }
            (Some(stored), _) => Ok(stored),
            (None, requested) => {
                let width = requested.unwrap_or_default();
                let meta = db
                    .cf_handle(META_TABLE)
                    .ok_or(DiskStorageError::MissingTable(META_TABLE))?;
                db.put_cf_opt(
                    meta,
                    META_WIDTH_KEY,
                    serde::width::serialize(width),
                    &write_options(sync),
                )?;
                Ok(width)
            }
        }
    }
}

impl DiskStorage<ReadOnly> {
    /// Width is read from the store itself.
    pub fn read_only(path: impl AsRef<Path>) -> Result<Self, DiskStorageError> {
        let path = path.as_ref();
        let options = Options::default();
        check_tables(&options, path)?;
        let db = DB::open_cf_for_read_only(&options, path, table_names(), false)?;
        let width = stored_width(&db)?.unwrap_or_default();
        info!(path = %path.display(), %width, "opened sequence tables read-only");
        Ok(Self {
            db,
            width,
            sync: false,
            marker: PhantomData,
        })
    }
}

impl<Mode> DiskStorage<Mode> {
    fn table(&self, name: &'static str) -> Result<&ColumnFamily, DiskStorageError> {
        self.db
            .cf_handle(name)
            .ok_or(DiskStorageError::MissingTable(name))
    }
}

impl<Mode> ReadStorage for DiskStorage<Mode> {
    type Error = DiskStorageError;

    fn width(&self) -> IdWidth {
        self.width
    }

    fn max_id(&self, bucket: Bucket) -> Result<u64, Self::Error> {
        let table = self.table(bucket.table_name())?;
        match self.db.iterator_cf(table, IteratorMode::End).next() {
            Some(item) => {
                let (key, _) = item?;
                Ok(serde::row::id(&key)?)
            }
            None => Ok(0),
        }
    }

    fn contains(&self, bucket: Bucket, id: u64) -> Result<bool, Self::Error> {
        let table = self.table(bucket.table_name())?;
        let row = self.db.get_pinned_cf(table, serde::row::key(id))?;
        Ok(row.is_some())
    }

    fn ids(&self, bucket: Bucket, from: u64) -> impl Iterator<Item = Result<u64, Self::Error>> {
        let table = match self.table(bucket.table_name()) {
            Ok(table) => table,
            Err(err) => return Either::Right(std::iter::once(Err(err))),
        };
        let start = serde::row::key(from);
        let rows = self
            .db
            .iterator_cf(table, IteratorMode::From(&start, Direction::Forward))
            .map(|item| -> Result<u64, DiskStorageError> {
                let (key, _) = item?;
                Ok(serde::row::id(&key)?)
            });
        Either::Left(rows)
    }
}

impl WriteStorage for DiskStorage<ReadWrite> {
    fn save(&mut self, allocation: &Allocation) -> Result<(), Self::Error> {
        let table = self.table(allocation.bucket.table_name())?;
        let mut batch = WriteBatch::default();
        for id in allocation.ids.clone() {
            batch.put_cf(table, serde::row::key(id), "");
        }
        self.db.write_opt(batch, &write_options(self.sync))?;
        Ok(())
    }
}
