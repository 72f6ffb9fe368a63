use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::convert::Infallible;

use either::Either;

use crate::schema::*;
use crate::sequence::Allocation;
use crate::storage::*;

#[derive(Default, Debug)]
pub struct InMemoryStorage {
    width: IdWidth,
    tables: BTreeMap<Bucket, BTreeSet<u64>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(width: IdWidth) -> Self {
        Self {
            width,
            tables: BTreeMap::new(),
        }
    }
}

impl ReadStorage for InMemoryStorage {
    type Error = Infallible;

    fn width(&self) -> IdWidth {
        self.width
    }

    fn max_id(&self, bucket: Bucket) -> Result<u64, Self::Error> {
        let max = self
            .tables
            .get(&bucket)
            .and_then(|rows| rows.last())
            .copied();
        Ok(max.unwrap_or(0))
    }

    fn contains(&self, bucket: Bucket, id: u64) -> Result<bool, Self::Error> {
        Ok(self
            .tables
            .get(&bucket)
            .is_some_and(|rows| rows.contains(&id)))
    }

    fn ids(&self, bucket: Bucket, from: u64) -> impl Iterator<Item = Result<u64, Self::Error>> {
        match self.tables.get(&bucket) {
            Some(rows) => Either::Left(rows.range(from..).copied().map(Ok)),
            None => Either::Right(std::iter::empty()),
        }
    }
}

impl WriteStorage for InMemoryStorage {
    fn save(&mut self, allocation: &Allocation) -> Result<(), Self::Error> {
        let rows = self.tables.entry(allocation.bucket).or_default();
        rows.extend(allocation.ids.clone());
        Ok(())
    }
}
