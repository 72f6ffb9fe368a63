pub mod disk;
pub mod memory;
pub mod serde;

use crate::schema::Bucket;
use crate::schema::IdWidth;
use crate::sequence::Allocation;

pub type Bytes = Vec<u8>;

pub trait ReadStorage {
    type Error: std::error::Error;

    /// Width of the identifier column in every table of this store.
    fn width(&self) -> IdWidth;

    /// Largest identifier allocated in `bucket`, or `0` if nothing was allocated yet.
    fn max_id(&self, bucket: Bucket) -> Result<u64, Self::Error>;

    fn contains(&self, bucket: Bucket, id: u64) -> Result<bool, Self::Error>;

    /// Allocated identifiers of `bucket` in ascending order, starting at `from`.
    fn ids(&self, bucket: Bucket, from: u64) -> impl Iterator<Item = Result<u64, Self::Error>>;
}

pub trait WriteStorage: ReadStorage {
    /// Persists every row of `allocation` at once. Either all rows are stored or none are.
    fn save(&mut self, allocation: &Allocation) -> Result<(), Self::Error>;
}
