pub mod allocator;
pub mod generator;

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::schema::Bucket;
use crate::schema::IdWidth;

/// Upper bound on the number of identifiers a single reservation may claim.
pub const MAX_RESERVATION: u64 = 10_000;

/// Rows to be written to the table of `bucket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub bucket: Bucket,
    pub ids: RangeInclusive<u64>,
}

impl Allocation {
    pub fn new(bucket: Bucket, ids: RangeInclusive<u64>) -> Self {
        Self { bucket, ids }
    }

    pub fn first(&self) -> u64 {
        *self.ids.start()
    }

    pub fn last(&self) -> u64 {
        *self.ids.end()
    }
}

#[derive(Debug, Error)]
pub enum SequenceError<E> {
    #[error("sequence `{bucket}` is exhausted (width `{width}`)")]
    Exhausted { bucket: Bucket, width: IdWidth },
    #[error("id {id} already exists in `{bucket}`")]
    DuplicateId { bucket: Bucket, id: u64 },
    #[error("id {id} is out of range for `{bucket}`")]
    InvalidId { bucket: Bucket, id: u64 },
    #[error("reservation must claim at least one id")]
    EmptyReservation,
    #[error("reservation of {0} ids exceeds the limit of {}", MAX_RESERVATION)]
    ReservationTooLarge(u64),
    #[error("storage lock poisoned")]
    Poisoned,
    #[error("storage error")]
    StorageError(#[from] E),
}
