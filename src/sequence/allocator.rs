use crate::schema::Bucket;
use crate::sequence::*;
use crate::storage::ReadStorage;

/// Plans the next `count` identifiers of `bucket`, continuing after the largest one stored.
pub fn next<S: ReadStorage>(
    storage: &S,
    bucket: Bucket,
    count: u64,
) -> Result<Allocation, SequenceError<S::Error>> {
    if count == 0 {
        return Err(SequenceError::EmptyReservation);
    }
    if count > MAX_RESERVATION {
        return Err(SequenceError::ReservationTooLarge(count));
    }
    let width = storage.width();
    let last = storage.max_id(bucket)?;
    match last.checked_add(count) {
        Some(end) if end <= width.max_id() => Ok(Allocation::new(bucket, last + 1..=end)),
        _ => Err(SequenceError::Exhausted { bucket, width }),
    }
}

/// Plans an explicit identifier. Later allocations continue after it if it is the largest.
pub fn insert<S: ReadStorage>(
    storage: &S,
    bucket: Bucket,
    id: u64,
) -> Result<Allocation, SequenceError<S::Error>> {
    if id == 0 || id > storage.width().max_id() {
        return Err(SequenceError::InvalidId { bucket, id });
    }
    if storage.contains(bucket, id)? {
        return Err(SequenceError::DuplicateId { bucket, id });
    }
    Ok(Allocation::new(bucket, id..=id))
}
