use std::ops::RangeInclusive;

use crate::schema::Bucket;
use crate::sequence::generator::SequenceGenerator;
use crate::sequence::SequenceError;
use crate::storage::{ReadStorage, WriteStorage};

type Result<T, S> = std::result::Result<T, SequenceError<<S as ReadStorage>::Error>>;

/// Sequence generator bound to the table of a single bucket.
pub trait RecordIdentifier {
    const BUCKET: Bucket;

    fn next<S: WriteStorage>(generator: &SequenceGenerator<S>) -> Result<u64, S> {
        generator.next(Self::BUCKET)
    }

    fn reserve<S: WriteStorage>(
        generator: &SequenceGenerator<S>,
        count: u64,
    ) -> Result<RangeInclusive<u64>, S> {
        generator.reserve(Self::BUCKET, count)
    }

    fn insert<S: WriteStorage>(generator: &SequenceGenerator<S>, id: u64) -> Result<(), S> {
        generator.insert(Self::BUCKET, id)
    }

    fn max<S: ReadStorage>(generator: &SequenceGenerator<S>) -> Result<u64, S> {
        generator.max(Self::BUCKET)
    }

    fn contains<S: ReadStorage>(generator: &SequenceGenerator<S>, id: u64) -> Result<bool, S> {
        generator.contains(Self::BUCKET, id)
    }
}

macro_rules! record_identifier {
    ($($name:ident => $bucket:expr, $doc:literal;)*) => {$(
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl RecordIdentifier for $name {
            const BUCKET: Bucket = $bucket;
        }
    )*};
}

record_identifier! {
    ViafIdentifier => Bucket::Viaf, "Sequence generator for VIAF authority identifiers.";
    BnfIdentifier => Bucket::Bnf, "Sequence generator for BnF authority identifiers.";
    GndIdentifier => Bucket::Gnd, "Sequence generator for GND authority identifiers.";
    MefIdentifier => Bucket::Mef, "Sequence generator for MEF authority identifiers.";
    ReroIdentifier => Bucket::Rero, "Sequence generator for RERO authority identifiers.";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryStorage;

    #[test]
    fn identifiers_allocate_from_their_own_bucket() {
        let generator = SequenceGenerator::new(InMemoryStorage::new());

        assert_eq!(1, ViafIdentifier::next(&generator).unwrap());
        assert_eq!(2, ViafIdentifier::next(&generator).unwrap());
        assert_eq!(1, ReroIdentifier::next(&generator).unwrap());

        assert_eq!(2, generator.max(Bucket::Viaf).unwrap());
        assert_eq!(0, generator.max(Bucket::Gnd).unwrap());
    }

    #[test]
    fn insert_through_identifier_moves_its_counter() {
        let generator = SequenceGenerator::new(InMemoryStorage::new());

        MefIdentifier::insert(&generator, 41).unwrap();

        assert!(MefIdentifier::contains(&generator, 41).unwrap());
        assert_eq!(42, MefIdentifier::next(&generator).unwrap());
        assert_eq!(1, BnfIdentifier::next(&generator).unwrap());
        assert_eq!(1..=3, GndIdentifier::reserve(&generator, 3).unwrap());
    }
}
