mod serde;

use authseq::schema::*;
use authseq::sequence::Allocation;
use authseq::storage::*;

trait Storage {
    fn create(width: IdWidth) -> Self;
    fn save(&mut self, allocation: Allocation);
    fn max_id(&self, bucket: Bucket) -> u64;
    fn contains(&self, bucket: Bucket, id: u64) -> bool;
    fn ids(&self, bucket: Bucket, from: u64) -> Vec<u64>;
    fn width(&self) -> IdWidth;
}

mod memory {
    use super::*;
    use authseq::storage::memory::*;

    struct InMemory(InMemoryStorage);

    impl Storage for InMemory {
        fn create(width: IdWidth) -> Self {
            Self(InMemoryStorage::with_width(width))
        }

        fn save(&mut self, allocation: Allocation) {
            self.0.save(&allocation).expect("should succeed")
        }

        fn max_id(&self, bucket: Bucket) -> u64 {
            self.0.max_id(bucket).expect("should succeed")
        }

        fn contains(&self, bucket: Bucket, id: u64) -> bool {
            self.0.contains(bucket, id).expect("should succeed")
        }

        fn ids(&self, bucket: Bucket, from: u64) -> Vec<u64> {
            self.0
                .ids(bucket, from)
                .map(|result| result.expect("should be valid"))
                .collect()
        }

        fn width(&self) -> IdWidth {
            self.0.width()
        }
    }

    #[test]
    fn return_zero_for_empty_table() {
        return_zero_for_empty_table_impl::<InMemory>();
    }

    #[test]
    fn find_saved_ids() {
        find_saved_ids_impl::<InMemory>();
    }

    #[test]
    fn keep_tables_apart() {
        keep_tables_apart_impl::<InMemory>();
    }

    #[test]
    fn order_ids_numerically() {
        order_ids_numerically_impl::<InMemory>();
    }

    #[test]
    fn list_ids_from_lower_bound() {
        list_ids_from_lower_bound_impl::<InMemory>();
    }

    #[test]
    fn report_width() {
        report_width_impl::<InMemory>();
    }
}

mod disk {
    use super::*;
    use authseq::storage::disk::*;
    use tempdir::TempDir;

    // The directory is removed when dropped, keep it alongside the store
    struct Disk(DiskStorage<ReadWrite>, TempDir);

    impl Storage for Disk {
        fn create(width: IdWidth) -> Self {
            let dir = TempDir::new("authseq").expect("Unable to create temp dir");
            let storage = DiskStorage::read_write(dir.path(), Some(width), false, true)
                .expect("Unable to open DB");
            Self(storage, dir)
        }

        fn save(&mut self, allocation: Allocation) {
            self.0.save(&allocation).expect("should succeed")
        }

        fn max_id(&self, bucket: Bucket) -> u64 {
            self.0.max_id(bucket).expect("should succeed")
        }

        fn contains(&self, bucket: Bucket, id: u64) -> bool {
            self.0.contains(bucket, id).expect("should succeed")
        }

        fn ids(&self, bucket: Bucket, from: u64) -> Vec<u64> {
            self.0
                .ids(bucket, from)
                .map(|result| result.expect("should be valid"))
                .collect()
        }

        fn width(&self) -> IdWidth {
            self.0.width()
        }
    }

    #[test]
    fn return_zero_for_empty_table() {
        return_zero_for_empty_table_impl::<Disk>();
    }

    #[test]
    fn find_saved_ids() {
        find_saved_ids_impl::<Disk>();
    }

    #[test]
    fn keep_tables_apart() {
        keep_tables_apart_impl::<Disk>();
    }

    #[test]
    fn order_ids_numerically() {
        order_ids_numerically_impl::<Disk>();
    }

    #[test]
    fn list_ids_from_lower_bound() {
        list_ids_from_lower_bound_impl::<Disk>();
    }

    #[test]
    fn report_width() {
        report_width_impl::<Disk>();
    }
}

fn return_zero_for_empty_table_impl<S: Storage>() {
    let storage = S::create(IdWidth::BigInt);

    for bucket in Bucket::ALL {
        assert_eq!(0, storage.max_id(bucket));
        assert!(!storage.contains(bucket, 1));
        assert!(storage.ids(bucket, 0).is_empty());
    }
}

fn find_saved_ids_impl<S: Storage>() {
    let mut storage = S::create(IdWidth::BigInt);

    storage.save(Allocation::new(Bucket::Viaf, 1..=3));

    assert_eq!(3, storage.max_id(Bucket::Viaf));
    assert!(storage.contains(Bucket::Viaf, 2));
    assert!(!storage.contains(Bucket::Viaf, 4));
    assert_eq!(vec![1, 2, 3], storage.ids(Bucket::Viaf, 0));
}

fn keep_tables_apart_impl<S: Storage>() {
    let mut storage = S::create(IdWidth::BigInt);

    storage.save(Allocation::new(Bucket::Bnf, 1..=2));
    storage.save(Allocation::new(Bucket::Gnd, 10..=10));

    assert_eq!(2, storage.max_id(Bucket::Bnf));
    assert_eq!(10, storage.max_id(Bucket::Gnd));
    assert_eq!(0, storage.max_id(Bucket::Mef));
    assert!(!storage.contains(Bucket::Bnf, 10));
    assert!(!storage.contains(Bucket::Gnd, 1));
}

fn order_ids_numerically_impl<S: Storage>() {
    let mut storage = S::create(IdWidth::BigInt);

    // Saved out of order
    storage.save(Allocation::new(Bucket::Rero, 256..=256));
    storage.save(Allocation::new(Bucket::Rero, 1..=1));
    storage.save(Allocation::new(Bucket::Rero, 65_536..=65_536));

    assert_eq!(65_536, storage.max_id(Bucket::Rero));
    assert_eq!(vec![1, 256, 65_536], storage.ids(Bucket::Rero, 0));
}

fn list_ids_from_lower_bound_impl<S: Storage>() {
    let mut storage = S::create(IdWidth::BigInt);

    storage.save(Allocation::new(Bucket::Mef, 1..=5));
    storage.save(Allocation::new(Bucket::Mef, 20..=21));

    assert_eq!(vec![4, 5, 20, 21], storage.ids(Bucket::Mef, 4));
    assert_eq!(vec![20, 21], storage.ids(Bucket::Mef, 6));
    assert!(storage.ids(Bucket::Mef, 22).is_empty());
}

fn report_width_impl<S: Storage>() {
    let mut storage = S::create(IdWidth::Int);

    storage.save(Allocation::new(Bucket::Viaf, 1..=1));

    assert_eq!(IdWidth::Int, storage.width());
    assert_eq!(1, storage.max_id(Bucket::Viaf));
}
