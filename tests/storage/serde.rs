use quickcheck::*;
use quickcheck_macros::quickcheck;

use authseq::schema::*;
use authseq::sequence::generator::SequenceGenerator;
use authseq::storage::memory::InMemoryStorage;
use authseq::storage::serde;

#[quickcheck]
fn row_keys_sort_like_ids(a: u64, b: u64) -> bool {
    a.cmp(&b) == serde::row::key(a).cmp(&serde::row::key(b))
}

#[quickcheck]
fn reject_keys_of_wrong_length(bytes: Vec<u8>) -> TestResult {
    if bytes.len() == 8 {
        return TestResult::discard();
    }
    TestResult::from_bool(serde::row::id(&bytes).is_err())
}

/// Requests against a single bucket: either the next id or an explicit import.
#[derive(Debug, Clone)]
enum Request {
    Next,
    Insert(u64),
}

impl Arbitrary for Request {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Request::Next
        } else {
            // Keep explicit ids small so they collide with allocated ones
            Request::Insert(u64::arbitrary(g) % 64)
        }
    }
}

#[quickcheck]
fn next_always_exceeds_every_stored_id(requests: Vec<Request>) -> bool {
    let generator = SequenceGenerator::new(InMemoryStorage::new());
    let mut stored: Vec<u64> = Vec::new();
    for request in requests {
        match request {
            Request::Next => {
                let id = generator.next(Bucket::Viaf).unwrap();
                if stored.iter().any(|other| *other >= id) {
                    return false;
                }
                stored.push(id);
            }
            Request::Insert(id) => {
                let accepted = generator.insert(Bucket::Viaf, id).is_ok();
                let expected = id != 0 && !stored.contains(&id);
                if accepted != expected {
                    return false;
                }
                if accepted {
                    stored.push(id);
                }
            }
        }
    }
    stored.sort_unstable();
    generator.ids(Bucket::Viaf, 0).unwrap() == stored
}
