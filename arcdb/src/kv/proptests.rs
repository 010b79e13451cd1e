//! Property-based tests for the key-value stores.

use std::collections::HashMap;

use proptest::prelude::*;
use tempfile::tempdir;

use super::{KvStore, MemoryStore, SqliteStore};

#[derive(Debug, Clone)]
enum Op {
    Set(String, Vec<u8>),
    Delete(String),
}

fn key_strategy() -> impl Strategy<Value = String> {
    // Small alphabet so operations collide on the same keys
    "[a-c]{1,3}(:[a-c]{1,2})?"
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (key_strategy(), prop::collection::vec(any::<u8>(), 0..64))
            .prop_map(|(k, v)| Op::Set(k, v)),
        1 => key_strategy().prop_map(Op::Delete),
    ]
}

fn check_against_model(store: &dyn KvStore, ops: &[Op]) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, Vec<u8>> = HashMap::new();

    for op in ops {
        match op {
            Op::Set(key, value) => {
                store.set(key, value).unwrap();
                model.insert(key.clone(), value.clone());
            }
            Op::Delete(key) => {
                store.delete(key).unwrap();
                model.remove(key);
            }
        }
    }

    for op in ops {
        let key = match op {
            Op::Set(key, _) | Op::Delete(key) => key,
        };
        match model.get(key) {
            Some(expected) => prop_assert_eq!(&store.get(key).unwrap(), expected),
            None => prop_assert!(store.get(key).unwrap_err().is_not_found()),
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        .. ProptestConfig::default()
    })]

    // Arbitrary keys and bytes come back unchanged
    #[test]
    fn memory_round_trips_any_value(key in ".{0,40}", value in prop::collection::vec(any::<u8>(), 0..512)) {
        let store = MemoryStore::new();
        store.set(&key, &value).unwrap();
        prop_assert_eq!(store.get(&key).unwrap(), value);
    }

    // The last write to a key wins, and deletes always stick
    #[test]
    fn memory_matches_model(ops in prop::collection::vec(op_strategy(), 1..40)) {
        check_against_model(&MemoryStore::new(), &ops)?;
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    #[test]
    fn sqlite_round_trips_any_value(key in ".{0,40}", value in prop::collection::vec(any::<u8>(), 0..512)) {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("kv.db")).unwrap();
        store.set(&key, &value).unwrap();
        prop_assert_eq!(store.get(&key).unwrap(), value);
    }

    #[test]
    fn sqlite_matches_model(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("kv.db")).unwrap();
        check_against_model(&store, &ops)?;
    }
}
