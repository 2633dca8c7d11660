//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check expiry and refresh behavior across generated inputs.

use anyhow::anyhow;
use proptest::prelude::*;
use serde_json::{json, Value};

use crate::cache::{CacheStore, ManualClock, MemoryStorage, StorageBackend, DEFAULT_TTL_MS};

// == Test Configuration ==
const REFERENCE_NOW: i64 = 1_700_000_000_000;

fn test_store() -> (CacheStore<MemoryStorage, ManualClock>, ManualClock) {
    let clock = ManualClock::new(REFERENCE_NOW);
    let store = CacheStore::with_clock(MemoryStorage::new(), clock.clone(), DEFAULT_TTL_MS);
    (store, clock)
}

// == Strategies ==
/// Generates valid cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

/// Generates arbitrary JSON payloads up to a small depth
fn payload_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,16}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::hash_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Entries younger than their TTL are valid.
    #[test]
    fn prop_valid_before_ttl(
        elapsed in 0..DEFAULT_TTL_MS as i64,
        data in payload_strategy()
    ) {
        let (store, clock) = test_store();
        store.storage()
            .set_item("k", json!({"data": data.clone(), "timestamp": REFERENCE_NOW - elapsed, "ttl": DEFAULT_TTL_MS}))
            .unwrap();
        clock.set(REFERENCE_NOW);

        prop_assert!(store.is_valid("k"));
        prop_assert_eq!(store.get::<Value>("k"), Some(data));
    }

    // Entries at or past their TTL are invalid.
    #[test]
    fn prop_invalid_at_or_after_ttl(
        elapsed in DEFAULT_TTL_MS as i64..(DEFAULT_TTL_MS as i64 * 10),
        data in payload_strategy()
    ) {
        let (store, _) = test_store();
        store.storage()
            .set_item("k", json!({"data": data, "timestamp": REFERENCE_NOW - elapsed, "ttl": DEFAULT_TTL_MS}))
            .unwrap();

        prop_assert!(!store.is_valid("k"));
        prop_assert!(store.get::<Value>("k").is_none());
    }

    // Validity flips exactly at the TTL for any TTL.
    #[test]
    fn prop_boundary_for_any_ttl(ttl in 1i64..10_000_000, key in key_strategy()) {
        let (store, clock) = test_store();
        store.set_with_ttl(&key, &true, ttl).unwrap();

        clock.set(REFERENCE_NOW + ttl - 1);
        prop_assert!(store.is_valid(&key));

        clock.set(REFERENCE_NOW + ttl);
        prop_assert!(!store.is_valid(&key));
    }

    // Negative TTLs never produce a valid entry.
    #[test]
    fn prop_negative_ttl_never_valid(ttl in i64::MIN..0, key in key_strategy()) {
        let (store, _) = test_store();
        store.set_with_ttl(&key, "x", ttl).unwrap();

        prop_assert!(!store.is_valid(&key));
    }

    // Last write wins.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        first in payload_strategy(),
        second in payload_strategy()
    ) {
        let (store, _) = test_store();
        store.set(&key, &first).unwrap();
        store.set(&key, &second).unwrap();

        prop_assert_eq!(store.get::<Value>(&key), Some(second));
        prop_assert_eq!(store.storage().len(), 1);
    }

    // A successful refresh replaces stale data with fresh, valid data.
    #[test]
    fn prop_force_refresh_success(
        key in key_strategy(),
        old in payload_strategy(),
        new in payload_strategy(),
        age in 0..(DEFAULT_TTL_MS as i64 * 3)
    ) {
        let (store, clock) = test_store();
        store.set(&key, &old).unwrap();
        clock.advance(age);

        let fetched = new.clone();
        let returned = tokio_test::block_on(store.force_refresh(&key, || async move { Ok(fetched) }))
            .unwrap();

        prop_assert_eq!(&returned, &new);
        prop_assert_eq!(store.get::<Value>(&key), Some(new));
        prop_assert!(store.is_valid(&key));
    }

    // A failed refresh leaves the stored envelope exactly as it was.
    #[test]
    fn prop_force_refresh_failure_untouched(
        key in key_strategy(),
        old in payload_strategy(),
        age in 0..(DEFAULT_TTL_MS as i64 * 3)
    ) {
        let (store, clock) = test_store();
        store.set(&key, &old).unwrap();
        let before = store.storage().get_item(&key);
        clock.advance(age);

        let result = tokio_test::block_on(
            store.force_refresh(&key, || async { Err::<Value, _>(anyhow!("network down")) }),
        );

        prop_assert!(result.is_err());
        prop_assert_eq!(store.storage().get_item(&key), before);
    }
}
