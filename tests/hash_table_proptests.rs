// HashTable property tests (public API).
//
// Property 1: round-trip against a model.
//  - Model: std HashMap<String, Value>.
//  - Invariant: get(k) equals the last value stored under k (Nil if none),
//    insert/remove flags match the model, count() == model.len().
//
// Property 2: growth.
//  - Invariant: an insert issued when count/capacity >= 0.5 leaves
//    capacity exactly doubled; any other insert leaves it unchanged.
//  - Every key present before a growth step reads back unchanged after it.
use chained_hashtable::{HashTable, Value, MAX_LOAD_FACTOR};
use proptest::prelude::*;
use std::collections::HashMap;

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::boolean),
        any::<i64>().prop_map(Value::integer),
        (-1.0e9f64..1.0e9).prop_map(Value::real),
    ]
}

proptest! {
    #[test]
    fn prop_round_trip(ops in proptest::collection::vec(("[a-f]{1,3}", arb_value(), any::<bool>()), 1..200)) {
        let mut m = HashTable::new();
        let mut model: HashMap<String, Value> = HashMap::new();

        for (key, value, is_remove) in ops {
            if is_remove {
                prop_assert_eq!(m.remove(&key), model.remove(&key).is_some());
            } else {
                let fresh = m.insert(&key, value);
                prop_assert_eq!(fresh, model.insert(key.clone(), value).is_none());
            }
            prop_assert_eq!(m.count(), model.len());
        }

        for (k, v) in &model {
            prop_assert_eq!(m.get(k), *v);
            prop_assert!(m.contains(k));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_doubles_and_preserves(keys in proptest::collection::vec("[a-z0-9]{1,6}", 1..150)) {
        let mut m = HashTable::new();
        let mut model: HashMap<String, i64> = HashMap::new();

        for (i, key) in keys.into_iter().enumerate() {
            let before = m.capacity();
            let should_grow = m.count() as f64 / before as f64 >= MAX_LOAD_FACTOR;

            m.set_integer(&key, i as i64);
            model.insert(key, i as i64);

            let after = m.capacity();
            if should_grow {
                prop_assert_eq!(after, before * 2);
                for (k, v) in &model {
                    prop_assert_eq!(m.get(k), Value::integer(*v));
                }
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }
}
