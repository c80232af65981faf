#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check
// chain-level invariants that the public API does not expose.

use crate::hash_table::HashTable;
use crate::value::Value;
use proptest::prelude::*;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations shrink toward earlier keys and shorter runs.
#[derive(Clone, Debug)]
enum Op {
    SetInteger(usize, i64),
    SetBoolean(usize, bool),
    SetNil(usize),
    Remove(usize),
    Get(usize),
    Contains(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i64>()).prop_map(|(i, v)| Op::SetInteger(i, v)),
            (idx.clone(), any::<bool>()).prop_map(|(i, b)| Op::SetBoolean(i, b)),
            idx.clone().prop_map(Op::SetNil),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::Get),
            prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(Op::Contains),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drives the table and a std HashMap model through the same operations.
// After each step: new-key flags and removal results agree with the model,
// count matches, capacity never shrinks, and the chain invariants hold.
fn run_against_model<S: BuildHasher>(
    mut sut: HashTable<S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, Value> = HashMap::new();
    let mut last_capacity = sut.capacity();

    for op in ops {
        match op {
            Op::SetInteger(i, v) => {
                let k = &pool[i];
                let fresh = sut.set_integer(k, v);
                prop_assert_eq!(fresh, model.insert(k.clone(), Value::integer(v)).is_none());
            }
            Op::SetBoolean(i, b) => {
                let k = &pool[i];
                let fresh = sut.set_boolean(k, b);
                prop_assert_eq!(fresh, model.insert(k.clone(), Value::boolean(b)).is_none());
            }
            Op::SetNil(i) => {
                let k = &pool[i];
                let fresh = sut.set_nil(k);
                prop_assert_eq!(fresh, model.insert(k.clone(), Value::nil()).is_none());
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k).is_some());
                prop_assert!(!sut.contains(k));
            }
            Op::Get(i) => {
                let k = &pool[i];
                let expected = model.get(k).copied().unwrap_or(Value::Nil);
                prop_assert_eq!(sut.get(k), expected);
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
            }
        }

        prop_assert_eq!(sut.count(), model.len());
        prop_assert!(sut.capacity() >= last_capacity);
        last_capacity = sut.capacity();
        sut.assert_invariants();
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_against_model(HashTable::new(), &pool, ops)?;
    }
}

// Constant hasher: every key shares bucket 0, so each operation walks a
// single long chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_against_model(HashTable::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}
