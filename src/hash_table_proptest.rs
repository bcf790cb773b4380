// Property tests for HashTable kept inside the crate so they can check
// bucket placement through `assert_consistent`.

use crate::hash_table::HashTable;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, u8),
    Get(usize),
    Remove(usize),
    ContainsKey(String),
    ContainsValue(u8),
    // Resize to 1 << shift buckets.
    Resize(u32),
    Render,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        // Few distinct values so contains_value sees both hits and misses.
        let value = 0u8..6;
        let op = prop_oneof![
            4 => (idx.clone(), value.clone()).prop_map(|(i, v)| Op::Put(i, v)),
            2 => idx.clone().prop_map(Op::Get),
            2 => idx.clone().prop_map(Op::Remove),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(Op::ContainsKey),
            1 => value.prop_map(Op::ContainsValue),
            1 => (0u32..7).prop_map(Op::Resize),
            1 => Just(Op::Render),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_against_model<S>(
    mut sut: HashTable<String, u8, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<String, u8> = HashMap::new();
    for op in ops {
        match op {
            Op::Put(i, v) => {
                let k = pool[i].clone();
                prop_assert_eq!(sut.put(k.clone(), v), model.insert(k, v));
            }
            Op::Get(i) => {
                prop_assert_eq!(sut.get(&pool[i]), model.get(&pool[i]));
            }
            Op::Remove(i) => {
                prop_assert_eq!(sut.remove(pool[i].as_str()), model.remove(&pool[i]));
                prop_assert!(!sut.contains_key(pool[i].as_str()));
            }
            Op::ContainsKey(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            Op::ContainsValue(v) => {
                let has_model = model.values().any(|mv| *mv == v);
                prop_assert_eq!(sut.contains_value(&v), has_model);
            }
            Op::Resize(shift) => {
                let before: Vec<(String, u8)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                sut.resize_table(1 << shift).expect("power of two");
                prop_assert_eq!(sut.capacity(), 1usize << shift);
                for (k, v) in before {
                    prop_assert_eq!(sut.get(&k), Some(&v));
                }
            }
            Op::Render => {
                let out = sut.render();
                prop_assert_eq!(out.lines().count(), sut.capacity());
                let pairs: usize = out.lines().map(|l| l.matches('=').count()).sum();
                prop_assert_eq!(pairs, sut.len());
            }
            Op::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().map(|(k, _)| k.clone()).collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        sut.assert_consistent();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` returns the replaced value exactly when the key was present.
// - `get`/`contains_key` agree with the model, `remove` returns the model's value.
// - `contains_value` agrees with a scan of the model's values.
// - `resize_table` keeps every mapping and re-places every entry.
// - `render` has one line per bucket and one `k=v` pair per entry.
// - `len`/`is_empty` parity with the model after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_against_model(HashTable::new(), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
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

// Property: Same invariants under worst-case collisions: every key lives in
// bucket 0's chain at every capacity, so lookup, overwrite and removal all
// resolve through `Eq` on a single chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_against_model(HashTable::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}

// Property: inserting distinct keys yields `len` == number of keys, and a
// resize to any power of two preserves every mapping.
proptest! {
    #[test]
    fn prop_distinct_keys_survive_resize(
        keys in proptest::collection::btree_set(any::<u32>(), 0..200),
        shift in 0u32..10,
    ) {
        let mut t: HashTable<u32, u64> = HashTable::new();
        for &k in &keys {
            prop_assert!(t.put(k, u64::from(k) * 3).is_none());
        }
        prop_assert_eq!(t.len(), keys.len());

        t.resize_table(1 << shift).expect("power of two");
        t.assert_consistent();
        prop_assert_eq!(t.len(), keys.len());
        for &k in &keys {
            prop_assert_eq!(t.get(&k), Some(&(u64::from(k) * 3)));
        }
    }
}
