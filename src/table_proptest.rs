#![cfg(test)]

// Property tests for Table kept inside the crate so they can inspect the
// bucket chains directly.

use crate::hash::KeyHash;
use crate::table::Table;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations: indices shrink toward earlier keys and the pool
// itself shrinks, which keeps failing cases small.
#[derive(Clone, Debug)]
enum Op {
    Add(usize, u32),
    Contains(usize),
    Get(usize),
    Probe(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<u32>()).prop_map(|(i, v)| Op::Add(i, v)),
            1 => idx.clone().prop_map(Op::Contains),
            1 => idx.clone().prop_map(Op::Get),
            1 => "[a-z]{0,5}".prop_map(Op::Probe),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_against_model<H: KeyHash>(
    sut: Table<H>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, u32> = HashMap::new();

    for op in ops {
        match op {
            Op::Add(i, v) => {
                sut.add_entry(&pool[i], v);
                model.insert(pool[i].clone(), v);
            }
            Op::Contains(i) => {
                prop_assert_eq!(sut.contains(&pool[i]), model.contains_key(&pool[i]));
            }
            Op::Get(i) => {
                prop_assert_eq!(sut.get(&pool[i]), model.get(&pool[i]).copied());
                if let Some(&v) = model.get(&pool[i]) {
                    prop_assert_eq!(sut.get_value(&pool[i]), v);
                }
            }
            Op::Probe(k) => {
                prop_assert_eq!(sut.get(&k), model.get(&k).copied());
                prop_assert_eq!(sut.try_get_value(&k).ok(), model.get(&k).copied());
            }
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }

    // Every key sits exactly once, in its own bucket.
    let placements = sut.placements();
    prop_assert_eq!(placements.len(), model.len());
    for (idx, key) in placements {
        prop_assert!(model.contains_key(&key));
        prop_assert_eq!(sut.bucket_for(&key), idx);
    }
    Ok(())
}

// Property: sequential `add_entry` calls behave like a map with
// last-writer-wins updates.
// Invariants exercised:
// - At most one entry per key; `len` counts distinct keys.
// - `contains`/`get`/`get_value`/`try_get_value` agree with the model.
// - Every stored key is found by scanning only its resolved bucket.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_sequential_model((pool, ops) in arb_scenario(), capacity in 1usize..=16) {
        run_against_model(Table::with_capacity(capacity), &pool, ops)?;
    }

    #[test]
    fn prop_sequential_model_all_colliding((pool, ops) in arb_scenario(), capacity in 1usize..=16) {
        run_against_model(Table::with_capacity_and_hasher(capacity, |_: &str| 3u32), &pool, ops)?;
    }
}
