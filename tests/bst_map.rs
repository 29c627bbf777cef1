use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use linked_bst::{BstMap, bst_map};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Generates keys in a range small enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    RemoveEntry(i64),
    Get(i64),
    GetMut(i64, i64),
    ContainsKey(i64),
    GetKeyValue(i64),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => key_strategy().prop_map(MapOp::Remove),
        1 => key_strategy().prop_map(MapOp::RemoveEntry),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::GetMut(k, v)),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::GetKeyValue),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both BstMap and BTreeMap and asserts
    /// identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut bst_map: BstMap<i64, i64> = BstMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(bst_map.insert(*k, *v), bt_map.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(bst_map.remove(k), bt_map.remove(k), "remove({})", k);
                }
                MapOp::RemoveEntry(k) => {
                    prop_assert_eq!(bst_map.remove_entry(k), bt_map.remove_entry(k), "remove_entry({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(bst_map.get(k), bt_map.get(k), "get({})", k);
                }
                MapOp::GetMut(k, v) => {
                    if let Some(slot) = bst_map.get_mut(k) {
                        *slot = *v;
                    }
                    if let Some(slot) = bt_map.get_mut(k) {
                        *slot = *v;
                    }
                    prop_assert_eq!(bst_map.get(k), bt_map.get(k), "get_mut({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(bst_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::GetKeyValue(k) => {
                    prop_assert_eq!(bst_map.get_key_value(k), bt_map.get_key_value(k), "get_key_value({})", k);
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(bst_map.first_key_value(), bt_map.first_key_value(), "first_key_value");
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(bst_map.last_key_value(), bt_map.last_key_value(), "last_key_value");
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(bst_map.pop_first(), bt_map.pop_first(), "pop_first");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(bst_map.pop_last(), bt_map.pop_last(), "pop_last");
                }
            }
            prop_assert_eq!(bst_map.len(), bt_map.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(bst_map.is_empty(), bt_map.is_empty(), "is_empty mismatch after {:?}", op);
        }
    }

    /// Tests that iteration order matches BTreeMap after random insertions.
    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let bst_map: BstMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        // Forward iteration
        let bst_items: Vec<_> = bst_map.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&bst_items, &bt_items, "iter() mismatch");

        // Reverse iteration
        let bst_rev: Vec<_> = bst_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        let bt_rev: Vec<_> = bt_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&bst_rev, &bt_rev, "iter().rev() mismatch");

        // Keys
        let bst_keys: Vec<_> = bst_map.keys().copied().collect();
        let bt_keys: Vec<_> = bt_map.keys().copied().collect();
        prop_assert_eq!(&bst_keys, &bt_keys, "keys() mismatch");

        // Values
        let bst_values: Vec<_> = bst_map.values().rev().copied().collect();
        let bt_values: Vec<_> = bt_map.values().rev().copied().collect();
        prop_assert_eq!(&bst_values, &bt_values, "values().rev() mismatch");

        // Owning iterators
        prop_assert_eq!(bst_map.clone().into_keys().collect::<Vec<_>>(), bt_map.clone().into_keys().collect::<Vec<_>>());
        prop_assert_eq!(bst_map.clone().into_values().collect::<Vec<_>>(), bt_map.clone().into_values().collect::<Vec<_>>());
        prop_assert_eq!(bst_map.into_iter().collect::<Vec<_>>(), bt_map.into_iter().collect::<Vec<_>>());
    }

    /// Tests retain matches BTreeMap, including updates made by the predicate.
    #[test]
    fn retain_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut bst_map: BstMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        let keep = |k: &i64, v: &mut i64| {
            *v = v.wrapping_add(*k);
            k % 3 != 0
        };
        bst_map.retain(keep);
        bt_map.retain(keep);

        let bst_items: Vec<_> = bst_map.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(bst_items, bt_items);
    }

    /// A clone is independent of its source.
    #[test]
    fn clone_is_independent(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..500),
        target in proptest::collection::vec((key_strategy(), value_strategy()), 0..500),
    ) {
        let source: BstMap<i64, i64> = entries.iter().copied().collect();
        let expected: BTreeMap<i64, i64> = entries.iter().copied().collect();

        let mut copy: BstMap<i64, i64> = target.iter().copied().collect();
        copy.clone_from(&source);
        prop_assert_eq!(&copy, &source);

        copy.pop_first();
        copy.insert(i64::MAX, 0);
        let source_items: Vec<_> = source.iter().map(|(&k, &v)| (k, v)).collect();
        let expected_items: Vec<_> = expected.into_iter().collect();
        prop_assert_eq!(source_items, expected_items);
    }
}

// ─── Edge cases ──────────────────────────────────────────────────────────────

#[test]
fn later_duplicate_keys_overwrite() {
    let map = BstMap::from([(1, "a"), (2, "b"), (1, "c")]);
    assert_eq!(map.len(), 2);
    assert_eq!(map[&1], "c");
}

#[test]
fn sorted_keys_build_a_chain() {
    let mut map = BstMap::new();
    for k in 0..5_000u32 {
        assert_eq!(map.insert(k, k * 2), None);
    }
    assert_eq!(map.last_key_value(), Some((&4_999, &9_998)));
    assert_eq!(map.clone().into_values().rev().next(), Some(9_998));
    map.clear();
    assert!(map.is_empty());
}

#[test]
fn swap_exchanges_contents() {
    let mut a = BstMap::from([(1, 'a')]);
    let mut b = BstMap::from([(2, 'b'), (3, 'c')]);
    a.swap(&mut b);
    assert_eq!(a.keys().copied().collect::<Vec<_>>(), [2, 3]);
    assert_eq!(b.values().copied().collect::<Vec<_>>(), ['a']);
}

#[test]
fn extend_from_references() {
    let mut map: BstMap<i32, i32> = BstMap::with_capacity(4);
    map.extend([(&1, &10), (&2, &20)]);
    assert!(map.capacity() >= 4);
    assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &10), (&2, &20)]);
}

#[test]
fn default_iterators_are_empty() {
    let map: BstMap<u8, u8> = BstMap::default();
    assert_eq!(map.iter().len(), 0);
    assert_eq!(format!("{map:?}"), "{}");

    let iter: bst_map::IntoIter<u8, u8> = Default::default();
    assert_eq!(iter.len(), 0);
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let map = BstMap::from([(3, "c".to_string()), (1, "a".to_string())]);
    let bytes = bincode::serialize(&map).unwrap();
    let back: BstMap<i32, String> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, map);
}
