use pretty_assertions::assert_eq;
use proptest::prelude::*;
use simplelog::{Config, LevelFilter, TestLogger};

use linked_bst::{Bst, Error, Position};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Routes the tree's `trace!`/`debug!` records into the test output.
fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Generates values in a narrow range so duplicates are common.
fn value_strategy() -> impl Strategy<Value = i32> {
    -200i32..200i32
}

/// Values reached by stepping forward from `begin()` until `end()`.
fn walk<T: Copy>(tree: &Bst<T>) -> Vec<T> {
    let mut values = Vec::new();
    let mut cursor = tree.cursor_front();
    while let Some(value) = cursor.get() {
        values.push(*value);
        cursor.move_next();
    }
    values
}

/// Values reached by stepping backward from the last element.
fn walk_back<T: Copy>(tree: &Bst<T>) -> Vec<T> {
    let mut values = Vec::new();
    let mut cursor = tree.cursor_back();
    while let Some(value) = cursor.get() {
        values.push(*value);
        cursor.move_prev();
    }
    values.reverse();
    values
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i32),
    InsertUnique(i32),
    EraseFound(i32),
    EraseValue(i32),
    Find(i32),
    PopFirst,
    PopLast,
    CloneTree,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        4 => value_strategy().prop_map(TreeOp::Insert),
        3 => value_strategy().prop_map(TreeOp::InsertUnique),
        3 => value_strategy().prop_map(TreeOp::EraseFound),
        1 => value_strategy().prop_map(TreeOp::EraseValue),
        2 => value_strategy().prop_map(TreeOp::Find),
        1 => Just(TreeOp::PopFirst),
        1 => Just(TreeOp::PopLast),
        1 => Just(TreeOp::CloneTree),
    ]
}

/// Sorted `Vec` standing in for a multiset.
#[derive(Debug, Default)]
struct Model(Vec<i32>);

impl Model {
    fn count(&self, value: i32) -> usize {
        self.0.iter().filter(|&&v| v == value).count()
    }

    fn insert(&mut self, value: i32) {
        let index = self.0.partition_point(|&v| v <= value);
        self.0.insert(index, value);
    }

    fn remove_one(&mut self, value: i32) -> bool {
        match self.0.binary_search(&value) {
            Ok(index) => {
                self.0.remove(index);
                true
            }
            Err(_) => false,
        }
    }
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Replays random operations on a `Bst` and a sorted `Vec` and compares them after every
    /// step, walking the tree through its cursors in both directions.
    #[test]
    fn ops_match_sorted_vec(ops in proptest::collection::vec(tree_op_strategy(), 1..TEST_SIZE)) {
        let mut tree = Bst::new();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                TreeOp::Insert(v) => {
                    let (position, inserted) = tree.insert(v, false);
                    prop_assert!(inserted);
                    prop_assert_eq!(tree.get(position), Ok(&v));
                    model.insert(v);
                }
                TreeOp::InsertUnique(v) => {
                    let existed = model.count(v) > 0;
                    let before = tree.len();
                    let (position, inserted) = tree.insert(v, true);
                    prop_assert_eq!(inserted, !existed, "insert({}, true)", v);
                    prop_assert_eq!(tree.get(position), Ok(&v));
                    if inserted {
                        model.insert(v);
                    } else {
                        prop_assert_eq!(tree.len(), before);
                    }
                }
                TreeOp::EraseFound(v) => {
                    let position = tree.find(&v);
                    let removed = model.remove_one(v);
                    prop_assert_eq!(position.is_end(), !removed);
                    let next = tree.erase(position);
                    prop_assert!(next.is_ok());
                    if removed {
                        // The returned position is the in-order successor of the erased value.
                        let expected = model.0.iter().find(|&&x| x > v).copied();
                        let next = tree.get(next.unwrap()).ok().copied();
                        if model.count(v) == 0 {
                            prop_assert_eq!(next, expected);
                        }
                        prop_assert_eq!(tree.erase(position), Err(Error::InvalidIterator));
                    }
                }
                TreeOp::EraseValue(v) => {
                    let expected = model.count(v);
                    prop_assert_eq!(tree.erase_value(&v), expected);
                    model.0.retain(|&x| x != v);
                    prop_assert!(tree.find(&v).is_end());
                }
                TreeOp::Find(v) => {
                    let position = tree.find(&v);
                    prop_assert_eq!(position != tree.end(), model.count(v) > 0);
                    prop_assert_eq!(tree.contains(&v), model.count(v) > 0);
                }
                TreeOp::PopFirst => {
                    let expected = (!model.0.is_empty()).then(|| model.0.remove(0));
                    prop_assert_eq!(tree.pop_first(), expected);
                }
                TreeOp::PopLast => {
                    prop_assert_eq!(tree.pop_last(), model.0.pop());
                }
                TreeOp::CloneTree => {
                    let copy = tree.clone();
                    prop_assert_eq!(walk(&copy), walk(&tree));
                    prop_assert_eq!(&copy, &tree);
                }
            }

            prop_assert_eq!(tree.len(), model.0.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(tree.is_empty(), model.0.is_empty());
            prop_assert_eq!(tree.first(), model.0.first());
            prop_assert_eq!(tree.last(), model.0.last());
        }

        prop_assert_eq!(&walk(&tree), &model.0);
        prop_assert_eq!(&walk_back(&tree), &model.0);
        prop_assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), model.0.iter().rev().copied().collect::<Vec<_>>());
        prop_assert_eq!(tree.into_iter().collect::<Vec<_>>(), model.0);
    }

    /// Positions of untouched values survive erasing other values.
    #[test]
    fn positions_survive_unrelated_erasures(
        values in proptest::collection::vec(value_strategy(), 1..300),
        erase in proptest::collection::vec(any::<prop::sample::Index>(), 0..100),
    ) {
        let mut tree = Bst::new();
        let mut positions: Vec<(Position, i32)> = values.iter().map(|&v| (tree.insert(v, false).0, v)).collect();

        for index in erase {
            if positions.is_empty() {
                break;
            }
            let (position, _) = positions.swap_remove(index.index(positions.len()));
            prop_assert!(tree.erase(position).is_ok());
            for &(position, value) in &positions {
                prop_assert_eq!(tree.get(position), Ok(&value));
            }
        }
        prop_assert_eq!(tree.len(), positions.len());
    }

    /// `clone_from` onto any tree gives the source's sequence; changing either afterwards
    /// leaves the other alone.
    #[test]
    fn clone_from_is_independent(
        source in proptest::collection::vec(value_strategy(), 0..300),
        target in proptest::collection::vec(value_strategy(), 0..300),
        extra in value_strategy(),
    ) {
        let a: Bst<i32> = source.iter().copied().collect();
        let mut b: Bst<i32> = target.iter().copied().collect();

        b.clone_from(&a);
        prop_assert_eq!(walk(&b), walk(&a));

        b.insert(extra, false);
        b.pop_first();
        let mut expected = source.clone();
        expected.sort_unstable();
        prop_assert_eq!(walk(&a), expected);
    }

    /// Swapping twice restores both trees and never touches their node storage.
    #[test]
    fn swap_twice_restores(
        left in proptest::collection::vec(value_strategy(), 0..200),
        right in proptest::collection::vec(value_strategy(), 0..200),
    ) {
        let mut a: Bst<i32> = left.iter().copied().collect();
        let mut b: Bst<i32> = right.iter().copied().collect();
        let (before_a, before_b) = (walk(&a), walk(&b));
        let (capacity_a, capacity_b) = (a.capacity(), b.capacity());
        let first_a = a.begin();

        a.swap(&mut b);
        prop_assert_eq!(walk(&a), before_b.clone());
        prop_assert_eq!(walk(&b), before_a.clone());
        prop_assert_eq!((a.capacity(), b.capacity()), (capacity_b, capacity_a));
        prop_assert_eq!(b.get(first_a).ok(), before_a.first());

        a.swap(&mut b);
        prop_assert_eq!(walk(&a), before_a);
        prop_assert_eq!(walk(&b), before_b);
    }

    /// `erase_range` removes exactly the values between the two positions.
    #[test]
    fn erase_range_matches_slice_drain(
        values in proptest::collection::vec(value_strategy(), 0..200),
        from in any::<prop::sample::Index>(),
        len in any::<prop::sample::Index>(),
    ) {
        let mut tree: Bst<i32> = values.iter().copied().collect();
        let mut expected = walk(&tree);

        let start = if expected.is_empty() { 0 } else { from.index(expected.len() + 1) };
        let stop = start + len.index(expected.len() - start + 1);

        let mut cursor = tree.cursor_front();
        for _ in 0..start {
            cursor.move_next();
        }
        let first = cursor.position();
        for _ in start..stop {
            cursor.move_next();
        }
        let last = cursor.position();

        if start < stop {
            prop_assert_eq!(tree.erase_range(last, first), Err(Error::InvalidIterator));
        }
        prop_assert_eq!(tree.erase_range(first, last), Ok(last));
        expected.drain(start..stop);
        prop_assert_eq!(walk(&tree), expected);
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn unique_inserts_then_erase_root() {
    init_logging();

    let mut tree = Bst::new();
    for value in [5, 3, 8, 1, 4, 7, 9] {
        assert!(tree.insert(value, true).1);
    }
    assert_eq!(walk(&tree), [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.len(), 7);

    let seven = tree.find(&7);
    let next = tree.erase(tree.find(&5)).unwrap();
    assert_eq!(next, seven);
    assert_eq!(walk(&tree), [1, 3, 4, 7, 8, 9]);
    assert_eq!(tree.len(), 6);

    // 7 took the root's place between 3's subtree and 8.
    let mut cursor = tree.cursor(seven).unwrap();
    assert_eq!(cursor.peek_prev(), Some(&4));
    assert_eq!(cursor.peek_next(), Some(&8));
    cursor.move_next();
    assert_eq!(cursor.get(), Some(&8));
}

#[test]
fn empty_tree() {
    let mut tree: Bst<i32> = Bst::new();
    assert_eq!(tree.begin(), tree.end());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.erase_value(&1), 0);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.pop_last(), None);
    assert_eq!(tree.get(tree.begin()), Err(Error::OutOfRange));
    assert_eq!(tree.cursor_front().value(), Err(Error::OutOfRange));
    assert_eq!(tree.iter().len(), 0);
}

#[test]
fn duplicates_are_kept_unless_unique() {
    let mut tree = Bst::new();
    assert!(tree.insert(2, false).1);
    assert!(tree.insert(2, false).1);
    assert!(!tree.insert(2, true).1);
    assert_eq!(tree.len(), 2);
    assert_eq!(walk(&tree), [2, 2]);

    assert!(tree.erase(tree.find(&2)).is_ok());
    assert!(!tree.find(&2).is_end());
    assert!(tree.erase(tree.find(&2)).is_ok());
    assert!(tree.find(&2).is_end());
}

#[test]
fn equal_values_keep_insertion_order() {
    #[derive(Clone, Copy, Debug)]
    struct Entry(u8, char);

    impl PartialEq for Entry {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }
    impl Eq for Entry {}
    impl PartialOrd for Entry {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Entry {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.cmp(&other.0)
        }
    }

    let tree = Bst::from([Entry(1, 'a'), Entry(0, 'x'), Entry(1, 'b'), Entry(1, 'c')]);
    let tags: String = tree.iter().map(|entry| entry.1).collect();
    assert_eq!(tags, "xabc");
}

#[test]
fn stale_and_foreign_positions_are_rejected() {
    let mut a = Bst::from([1, 2, 3]);
    let b = Bst::from([1, 2, 3]);

    let two = a.find(&2);
    assert!(a.erase(two).is_ok());
    assert_eq!(a.erase(two), Err(Error::InvalidIterator));
    assert_eq!(a.get(two), Err(Error::InvalidIterator));

    // A recycled slot does not revive the old position.
    a.insert(2, false);
    assert_eq!(a.get(two), Err(Error::InvalidIterator));

    assert_eq!(a.erase(b.find(&1)), Err(Error::InvalidIterator));
    assert_eq!(a.erase_range(b.begin(), a.end()), Err(Error::InvalidIterator));
    assert_eq!(a.len(), 3);
}

#[test]
fn cursor_round_trips_through_end() {
    let tree = Bst::from([3, 1, 2]);
    let mut cursor = tree.cursor(tree.end()).unwrap();

    cursor.move_next();
    assert_eq!(cursor.get(), Some(&1));
    cursor.move_prev();
    assert!(cursor.is_end());
    cursor.move_prev();
    assert_eq!(cursor.get(), Some(&3));
    assert_eq!(cursor.position(), tree.find(&3));
}

#[test]
fn assign_replaces_contents() {
    let mut tree = Bst::from([10, 20]);
    let old = tree.find(&10);
    tree.assign([3, 1, 3]);
    assert_eq!(walk(&tree), [1, 3, 3]);
    assert_eq!(tree.get(old), Err(Error::InvalidIterator));
}

#[test]
fn sorted_inserts_build_a_deep_chain() {
    const DEPTH: i32 = 20_000;

    let mut tree = Bst::new();
    for value in 0..DEPTH {
        tree.insert(value, true);
    }
    assert_eq!(tree.last(), Some(&(DEPTH - 1)));

    let copy = tree.clone();
    assert!(copy.iter().copied().eq(0..DEPTH));

    let mut target = Bst::from([5, 1, 9]);
    target.clone_from(&copy);
    assert_eq!(target.len(), copy.len());

    tree.clear();
    assert!(tree.is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let tree = Bst::from([4, 1, 4, 2]);
    let bytes = bincode::serialize(&tree).unwrap();
    let back: Bst<i32> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, tree);
    assert_eq!(walk(&back), [1, 2, 4, 4]);
}
