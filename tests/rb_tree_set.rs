use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use llrb_tree::rb_tree_set;
use llrb_tree::{Error, RBTreeSet, Rank};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    Take(i64),
    First,
    Last,
    PopFirst,
    PopLast,
    Rank(i64),
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => value_strategy().prop_map(SetOp::Take),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        1 => Just(SetOp::PopFirst),
        1 => Just(SetOp::PopLast),
        1 => value_strategy().prop_map(SetOp::Rank),
    ]
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i64> = RBTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => prop_assert_eq!(rb_set.insert(*v), bt_set.insert(*v), "insert({})", v),
                SetOp::Remove(v) => prop_assert_eq!(rb_set.remove(v), bt_set.remove(v), "remove({})", v),
                SetOp::Contains(v) => prop_assert_eq!(rb_set.contains(v), bt_set.contains(v), "contains({})", v),
                SetOp::Take(v) => prop_assert_eq!(rb_set.take(v), bt_set.take(v), "take({})", v),
                SetOp::First => prop_assert_eq!(rb_set.first(), bt_set.first()),
                SetOp::Last => prop_assert_eq!(rb_set.last(), bt_set.last()),
                SetOp::PopFirst => prop_assert_eq!(rb_set.pop_first(), bt_set.pop_first()),
                SetOp::PopLast => prop_assert_eq!(rb_set.pop_last(), bt_set.pop_last()),
                SetOp::Rank(v) => prop_assert_eq!(rb_set.rank(v), bt_set.range(..v).count(), "rank({})", v),
            }
            prop_assert_eq!(rb_set.len(), bt_set.len(), "len mismatch after {:?}", op);
            prop_assert!(rb_set.check_invariants().is_ok(), "invariant violated after {:?}", op);
        }
    }

    #[test]
    fn iter_and_range_match_btreeset(
        values in proptest::collection::vec(value_strategy(), TEST_SIZE),
        lo in value_strategy(),
        hi in value_strategy(),
    ) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

        prop_assert!(rb_set.iter().eq(bt_set.iter()));
        prop_assert!(rb_set.iter().rev().eq(bt_set.iter().rev()));
        prop_assert!(rb_set.range(lo..=hi).eq(bt_set.range(lo..=hi)));
        prop_assert!(rb_set.range(lo..hi).rev().eq(bt_set.range(lo..hi).rev()));
        prop_assert!(rb_set.clone().into_iter().eq(bt_set.clone()));
    }

    #[test]
    fn retain_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let mut bt_set: BTreeSet<i64> = values.iter().copied().collect();

        rb_set.retain(|v| v % 3 != 0);
        bt_set.retain(|v| v % 3 != 0);

        prop_assert!(rb_set.iter().eq(bt_set.iter()));
        prop_assert!(rb_set.check_invariants().is_ok());
    }

    #[test]
    fn select_matches_sorted_vec(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let sorted: Vec<i64> = values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

        for (i, v) in sorted.iter().enumerate() {
            prop_assert_eq!(rb_set.select(i), Ok(v));
            prop_assert_eq!(&rb_set[Rank(i)], v);
            prop_assert_eq!(rb_set.rank_of(v), Some(i));
        }
        prop_assert_eq!(
            rb_set.select(sorted.len()),
            Err(Error::RankOutOfRange { rank: sorted.len(), len: sorted.len() })
        );
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn floor_and_ceiling_outside_range() {
    let set = RBTreeSet::from([10, 20, 30]);
    assert_eq!(set.floor(&5), None);
    assert_eq!(set.ceiling(&35), None);
    assert_eq!(set.floor(&25), Some(&20));
    assert_eq!(set.ceiling(&25), Some(&30));
    assert_eq!(set.min_element(), Ok(&10));
    assert_eq!(set.max_element(), Ok(&30));
}

#[test]
fn min_and_max_elements() {
    let mut set: RBTreeSet<i32> = RBTreeSet::new();
    assert_eq!(set.min_element(), Err(Error::Empty));
    assert_eq!(set.max_element(), Err(Error::Empty));

    set.extend([4, -2, 7]);
    assert_eq!(set.min_element(), Ok(&-2));
    assert_eq!(set.max_element(), Ok(&7));

    // `Ord::min` on sets still compares lexicographically.
    let other = RBTreeSet::from([-3]);
    assert_eq!(set.clone().min(other.clone()), other);
}

#[test]
fn delete_until_empty() {
    let mut set: RBTreeSet<u16> = (0..100).collect();
    let mut drained = Vec::new();
    while let Ok(v) = set.delete_min() {
        drained.push(v);
        set.check_invariants().unwrap();
    }
    assert_eq!(drained, (0..100).collect::<Vec<_>>());
    assert_eq!(set.delete_max(), Err(Error::Empty));
}

#[test]
fn append_moves_everything() {
    let mut a = RBTreeSet::from([1, 3, 5]);
    let mut b = RBTreeSet::from([2, 3, 4]);
    a.append(&mut b);
    assert!(b.is_empty());
    assert_eq!(a.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    a.check_invariants().unwrap();
}

#[test]
fn equal_sets_compare_equal() {
    let a: RBTreeSet<i32> = [3, 1, 2].into_iter().collect();
    let b: RBTreeSet<i32> = [1, 2, 3].into();
    assert_eq!(a, b);
    assert!(RBTreeSet::from([1, 2]) < RBTreeSet::from([1, 3]));
}

#[test]
fn default_iterators_are_empty() {
    let iter: rb_tree_set::Iter<'_, i32> = Default::default();
    assert_eq!(iter.len(), 0);
    let iter: rb_tree_set::IntoIter<i32> = Default::default();
    assert_eq!(iter.len(), 0);
}
