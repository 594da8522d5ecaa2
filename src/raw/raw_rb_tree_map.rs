use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::ops::{Bound, RangeBounds};

use super::node::{
    Color, Link, Node, Side, balance, is_red, move_red_left, move_red_right, needs_red_left, needs_red_right,
    rotate_right, size,
};
use crate::error::InvariantViolation;
use crate::probe::Probe;
use crate::tree_shape::TreeShape;

/// The core left-leaning red-black tree backing `RBTreeMap`.
///
/// Every mutation takes ownership of a subtree, recurses, and hands back the
/// new subtree root for the caller to re-link. There are no parent pointers;
/// the call stack is the path.
#[derive(Clone)]
pub(crate) struct RawRBTreeMap<K, V> {
    /// The root of the tree, if non-empty. Its color is black between calls.
    root: Link<K, V>,
}

impl<K, V> RawRBTreeMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None }
    }

    /// Returns the number of key-value pairs in the tree.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        size(&self.root)
    }

    /// Returns true if the tree contains no elements.
    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        let len = self.len();
        self.root = None;
        tracing::trace!(len, "cleared tree");
    }

    /// Returns the root node, if any.
    #[inline]
    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Gives up ownership of the whole tree.
    #[inline]
    pub(crate) fn into_root(self) -> Link<K, V> {
        self.root
    }

    /// Returns the root node mutably, if any.
    #[inline]
    pub(crate) fn root_mut(&mut self) -> Option<&mut Node<K, V>> {
        self.root.as_deref_mut()
    }

    /// Returns the leftmost entry.
    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the rightmost entry.
    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Gets an element by its rank (0-indexed position in sorted order).
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        if rank >= self.len() {
            return None;
        }

        let mut remaining = rank;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left = size(&node.left);
            match remaining.cmp(&left) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Greater => {
                    remaining -= left + 1;
                    current = node.right.as_deref();
                }
            }
        }

        None
    }

    /// Gets a mutable element by its rank.
    pub(crate) fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        if rank >= self.len() {
            return None;
        }

        let mut remaining = rank;
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            let left = size(&node.left);
            match remaining.cmp(&left) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Equal => return Some((&node.key, &mut node.value)),
                Ordering::Greater => {
                    remaining -= left + 1;
                    current = node.right.as_deref_mut();
                }
            }
        }

        None
    }

    /// Consumes every entry in key order. O(n), no rebalancing.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        fn drain<K, V>(link: Link<K, V>, out: &mut Vec<(K, V)>) {
            if let Some(node) = link {
                let Node {
                    key, value, left, right, ..
                } = *node;
                drain(left, out);
                out.push((key, value));
                drain(right, out);
            }
        }

        let mut entries = Vec::with_capacity(self.len());
        drain(self.root.take(), &mut entries);
        entries
    }

    /// Forces the root link black, which every public mutation ends with.
    #[inline]
    fn blacken_root(&mut self) {
        if let Some(root) = self.root.as_deref_mut() {
            root.set_color(Color::Black);
        }
    }

    /// Colors the root red when both of its links are black, so deletion
    /// has a red link to push down.
    #[inline]
    fn redden_root_for_delete(root: &mut Node<K, V>) {
        if !is_red(&root.left) && !is_red(&root.right) {
            root.set_color(Color::Red);
        }
    }

    /// Removes the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let mut root = self.root.take()?;
        Self::redden_root_for_delete(&mut root);

        let (root, removed) = remove_min(root);
        self.root = root;
        self.blacken_root();

        tracing::trace!(len = self.len(), "removed first entry");
        Some(removed)
    }

    /// Removes the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let mut root = self.root.take()?;
        Self::redden_root_for_delete(&mut root);

        let (root, removed) = remove_max(root);
        self.root = root;
        self.blacken_root();

        tracing::trace!(len = self.len(), "removed last entry");
        Some(removed)
    }
}

impl<K: Ord, V> RawRBTreeMap<K, V> {
    /// Searches for a key, reporting every comparison to `probe`.
    pub(crate) fn get_probed<Q, P>(&self, key: &Q, probe: &mut P) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        P: ?Sized + Probe,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            probe.compared();
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
            }
        }
        None
    }

    /// Returns the key-value pair corresponding to the key.
    #[inline]
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get_probed(key, &mut ())
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Returns true if the tree contains the key.
    #[inline]
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get_key_value(key).is_some()
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Greater => {
                    best = Some((&node.key, &node.value));
                    current = node.right.as_deref();
                }
            }
        }
        best
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Less => {
                    best = Some((&node.key, &node.value));
                    current = node.left.as_deref();
                }
            }
        }
        best
    }

    /// Counts the keys less than `key`, or less than or equal to `key` when
    /// `inclusive` is set. The key need not be present.
    pub(crate) fn count_below<Q>(&self, key: &Q, inclusive: bool) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => {
                    count += 1 + size(&node.left);
                    current = node.right.as_deref();
                }
                Ordering::Equal => return count + size(&node.left) + usize::from(inclusive),
            }
        }
        count
    }

    /// Returns the rank (0-indexed position) of a key, if present.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => {
                    rank += 1 + size(&node.left);
                    current = node.right.as_deref();
                }
                Ordering::Equal => return Some(rank + size(&node.left)),
            }
        }
        None
    }

    /// Converts a key range into the half-open rank range `[start, end)` it
    /// covers. An empty key range yields `start == end`.
    pub(crate) fn rank_range<T, R>(&self, range: &R) -> (usize, usize)
    where
        K: Borrow<T>,
        T: ?Sized + Ord,
        R: RangeBounds<T>,
    {
        let start = match range.start_bound() {
            Bound::Included(key) => self.count_below(key, false),
            Bound::Excluded(key) => self.count_below(key, true),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(key) => self.count_below(key, true),
            Bound::Excluded(key) => self.count_below(key, false),
            Bound::Unbounded => self.len(),
        };
        (start, end.max(start))
    }

    /// Inserts a key-value pair, reporting comparisons and the put itself to
    /// `probe`. Returns the old value if the key was present.
    pub(crate) fn insert_probed<P>(&mut self, key: K, value: V, probe: &mut P) -> Option<V>
    where
        P: ?Sized + Probe,
    {
        probe.inserted();

        let (root, old_value) = insert(self.root.take(), key, value, probe);
        self.root = Some(root);
        self.blacken_root();

        if old_value.is_none() {
            tracing::trace!(len = self.len(), "inserted new key");
        }
        old_value
    }

    /// Inserts a key-value pair. Returns the old value if the key was present.
    #[inline]
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_probed(key, value, &mut ())
    }

    /// Removes a key, returning the stored key and value if it was present.
    ///
    /// An absent key leaves the tree untouched.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // The descent below relies on the key being present: every
        // `move_red_*` needs the child it moves toward.
        if !self.contains_key(key) {
            return None;
        }

        let mut root = self.root.take()?;
        Self::redden_root_for_delete(&mut root);

        let (root, removed) = remove(root, key);
        self.root = root;
        self.blacken_root();

        debug_assert!(removed.is_some(), "remove_entry: present key was not removed");
        tracing::trace!(len = self.len(), "removed entry");
        removed
    }

    /// Removes a key, returning the value if it was present.
    #[inline]
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Validates all red-black invariants, returning the first violation
    /// found or the shape of a valid tree.
    pub(crate) fn check_invariants(&self) -> Result<TreeShape, InvariantViolation> {
        let Some(root) = self.root.as_deref() else {
            return Ok(TreeShape::default());
        };

        let result = if root.is_red() {
            Err(InvariantViolation::RedRoot)
        } else {
            check_node(root, None, None).map(|walk| TreeShape {
                len: walk.count,
                height: walk.height,
                black_height: walk.black_height,
            })
        };

        if let Err(violation) = &result {
            tracing::debug!(%violation, "red-black invariant violated");
        }
        result
    }
}

/// Inserts below `link`, then fixes up on the way back. Returns the new
/// subtree root and the displaced value, if any.
fn insert<K, V, P>(link: Link<K, V>, key: K, value: V, probe: &mut P) -> (Box<Node<K, V>>, Option<V>)
where
    K: Ord,
    P: ?Sized + Probe,
{
    let Some(mut h) = link else {
        return (Node::new_leaf(key, value), None);
    };

    probe.compared();
    let old_value = match key.cmp(&h.key) {
        Ordering::Less => {
            let (left, old_value) = insert(h.left.take(), key, value, probe);
            h.left = Some(left);
            old_value
        }
        Ordering::Greater => {
            let (right, old_value) = insert(h.right.take(), key, value, probe);
            h.right = Some(right);
            old_value
        }
        Ordering::Equal => {
            let old_value = core::mem::replace(&mut h.value, value);
            return (h, Some(old_value));
        }
    };

    (balance(h), old_value)
}

/// Removes the smallest entry below `h`.
///
/// Requires `h` or `h.left` to be red, so the removed leaf is never the
/// only node of a 2-node.
fn remove_min<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, (K, V)) {
    if h.left.is_none() {
        // A left-leaning node with no left child has no right child either.
        return h.detach(Side::Right);
    }

    if needs_red_left(&h) {
        h = move_red_left(h);
    }

    match h.left.take() {
        Some(left) => {
            let (left, removed) = remove_min(left);
            h.left = left;
            (Some(balance(h)), removed)
        }
        None => h.detach(Side::Right),
    }
}

/// Removes the largest entry below `h`.
fn remove_max<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, (K, V)) {
    if is_red(&h.left) {
        h = rotate_right(h);
    }

    if h.right.is_none() {
        return h.detach(Side::Left);
    }

    if needs_red_right(&h) {
        h = move_red_right(h);
    }

    match h.right.take() {
        Some(right) => {
            let (right, removed) = remove_max(right);
            h.right = right;
            (Some(balance(h)), removed)
        }
        None => h.detach(Side::Left),
    }
}

/// Removes `key` below `h`. The key must be present in the subtree.
fn remove<K, V, Q>(mut h: Box<Node<K, V>>, key: &Q) -> (Link<K, V>, Option<(K, V)>)
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    if key < h.key.borrow() {
        if h.left.is_none() {
            return (Some(h), None);
        }
        if needs_red_left(&h) {
            h = move_red_left(h);
        }
        let removed = match h.left.take() {
            Some(left) => {
                let (left, removed) = remove(left, key);
                h.left = left;
                removed
            }
            None => None,
        };
        return (Some(balance(h)), removed);
    }

    if is_red(&h.left) {
        h = rotate_right(h);
    }

    if key == h.key.borrow() && h.right.is_none() {
        let (link, removed) = h.detach(Side::Left);
        return (link, Some(removed));
    }

    if h.right.is_none() {
        return (Some(h), None);
    }

    if needs_red_right(&h) {
        h = move_red_right(h);
    }

    let removed = match (key.cmp(h.key.borrow()), h.right.take()) {
        (Ordering::Equal, Some(right)) => {
            // Replace this entry with its successor, which is removed from
            // the right subtree.
            let (right, (successor_key, successor_value)) = remove_min(right);
            h.right = right;
            let old_key = core::mem::replace(&mut h.key, successor_key);
            let old_value = core::mem::replace(&mut h.value, successor_value);
            Some((old_key, old_value))
        }
        (_, Some(right)) => {
            let (right, removed) = remove(right, key);
            h.right = right;
            removed
        }
        (_, None) => None,
    };

    (Some(balance(h)), removed)
}

/// Facts gathered about a valid subtree.
#[derive(Clone, Copy)]
struct Walk {
    count: usize,
    height: usize,
    black_height: usize,
}

fn check_node<K: Ord, V>(
    node: &Node<K, V>,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Result<Walk, InvariantViolation> {
    if lower.is_some_and(|lower| node.key <= *lower) || upper.is_some_and(|upper| node.key >= *upper) {
        return Err(InvariantViolation::OutOfOrder);
    }
    if is_red(&node.right) {
        return Err(InvariantViolation::RightLeaningRed);
    }
    let color = node.color();
    if color == Color::Red && is_red(&node.left) {
        return Err(InvariantViolation::ConsecutiveReds);
    }

    let empty = Walk {
        count: 0,
        height: 0,
        black_height: 0,
    };
    let left = match node.left.as_deref() {
        Some(left) => check_node(left, lower, Some(&node.key))?,
        None => empty,
    };
    let right = match node.right.as_deref() {
        Some(right) => check_node(right, Some(&node.key), upper)?,
        None => empty,
    };

    if left.black_height != right.black_height {
        return Err(InvariantViolation::BlackImbalance {
            left: left.black_height,
            right: right.black_height,
        });
    }

    let count = 1 + left.count + right.count;
    if node.size() != count {
        return Err(InvariantViolation::SizeMismatch {
            stored: node.size(),
            actual: count,
        });
    }

    Ok(Walk {
        count,
        height: 1 + left.height.max(right.height),
        black_height: left.black_height
            + match color {
                Color::Red => 0,
                Color::Black => 1,
            },
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
mod tests {
    use super::*;
    use crate::probe::Counters;
    use alloc::collections::BTreeMap;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    impl<K: Ord, V> RawRBTreeMap<K, V> {
        /// Panics with a descriptive message if any invariant is violated.
        fn validate_invariants(&self) {
            if let Err(violation) = self.check_invariants() {
                panic!("Tree invariant violation: {violation}");
            }
        }

        fn keys(&self) -> Vec<&K> {
            (0..self.len()).filter_map(|rank| self.get_by_rank(rank)).map(|(k, _)| k).collect()
        }
    }

    // Test operations enum for property testing
    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
        PopFirst,
        PopLast,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0i32..1000).prop_map(Op::Insert),
            3 => (0i32..1000).prop_map(Op::Remove),
            1 => Just(Op::PopFirst),
            1 => Just(Op::PopLast),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut tree: RawRBTreeMap<i32, i32> = RawRBTreeMap::new();
            let mut model: BTreeMap<i32, i32> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        prop_assert_eq!(tree.insert(key, key * 2), model.insert(key, key * 2));
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(tree.remove_entry(&key), model.remove_entry(&key));
                    }
                    Op::PopFirst => {
                        prop_assert_eq!(tree.pop_first(), model.pop_first());
                    }
                    Op::PopLast => {
                        prop_assert_eq!(tree.pop_last(), model.pop_last());
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }
        }

        #[test]
        fn rank_select_duality(keys in prop::collection::btree_set(-500i32..500, 1..200)) {
            let mut tree: RawRBTreeMap<i32, ()> = RawRBTreeMap::new();
            for &key in &keys {
                tree.insert(key, ());
            }
            tree.validate_invariants();

            for rank in 0..tree.len() {
                let (key, ()) = tree.get_by_rank(rank).expect("rank within bounds");
                prop_assert_eq!(tree.count_below(key, false), rank);
                prop_assert_eq!(tree.rank_of(key), Some(rank));
            }
            prop_assert!(tree.get_by_rank(tree.len()).is_none());
        }

        #[test]
        fn floor_and_ceiling_match_model(keys in prop::collection::btree_set(-100i32..100, 0..60), probe in -120i32..120) {
            let mut tree: RawRBTreeMap<i32, ()> = RawRBTreeMap::new();
            for &key in &keys {
                tree.insert(key, ());
            }

            let floor = keys.range(..=probe).next_back();
            let ceiling = keys.range(probe..).next();
            prop_assert_eq!(tree.floor(&probe).map(|(k, ())| k), floor);
            prop_assert_eq!(tree.ceiling(&probe).map(|(k, ())| k), ceiling);
            prop_assert_eq!(tree.count_below(&probe, false), keys.range(..probe).count());
            prop_assert_eq!(tree.count_below(&probe, true), keys.range(..=probe).count());
        }
    }

    #[test]
    fn empty_tree() {
        let mut tree: RawRBTreeMap<i32, i32> = RawRBTreeMap::new();
        tree.validate_invariants();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.first_key_value().is_none());
        assert!(tree.last_key_value().is_none());
        assert!(tree.pop_first().is_none());
        assert!(tree.pop_last().is_none());
        assert!(tree.remove(&1).is_none());
        assert!(tree.floor(&0).is_none());
        assert!(tree.ceiling(&0).is_none());
        assert_eq!(tree.count_below(&0, true), 0);
        assert_eq!(tree.check_invariants(), Ok(TreeShape::default()));
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree: RawRBTreeMap<i32, i32> = RawRBTreeMap::new();
        for i in 0..1024 {
            tree.insert(i, i);
            tree.validate_invariants();
        }

        let shape = tree.check_invariants().unwrap();
        assert_eq!(shape.len, 1024);
        // A red-black tree is never more than twice as tall as its black height.
        assert!(shape.height <= 2 * shape.black_height);
        assert!(shape.height <= 20);
    }

    #[test]
    fn removing_absent_key_leaves_tree_untouched() {
        let mut tree: RawRBTreeMap<i32, i32> = RawRBTreeMap::new();
        for i in (0..64).step_by(2) {
            tree.insert(i, i);
        }
        let before = tree.check_invariants().unwrap();

        for i in (1..64).step_by(2) {
            assert!(tree.remove(&i).is_none());
        }
        assert!(tree.remove(&-1).is_none());
        assert!(tree.remove(&100).is_none());

        assert_eq!(tree.check_invariants().unwrap(), before);
        assert_eq!(tree.keys().into_iter().copied().collect::<Vec<_>>(), (0..64).step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn drain_to_vec_is_sorted_and_empties_tree() {
        let mut tree: RawRBTreeMap<i32, i32> = RawRBTreeMap::new();
        for i in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
            tree.insert(i, i * 10);
        }

        let entries = tree.drain_to_vec();
        assert_eq!(entries, (1..=9).map(|i| (i, i * 10)).collect::<Vec<_>>());
        assert!(tree.is_empty());
    }

    #[test]
    fn counters_track_compares_and_inserts() {
        let mut tree: RawRBTreeMap<i32, i32> = RawRBTreeMap::new();
        let mut counters = Counters::default();

        tree.insert_probed(2, 2, &mut counters);
        assert_eq!(counters, Counters { compares: 0, inserts: 1 });

        tree.insert_probed(1, 1, &mut counters);
        tree.insert_probed(3, 3, &mut counters);
        assert_eq!(counters.inserts, 3);
        assert_eq!(counters.compares, 2);

        let before = counters.compares;
        assert!(tree.get_probed(&3, &mut counters).is_some());
        assert_eq!(counters.compares - before, 2);
        assert!(tree.get_probed(&4, &mut counters).is_none());
        assert_eq!(counters.compares - before, 4);
    }

    #[test]
    fn ranks_stable_after_rebalancing() {
        let mut tree: RawRBTreeMap<i32, i32> = RawRBTreeMap::new();
        for i in 0..100 {
            tree.insert(i, i * 2);
        }

        for i in (0..100).step_by(3) {
            tree.remove(&i);
            tree.validate_invariants();
        }

        let remaining: Vec<i32> = (0..100).filter(|i| i % 3 != 0).collect();
        for (expected_rank, &key) in remaining.iter().enumerate() {
            assert_eq!(tree.rank_of(&key), Some(expected_rank), "Rank of {key} should be {expected_rank}");
        }
    }

    #[test]
    fn checker_reports_red_root() {
        let mut tree: RawRBTreeMap<i32, ()> = RawRBTreeMap::new();
        tree.insert(1, ());
        tree.root_mut().unwrap().set_color(Color::Red);
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn checker_reports_out_of_order_keys() {
        let mut tree: RawRBTreeMap<i32, ()> = RawRBTreeMap::new();
        tree.insert(2, ());
        tree.insert(1, ());
        tree.root_mut().unwrap().left.as_deref_mut().unwrap().key = 3;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::OutOfOrder));
    }

    #[test]
    fn checker_reports_right_leaning_red() {
        let mut tree: RawRBTreeMap<i32, ()> = RawRBTreeMap::new();
        tree.insert(1, ());
        let root = tree.root_mut().unwrap();
        root.right = Some(Node::new_leaf(2, ()));
        root.update_size();
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RightLeaningRed));
    }

    #[test]
    fn checker_reports_consecutive_reds() {
        let mut tree: RawRBTreeMap<i32, ()> = RawRBTreeMap::new();
        tree.insert(3, ());
        tree.insert(2, ());
        let root = tree.root_mut().unwrap();
        let left = root.left.as_deref_mut().unwrap();
        assert_eq!(left.color(), Color::Red);
        left.left = Some(Node::new_leaf(1, ()));
        left.update_size();
        root.update_size();
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::ConsecutiveReds));
    }

    #[test]
    fn checker_reports_black_imbalance() {
        let mut tree: RawRBTreeMap<i32, ()> = RawRBTreeMap::new();
        tree.insert(2, ());
        tree.insert(1, ());
        tree.root_mut().unwrap().left.as_deref_mut().unwrap().set_color(Color::Black);
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::BlackImbalance { left: 1, right: 0 }));
    }
}
