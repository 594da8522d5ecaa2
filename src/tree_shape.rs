/// The shape of a valid tree, as measured by
/// [`RBTreeMap::check_invariants`](crate::RBTreeMap::check_invariants).
///
/// # Examples
///
/// ```
/// use llrb_tree::RBTreeMap;
///
/// let map: RBTreeMap<u32, ()> = (0..1000).map(|i| (i, ())).collect();
/// let shape = map.check_invariants().unwrap();
///
/// assert_eq!(shape.len, 1000);
/// assert!(shape.height <= 2 * shape.black_height);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct TreeShape {
    /// The number of entries.
    pub len: usize,
    /// The number of nodes on the longest root-to-leaf path.
    pub height: usize,
    /// The number of black links on every root-to-null path, counting the
    /// root.
    pub black_height: usize,
}
