//! Injected instrumentation for measuring the work a map does.
//!
//! The map itself keeps no counters. Callers who want to observe search cost
//! pass a [`Probe`] to [`RBTreeMap::get_probed`](crate::RBTreeMap::get_probed)
//! or [`RBTreeMap::insert_probed`](crate::RBTreeMap::insert_probed).

/// Receives notifications about the work done by a map operation.
///
/// Both hooks default to doing nothing. `()` is the null probe.
pub trait Probe {
    /// Called once for every key comparison.
    fn compared(&mut self) {}

    /// Called once for every insert, whether the key was new or not.
    fn inserted(&mut self) {}
}

impl Probe for () {}

/// A [`Probe`] that counts comparisons and inserts.
///
/// # Examples
///
/// ```
/// use llrb_tree::{Counters, RBTreeMap};
///
/// let mut counters = Counters::default();
/// let mut map = RBTreeMap::new();
/// for word in ["it", "was", "the", "best", "of", "times", "it", "was"] {
///     let count = map.get_probed(word, &mut counters).copied().unwrap_or(0);
///     map.insert_probed(word, count + 1, &mut counters);
/// }
///
/// assert_eq!(map[&"it"], 2);
/// assert_eq!(counters.inserts, 8);
/// assert!(counters.compares > 0);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Counters {
    /// The number of key comparisons observed.
    pub compares: u64,
    /// The number of inserts observed.
    pub inserts: u64,
}

impl Probe for Counters {
    #[inline]
    fn compared(&mut self) {
        self.compares += 1;
    }

    #[inline]
    fn inserted(&mut self) {
        self.inserts += 1;
    }
}
