use core::borrow::Borrow;
use core::ops::Index;

use super::RBTreeSet;
use crate::{Error, Rank};

impl<T> RBTreeSet<T> {
    /// Returns the smallest element of the set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, RBTreeSet};
    ///
    /// let mut set = RBTreeSet::new();
    /// assert_eq!(set.min_element(), Err(Error::Empty));
    /// set.insert(7);
    /// set.insert(3);
    /// assert_eq!(set.min_element(), Ok(&3));
    /// ```
    pub fn min_element(&self) -> Result<&T, Error> {
        self.map.min_key()
    }

    /// Returns the largest element of the set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the set is empty.
    pub fn max_element(&self) -> Result<&T, Error> {
        self.map.max_key()
    }

    /// Removes and returns the smallest element of the set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, RBTreeSet};
    ///
    /// let mut set = RBTreeSet::from([2, 1]);
    /// assert_eq!(set.delete_min(), Ok(1));
    /// assert_eq!(set.delete_max(), Ok(2));
    /// assert_eq!(set.delete_min(), Err(Error::Empty));
    /// ```
    pub fn delete_min(&mut self) -> Result<T, Error> {
        self.map.delete_min().map(|(k, ())| k)
    }

    /// Removes and returns the largest element of the set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the set is empty.
    pub fn delete_max(&mut self) -> Result<T, Error> {
        self.map.delete_max().map(|(k, ())| k)
    }

    /// Returns the element with exactly `rank` smaller elements in the set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] if `rank >= len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.select(2), Ok(&30));
    /// assert!(set.select(3).is_err());
    /// ```
    pub fn select(&self, rank: usize) -> Result<&T, Error> {
        self.map.select(rank)
    }

    /// Returns the value at position `rank` in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_rank(1), Some(&20));
    /// assert!(set.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.map.get_by_rank(rank).map(|(k, ())| k)
    }
}

impl<T: Ord> RBTreeSet<T> {
    /// Returns the largest element less than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 4, 9]);
    /// assert_eq!(set.floor(&5), Some(&4));
    /// assert_eq!(set.floor(&0), None);
    /// ```
    pub fn floor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.floor(value)
    }

    /// Returns the smallest element greater than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 4, 9]);
    /// assert_eq!(set.ceiling(&5), Some(&9));
    /// assert_eq!(set.ceiling(&10), None);
    /// ```
    pub fn ceiling<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.ceiling(value)
    }

    /// Returns the number of elements strictly less than `value`.
    pub fn rank<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.rank(value)
    }

    /// Returns the zero-based rank of `value` in sorted order, or `None` if
    /// the value is not present.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([10, 20]);
    ///
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.rank_of(value)
    }
}

impl<T> Index<Rank> for RBTreeSet<T> {
    type Output = T;

    /// Returns a reference to the value at the given rank.
    ///
    /// # Panics
    ///
    /// Panics if the rank is out of bounds.
    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn order_statistics_track_removals() {
        let mut set: RBTreeSet<u32> = (1..=10).collect();
        assert_eq!(set[Rank(4)], 5);
        assert!(set.remove(&5));
        assert_eq!(set[Rank(4)], 6);
        assert_eq!(set.rank(&5), 4);
        assert_eq!(set.rank_of(&5), None);
        assert_eq!(set.floor(&5), Some(&4));
        assert_eq!(set.ceiling(&5), Some(&6));
        set.check_invariants().unwrap();
    }
}
