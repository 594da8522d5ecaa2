use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::RBTreeMap;
use crate::{Error, Rank};

impl<K, V> RBTreeMap<K, V> {
    /// Returns the smallest key in the map.
    ///
    /// Unlike [`first_key_value`](RBTreeMap::first_key_value), an empty map
    /// is reported as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.min_key(), Err(Error::Empty));
    /// map.insert(4, "d");
    /// map.insert(2, "b");
    /// assert_eq!(map.min_key(), Ok(&2));
    /// ```
    pub fn min_key(&self) -> Result<&K, Error> {
        self.raw.first_key_value().map(|(k, _)| k).ok_or(Error::Empty)
    }

    /// Returns the largest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(4, "d"), (2, "b")]);
    /// assert_eq!(map.max_key(), Ok(&4));
    /// ```
    pub fn max_key(&self) -> Result<&K, Error> {
        self.raw.last_key_value().map(|(k, _)| k).ok_or(Error::Empty)
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty. The map is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.delete_min(), Ok((1, "a")));
    /// assert_eq!(map.delete_min(), Ok((2, "b")));
    /// assert_eq!(map.delete_min(), Err(Error::Empty));
    /// ```
    pub fn delete_min(&mut self) -> Result<(K, V), Error> {
        self.raw.pop_first().ok_or(Error::Empty)
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty. The map is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.delete_max(), Ok((2, "b")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn delete_max(&mut self) -> Result<(K, V), Error> {
        self.raw.pop_last().ok_or(Error::Empty)
    }

    /// Returns the key with exactly `rank` smaller keys in the map.
    ///
    /// This is the inverse of [`rank`](RBTreeMap::rank): for every
    /// `i < len`, `map.rank(map.select(i)?) == i`.
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
    /// use llrb_tree::{Error, RBTreeMap};
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.select(1), Ok(&20));
    /// assert_eq!(map.select(3), Err(Error::RankOutOfRange { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K, Error> {
        self.raw.get_by_rank(rank).map(|(k, _)| k).ok_or(Error::RankOutOfRange {
            rank,
            len: self.len(),
        })
    }

    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
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
    /// use llrb_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the key and a mutable reference to the value at position `rank`.
    ///
    /// The key is returned as a shared reference; changing it could break
    /// the ordering of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(10, "a"), (5, "b")]);
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        self.raw.get_by_rank_mut(rank)
    }
}

impl<K: Ord, V> RBTreeMap<K, V> {
    /// Returns the largest key less than or equal to `key`, or `None` if
    /// every key in the map is greater.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, ()), (4, ()), (9, ())]);
    /// assert_eq!(map.floor(&4), Some(&4));
    /// assert_eq!(map.floor(&8), Some(&4));
    /// assert_eq!(map.floor(&0), None);
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.floor(key).map(|(k, _)| k)
    }

    /// Returns the smallest key greater than or equal to `key`, or `None` if
    /// every key in the map is smaller.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, ()), (4, ()), (9, ())]);
    /// assert_eq!(map.ceiling(&5), Some(&9));
    /// assert_eq!(map.ceiling(&10), None);
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.ceiling(key).map(|(k, _)| k)
    }

    /// Returns the number of keys in the map strictly less than `key`.
    ///
    /// `key` need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.rank(&20), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&99), 3);
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count_below(key, false)
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// assert_eq!(map.rank_of("b"), Some(1));
    /// assert_eq!(map.rank_of("z"), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }
}

impl<K, V> Index<Rank> for RBTreeMap<K, V> {
    type Output = V;

    /// Returns a reference to the value at the given rank.
    ///
    /// # Panics
    ///
    /// Panics if the rank is out of bounds.
    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

impl<K, V> IndexMut<Rank> for RBTreeMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
