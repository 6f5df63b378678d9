use alloc::vec::Vec;

use super::RBTreeMap;
use crate::raw::RawRBTreeMap;

impl<K, V> RBTreeMap<K, V> {
    /// Builds a map from entries already sorted strictly ascending by key.
    ///
    /// The tree is laid out directly with the median of every range as the subtree root, so
    /// construction performs no key comparisons and no rotations. The result has the minimum
    /// possible height, `ceil(log2(n + 1))`.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// The order is not checked. Unsorted input or duplicate keys produce a map whose lookups
    /// give wrong answers; use [`RBTreeMap::from_pairs`] or [`FromIterator`] when the order is
    /// not known.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from_sorted_iter((1..=7).map(|k| (k, k * 10)));
    /// assert_eq!(map.len(), 7);
    /// assert_eq!(map.get(&4), Some(&40));
    /// assert_eq!(map.first_key_value(), Some((&1, &10)));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn from_sorted_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = iter.into_iter().collect();
        RBTreeMap {
            raw: RawRBTreeMap::from_sorted_vec(entries),
        }
    }

    /// Builds a map from `pairs`, taking the linear-time balanced layout when `sorted` is
    /// `true` and inserting the pairs one by one otherwise.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let sorted = RBTreeMap::from_pairs([(1, "a"), (2, "b"), (3, "c")], true);
    /// let shuffled = RBTreeMap::from_pairs([(3, "c"), (1, "a"), (2, "b")], false);
    /// assert_eq!(sorted, shuffled);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) when `sorted`, O(n log n) otherwise.
    #[must_use]
    pub fn from_pairs<I>(pairs: I, sorted: bool) -> Self
    where
        K: Ord,
        I: IntoIterator<Item = (K, V)>,
    {
        if sorted {
            Self::from_sorted_iter(pairs)
        } else {
            pairs.into_iter().collect()
        }
    }
}
