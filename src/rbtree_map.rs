use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use crate::raw::{Handle, RawRBTreeMap, Side};

mod capacity;
mod sorted;

/// An ordered map stored as a [red-black tree] of arena-allocated nodes.
///
/// Every node carries one entry, a color, two owning child links and a back-link to its
/// parent. Keys must implement [`Ord`]; the tree keeps them in ascending order and no two
/// nodes hold equal keys.
///
/// # Balance
///
/// The root is black, a red node never has a red child, and every path from a node down to an
/// empty child slot meets the same number of black nodes. Together these bound the height by
/// `2 * log2(n + 1)`, so [`get`], [`insert`] and [`remove`] are O(log n) in the worst case.
/// An insertion performs at most two rotations and a removal at most three; the rest of the
/// repair work is recoloring.
///
/// # Storage and iteration
///
/// Nodes live in a slot arena and refer to each other by index, so the map contains no
/// `unsafe` code and cloning it copies the shape and colors exactly. Slots freed by removals
/// are reused before the arena grows; see [`with_capacity`] to pre-size it.
///
/// The borrowing iterators ([`iter`], [`keys`], [`values`]) hold no stack: each step moves to
/// the in-order neighbour through child and parent links, which is O(1) amortized and
/// O(log n) at worst. They run from both ends. The owning iterators release all nodes in one
/// in-order pass up front, without any rebalancing.
///
/// Changing a key's ordering through interior mutability while it is in the map is a logic
/// error. Lookups may then miss entries, but memory safety is unaffected.
///
/// # Examples
///
/// ```
/// use rb_tree_map::RBTreeMap;
///
/// let mut ports = RBTreeMap::new();
/// ports.insert(443, "https");
/// ports.insert(22, "ssh");
/// ports.insert(80, "http");
///
/// // An existing key keeps its node; only the value changes.
/// assert_eq!(ports.insert(80, "www"), Some("http"));
///
/// assert_eq!(ports.first_key_value(), Some((&22, &"ssh")));
/// assert_eq!(ports[&443], "https");
///
/// ports.remove(&22);
/// let listed: Vec<_> = ports.iter().rev().map(|(port, _)| *port).collect();
/// assert_eq!(listed, [443, 80]);
/// ```
///
/// Entries known to be sorted build a minimum-height tree without comparisons or rotations:
///
/// ```
/// use rb_tree_map::RBTreeMap;
///
/// let planets = RBTreeMap::from_sorted_iter([
///     ("Earth", 1.0),
///     ("Mars", 1.5),
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
/// ]);
/// assert_eq!(planets.len(), 4);
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
/// [`get`]: RBTreeMap::get
/// [`insert`]: RBTreeMap::insert
/// [`remove`]: RBTreeMap::remove
/// [`with_capacity`]: RBTreeMap::with_capacity
/// [`iter`]: RBTreeMap::iter
/// [`keys`]: RBTreeMap::keys
/// [`values`]: RBTreeMap::values
pub struct RBTreeMap<K, V> {
    raw: RawRBTreeMap<K, V>,
}

/// A borrowing iterator over the entries of a `RBTreeMap`, sorted by key.
///
/// Holds one cursor per end plus the count still to yield; the cursors never cross because
/// iteration stops when the count reaches zero.
///
/// Created by [`iter`] on [`RBTreeMap`].
///
/// # Examples
///
/// ```
/// use rb_tree_map::RBTreeMap;
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RBTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawRBTreeMap<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the entries of a `RBTreeMap`, sorted by key.
///
/// The tree is dismantled in one in-order pass when this iterator is created; it then hands
/// out the released entries from either end.
///
/// Created by [`into_iter`] on [`RBTreeMap`].
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `RBTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`RBTreeMap`].
///
/// [`keys`]: RBTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `RBTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`RBTreeMap`].
///
/// [`values`]: RBTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An owning iterator over the keys of a `RBTreeMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`RBTreeMap`].
///
/// [`into_keys`]: RBTreeMap::into_keys
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of a `RBTreeMap`.
///
/// This `struct` is created by the [`into_values`] method on [`RBTreeMap`].
///
/// [`into_values`]: RBTreeMap::into_values
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap`. The node arena allocates on the first insertion.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map: RBTreeMap<u16, &str> = RBTreeMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> RBTreeMap<K, V> {
        RBTreeMap {
            raw: RawRBTreeMap::new(),
        }
    }

    /// Drops every entry at once. No rebalancing happens; the arena keeps its allocation for
    /// reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map: RBTreeMap<_, _> = (0..100).map(|n| (n, n)).collect();
    /// let capacity = map.capacity();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), capacity);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) to drop the entries.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Looks up `key` by descending from the root, going left on smaller keys and right on
    /// larger ones.
    ///
    /// `key` may be any borrowed form of `K` whose ordering agrees with `K`'s.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let hosts = RBTreeMap::from([("alpha".to_string(), 10), ("beta".to_string(), 20)]);
    /// assert_eq!(hosts.get("beta"), Some(&20));
    /// assert_eq!(hosts.get("gamma"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Like [`get`](RBTreeMap::get), but also returns the key stored in the node. This differs
    /// from the argument for key types whose equal values are distinguishable.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(7, 'x')]);
    /// assert_eq!(map.get_key_value(&7), Some((&7, &'x')));
    /// assert_eq!(map.get_key_value(&8), None);
    /// ```
    pub fn get_key_value<Q>(&self, k: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(k)
    }

    /// Returns the entry with the smallest key, found at the end of the root's left spine.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(5, "five");
    /// map.insert(3, "three");
    /// assert_eq!(map.first_key_value(), Some((&3, &"three")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Unlinks the entry with the smallest key and rebalances, returning the entry.
    ///
    /// Repeated calls drain the map in ascending order, which makes it usable as a
    /// priority queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut jobs = RBTreeMap::from([(2, "build"), (1, "fetch"), (3, "test")]);
    /// assert_eq!(jobs.pop_first(), Some((1, "fetch")));
    /// assert_eq!(jobs.pop_first(), Some((2, "build")));
    /// assert_eq!(jobs.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Returns the entry with the largest key, found at the end of the root's right spine.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(5, "five"), (9, "nine")]);
    /// assert_eq!(map.last_key_value(), Some((&9, &"nine")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Unlinks the entry with the largest key and rebalances, returning the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, 'a'), (2, 'b')]);
    /// assert_eq!(map.pop_last(), Some((2, 'b')));
    /// assert_eq!(map.pop_last(), Some((1, 'a')));
    /// assert_eq!(map.pop_last(), None);
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Returns `true` if some node holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, ())]);
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Returns a mutable reference to the value stored under `key`. Keys stay immutable, so
    /// the tree order cannot be disturbed through this reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut hits = RBTreeMap::from([("/index", 0)]);
    /// if let Some(count) = hits.get_mut("/index") {
    ///     *count += 1;
    /// }
    /// assert_eq!(hits["/index"], 1);
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned and a new red node is
    /// linked in, followed by the recolorings and rotations that keep the tree balanced.
    ///
    /// If the map did have this key present, the value is updated in place, and the old
    /// value is returned. The tree shape does not change and the key is not updated, which
    /// matters for types that can be `==` without being identical.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        self.raw.insert(key, value)
    }

    /// Unlinks the node holding `key` and returns its value, or `None` if no node matched.
    ///
    /// A node with two children is replaced by its in-order successor. When the unlinked
    /// position was black, the missing black is pushed up the tree or absorbed by a rotation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.remove(&20), Some("b"));
    /// assert_eq!(map.remove(&20), None);
    /// assert!(map.keys().eq([10, 30].iter()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Like [`remove`](RBTreeMap::remove), but hands back the stored key as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([("k".to_string(), 1)]);
    /// assert_eq!(map.remove_entry("k"), Some(("k".to_string(), 1)));
    /// assert_eq!(map.remove_entry("k"), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Calls `f` on every entry in ascending key order and removes those for which it returns
    /// `false`. `f` may modify the values it keeps.
    ///
    /// All entries are visited before the first removal, so `f` sees the map as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut stock: RBTreeMap<&str, u32> = RBTreeMap::from([("apple", 3), ("pear", 0), ("fig", 7)]);
    /// stock.retain(|_, count| {
    ///     *count *= 2;
    ///     *count > 0
    /// });
    /// assert!(stock.into_iter().eq([("apple", 6), ("fig", 14)]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n + m log n) for `m` removals.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.retain(f);
    }

    /// Moves every entry of `other` into `self`, leaving `other` empty. Values from `other`
    /// win on equal keys.
    ///
    /// When `self` is empty the two trees are swapped and nothing is reinserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut base = RBTreeMap::from([(1, "a"), (3, "c")]);
    /// let mut patch = RBTreeMap::from([(3, "C"), (4, "D")]);
    ///
    /// base.append(&mut patch);
    ///
    /// assert!(patch.is_empty());
    /// assert!(base.into_iter().eq([(1, "a"), (3, "C"), (4, "D")]));
    /// ```
    pub fn append(&mut self, other: &mut Self)
    where
        K: Ord,
    {
        if self.is_empty() {
            core::mem::swap(self, other);
            return;
        }
        for (key, value) in other.raw.drain_to_vec() {
            self.insert(key, value);
        }
    }

    /// Consumes the map, yielding its keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.into_keys().collect::<Vec<_>>(), [1, 2]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Consumes the map, yielding its values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "second"), (1, "first")]);
    /// assert_eq!(map.into_values().collect::<Vec<_>>(), ["first", "second"]);
    /// ```
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }

    /// Borrows the entries in ascending key order.
    ///
    /// The iterator starts at both extremes and walks toward the middle through child and
    /// parent links, so it needs no auxiliary stack and works from either end.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    ///
    /// let mut iter = map.iter();
    /// assert_eq!(iter.len(), 3);
    /// assert_eq!(iter.next(), Some((&1, &"a")));
    /// assert_eq!(iter.next_back(), Some((&3, &"c")));
    /// assert_eq!(iter.next(), Some((&2, &"b")));
    /// assert_eq!(iter.next_back(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(Side::Right),
            back: self.raw.first(Side::Left),
            remaining: self.raw.len(),
        }
    }

    /// Borrows the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([("b", 2), ("a", 1)]);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "b"]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Borrows the values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, 20), (1, 10)]);
    /// assert_eq!(map.values().sum::<i32>(), 30);
    /// assert_eq!(map.values().next_back(), Some(&20));
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns the number of entries, kept as a counter alongside the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, ());
    /// map.insert(1, ());
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree has no root.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, ())]);
    /// assert!(!map.is_empty());
    /// map.remove(&1);
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl<K: Clone, V: Clone> Clone for RBTreeMap<K, V> {
    fn clone(&self) -> Self {
        RBTreeMap {
            raw: self.raw.clone(),
        }
    }
}

// Maps with the same entries may differ in shape; hashing and comparison see only the
// in-order entries.
impl<K: Hash, V: Hash> Hash for RBTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        self.iter().for_each(|entry| entry.hash(state));
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for RBTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for RBTreeMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for RBTreeMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for RBTreeMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RBTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for RBTreeMap<K, V> {
    fn default() -> Self {
        RBTreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RBTreeMap<K, V> {
    /// Inserts the pairs one at a time; the fixups keep the tree balanced whatever the order.
    /// Use [`RBTreeMap::from_sorted_iter`] when the input is known to be sorted.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RBTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for RBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for RBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RBTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for RBTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Releases every node in key order and returns an iterator over the entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for RBTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `RBTreeMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        let tree = self.tree;
        let node = tree.node(handle);
        self.front = tree.step(handle, Side::Right);
        self.remaining -= 1;

        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;
        let tree = self.tree;
        let node = tree.node(handle);
        self.back = tree.step(handle, Side::Left);
        self.remaining -= 1;

        Some((node.key(), node.value()))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}
