use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::{Arena, Handle};
use super::node::{Color, Node, Side};

mod bulk;
mod fixup;

/// Explicit stack for in-order walks. A red-black tree of `n` nodes is at most
/// `2 * log2(n + 1)` deep, so 64 inline slots cover every tree a `u32` arena can index.
type Stack = SmallVec<[Handle; 64]>;

/// The red-black tree backing `RBTreeMap`.
#[derive(Clone)]
pub(crate) struct RawRBTreeMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of key-bearing nodes in the tree.
    len: usize,
}

impl<K, V> RawRBTreeMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        log::debug!("clearing tree of {} nodes", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Color of a child slot; an empty slot counts as black.
    #[inline]
    fn color(&self, handle: Option<Handle>) -> Color {
        handle.map_or(Color::Black, |h| self.node(h).color())
    }

    /// Which slot of `parent` holds `child`.
    #[inline]
    fn side_of(&self, child: Handle, parent: Handle) -> Side {
        if self.node(parent).child(Side::Left) == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Hands ownership of `child` to `parent`'s `side` slot and points the back-reference at
    /// `parent`.
    #[inline]
    fn attach(&mut self, parent: Handle, side: Side, child: Option<Handle>) {
        self.node_mut(parent).set_child(side, child);
        if let Some(child) = child {
            self.node_mut(child).set_parent(Some(parent));
        }
    }

    /// Puts subtree `v` where subtree `u` hangs, under `u`'s parent or as the root.
    /// `u` keeps its own children and its now stale parent link.
    fn transplant(&mut self, u: Handle, v: Option<Handle>) {
        let parent = self.node(u).parent();
        match parent {
            None => self.root = v,
            Some(p) => {
                let side = self.side_of(u, p);
                self.node_mut(p).set_child(side, v);
            }
        }
        if let Some(v) = v {
            self.node_mut(v).set_parent(parent);
        }
    }

    /// Walks from `handle` as far as possible toward `side`: the subtree minimum for
    /// `Side::Left`, the maximum for `Side::Right`.
    pub(crate) fn edge(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.node(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Where an in-order walk stepping toward `side` begins: the minimum for `Side::Right`,
    /// the maximum for `Side::Left`.
    pub(crate) fn first(&self, side: Side) -> Option<Handle> {
        self.root.map(|root| self.edge(root, side.opposite()))
    }

    /// In-order neighbour of `handle`: the successor for `Side::Right`, the predecessor for
    /// `Side::Left`.
    pub(crate) fn step(&self, mut handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(side) {
            return Some(self.edge(child, side.opposite()));
        }
        let mut parent = self.node(handle).parent();
        while let Some(p) = parent {
            if self.node(p).child(side) != Some(handle) {
                break;
            }
            handle = p;
            parent = self.node(p).parent();
        }
        parent
    }

    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.node(self.first(Side::Right)?);
        Some((node.key(), node.value()))
    }

    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.node(self.first(Side::Left)?);
        Some((node.key(), node.value()))
    }

    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first(Side::Right)?;
        Some(self.remove_node(first))
    }

    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.first(Side::Left)?;
        Some(self.remove_node(last))
    }

    /// Unlinks node `z`, restores the red-black invariants and returns its entry.
    fn remove_node(&mut self, z: Handle) -> (K, V) {
        let left = self.node(z).child(Side::Left);
        let right = self.node(z).child(Side::Right);
        let z_color = self.node(z).color();

        // `x` is whatever now occupies the slot that lost a node of color `removed`;
        // `x_parent` is tracked separately because `x` may be an empty slot.
        let (x, x_parent, removed) = match (left, right) {
            (None, _) => {
                let parent = self.node(z).parent();
                self.transplant(z, right);
                (right, parent, z_color)
            }
            (Some(_), None) => {
                let parent = self.node(z).parent();
                self.transplant(z, left);
                (left, parent, z_color)
            }
            (Some(left), Some(right)) => {
                let y = self.edge(right, Side::Left);
                let y_color = self.node(y).color();
                let x = self.node(y).child(Side::Right);
                let x_parent = if y == right {
                    Some(y)
                } else {
                    let y_parent = self.node(y).parent();
                    self.transplant(y, x);
                    self.attach(y, Side::Right, Some(right));
                    y_parent
                };
                self.transplant(z, Some(y));
                self.attach(y, Side::Left, Some(left));
                self.node_mut(y).set_color(z_color);
                (x, x_parent, y_color)
            }
        };

        let node = self.nodes.take(z);
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len);

        if removed == Color::Black {
            self.delete_fixup(x, x_parent);
        }

        node.into_entry()
    }

    /// Keeps only the entries for which `f` returns `true`, visiting in ascending key order.
    pub(crate) fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        // Removal only relinks nodes, so handles collected up front stay valid.
        let mut doomed: Vec<Handle> = Vec::new();
        let mut current = self.first(Side::Right);
        while let Some(handle) = current {
            let (key, value) = self.node_mut(handle).entry_mut();
            if !f(key, value) {
                doomed.push(handle);
            }
            current = self.step(handle, Side::Right);
        }
        for handle in doomed {
            drop(self.remove_node(handle));
        }
    }

    /// Drains all entries in ascending key order. This is O(n): nodes are released in
    /// order without any rebalancing.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut result = Vec::with_capacity(self.len);
        let mut stack = Stack::new();
        let mut current = self.root;

        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.node(handle).child(Side::Left);
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            let node = self.nodes.take(handle);
            current = node.child(Side::Right);
            result.push(node.into_entry());
        }

        self.clear();
        result
    }
}

impl<K: Ord, V> RawRBTreeMap<K, V> {
    /// Ordered descent from the root; returns the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.child(Side::Left),
                Ordering::Greater => node.child(Side::Right),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.node(handle).value())
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.node_mut(handle).value_mut())
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.node(self.search(key)?);
        Some((node.key(), node.value()))
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts a key-value pair. Returns the old value if the key was already present, in
    /// which case the tree shape is untouched and the stored key is kept.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            side = match key.cmp(self.node(handle).key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    return Some(core::mem::replace(self.node_mut(handle).value_mut(), value));
                }
            };
            parent = Some(handle);
            current = self.node(handle).child(side);
        }

        let handle = self.nodes.alloc(Node::new(key, value, Color::Red, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) => self.node_mut(parent).set_child(side, Some(handle)),
        }
        self.len += 1;

        self.insert_fixup(handle);
        None
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let z = self.search(key)?;
        Some(self.remove_node(z))
    }
}
