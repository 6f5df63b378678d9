use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use super::RawRBTreeMap;
use crate::raw::arena::Handle;
use crate::raw::node::{Color, Node, Side};

impl<K, V> RawRBTreeMap<K, V> {
    /// Builds a balanced tree from entries sorted strictly ascending by key, without a single
    /// comparison or rotation.
    ///
    /// Each range is split at its midpoint, which becomes the subtree root. Every node above
    /// depth `floor(log2(n + 1))` is black and every node at that depth is red: the levels above
    /// are full, nothing lies deeper, and so every path to an empty slot meets the same number of
    /// black nodes.
    ///
    /// Unsorted input is not detected; it produces a tree whose searches give wrong answers.
    pub(crate) fn from_sorted_vec(entries: Vec<(K, V)>) -> Self {
        let len = entries.len();
        let black_depth = (len + 1).ilog2();
        debug!("building balanced tree of {len} entries, black depth {black_depth}");

        let mut tree = Self::with_capacity(len);
        let mut entries = entries.into_iter();
        tree.root = tree.build_subtree(&mut entries, len, 0, black_depth);
        debug_assert_eq!(tree.len, len);
        tree
    }

    /// Builds the subtree over the next `len` entries and returns its root. The midpoint of
    /// the range is visited between its halves, so `entries` is consumed in order.
    fn build_subtree(
        &mut self,
        entries: &mut vec::IntoIter<(K, V)>,
        len: usize,
        depth: u32,
        black_depth: u32,
    ) -> Option<Handle> {
        if len == 0 {
            return None;
        }

        let left_len = (len - 1) / 2;
        let left = self.build_subtree(entries, left_len, depth + 1, black_depth);

        let (key, value) = entries
            .next()
            .expect("`RawRBTreeMap::build_subtree()` - ran out of entries!");
        let color = if depth < black_depth { Color::Black } else { Color::Red };
        let handle = self.nodes.alloc(Node::new(key, value, color, None));

        let right = self.build_subtree(entries, len - 1 - left_len, depth + 1, black_depth);
        self.attach(handle, Side::Left, left);
        self.attach(handle, Side::Right, right);

        self.len += 1;
        Some(handle)
    }
}
