use super::arena::Handle;

/// The red-black color tag carried by every node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a node is meant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A colored binary-tree node.
///
/// `children` are the only owning links: a handle stored there is the single owner of the
/// child's arena slot. `parent` is a back-reference used for navigation during rotations,
/// fixups and in-order stepping, and never frees anything.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    parent: Option<Handle>,
    children: [Option<Handle>; 2],
}

impl<K, V> Node<K, V> {
    /// Creates a detached node with no children.
    pub(crate) fn new(key: K, value: V, color: Color, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            color,
            parent,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Returns references to both halves of the entry; the key stays immutable.
    #[inline]
    pub(crate) fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        self.children[side as usize]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        self.children[side as usize] = child;
    }

    /// Consumes the node, returning its entry.
    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn opposite_side_is_an_involution() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.opposite().opposite(), Side::Left);
    }

    #[test]
    fn child_slots_are_independent() {
        let mut node = Node::new(1, "one", Color::Red, None);
        let left = Handle::from_index(3);
        let right = Handle::from_index(9);

        node.set_child(Side::Left, Some(left));
        node.set_child(Side::Right, Some(right));
        assert_eq!(node.child(Side::Left), Some(left));
        assert_eq!(node.child(Side::Right), Some(right));

        node.set_child(Side::Left, None);
        assert_eq!(node.child(Side::Left), None);
        assert_eq!(node.child(Side::Right), Some(right));
    }

    #[test]
    fn entry_mut_updates_value_only() {
        let mut node = Node::new("k", 1, Color::Black, Some(Handle::from_index(0)));
        let (key, value) = node.entry_mut();
        assert_eq!(*key, "k");
        *value += 41;
        assert_eq!(*node.value(), 42);
        assert_eq!(node.into_entry(), ("k", 42));
    }
}
