use log::trace;

use super::RawRBTreeMap;
use crate::raw::arena::Handle;
use crate::raw::node::{Color, Side};

impl<K, V> RawRBTreeMap<K, V> {
    /// Rotates around `x` so that `x` moves down into its own `side` slot and the child on
    /// the opposite side rises into `x`'s place. `Side::Left` is the classic left rotation.
    ///
    /// Reassigns at most three child links, three parent links and possibly the root. Never
    /// touches colors or the size counter, and preserves in-order key sequence.
    pub(super) fn rotate(&mut self, x: Handle, side: Side) {
        let rising = side.opposite();
        let y = self
            .node(x)
            .child(rising)
            .expect("`RawRBTreeMap::rotate()` - pivot has no child to rotate up!");
        trace!("rotate {side:?} at {x:?}, {y:?} rises");

        let inner = self.node(y).child(side);
        self.attach(x, rising, inner);
        self.transplant(x, Some(y));
        self.attach(y, side, Some(x));
    }

    /// Restores the red-black invariants after `z` was attached as a new red leaf.
    pub(super) fn insert_fixup(&mut self, mut z: Handle) {
        while let Some(mut parent) = self.node(z).parent()
            && self.node(parent).color() == Color::Red
        {
            // A red parent is never the root, so this only stops on a corrupted tree.
            let Some(grandparent) = self.node(parent).parent() else {
                break;
            };
            let side = self.side_of(parent, grandparent);
            let uncle = self.node(grandparent).child(side.opposite());

            if let Some(uncle) = uncle
                && self.node(uncle).color() == Color::Red
            {
                trace!("insert fixup: recolor below {grandparent:?}");
                self.node_mut(parent).set_color(Color::Black);
                self.node_mut(uncle).set_color(Color::Black);
                self.node_mut(grandparent).set_color(Color::Red);
                z = grandparent;
                continue;
            }

            if self.node(parent).child(side.opposite()) == Some(z) {
                trace!("insert fixup: inner child {z:?}, rotating at {parent:?}");
                self.rotate(parent, side);
                core::mem::swap(&mut z, &mut parent);
            }

            trace!("insert fixup: rotating at {grandparent:?}");
            self.node_mut(parent).set_color(Color::Black);
            self.node_mut(grandparent).set_color(Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.node_mut(root).set_color(Color::Black);
        }
    }

    /// Restores equal black height after a black node left the slot now held by `x`.
    ///
    /// The deficit is tracked as the pair (`x`, `parent`) so an empty slot needs no stand-in
    /// node. When `x` is empty it sits in the empty slot of `parent`: the sibling side carries
    /// at least one black node more and therefore cannot also be empty.
    pub(super) fn delete_fixup(&mut self, mut x: Option<Handle>, mut parent: Option<Handle>) {
        while x != self.root && self.color(x) == Color::Black {
            let Some(p) = parent else {
                break;
            };
            let side = if self.node(p).child(Side::Left) == x {
                Side::Left
            } else {
                Side::Right
            };
            let far_side = side.opposite();

            let mut sibling = self.sibling(p, side);
            if self.node(sibling).color() == Color::Red {
                trace!("delete fixup: red sibling {sibling:?}, rotating at {p:?}");
                self.node_mut(sibling).set_color(Color::Black);
                self.node_mut(p).set_color(Color::Red);
                self.rotate(p, side);
                sibling = self.sibling(p, side);
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(far_side);
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                trace!("delete fixup: recolor {sibling:?}, deficit moves to {p:?}");
                self.node_mut(sibling).set_color(Color::Red);
                x = Some(p);
                parent = self.node(p).parent();
                continue;
            }

            if self.color(far) == Color::Black {
                trace!("delete fixup: red near nephew, rotating at {sibling:?}");
                if let Some(near) = near {
                    self.node_mut(near).set_color(Color::Black);
                }
                self.node_mut(sibling).set_color(Color::Red);
                self.rotate(sibling, far_side);
                sibling = self.sibling(p, side);
            }

            trace!("delete fixup: red far nephew, rotating at {p:?}");
            let parent_color = self.node(p).color();
            self.node_mut(sibling).set_color(parent_color);
            self.node_mut(p).set_color(Color::Black);
            if let Some(far) = self.node(sibling).child(far_side) {
                self.node_mut(far).set_color(Color::Black);
            }
            self.rotate(p, side);
            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.node_mut(x).set_color(Color::Black);
        }
    }

    fn sibling(&self, parent: Handle, side: Side) -> Handle {
        self.node(parent)
            .child(side.opposite())
            .expect("`RawRBTreeMap::delete_fixup()` - black-height deficit without a sibling!")
    }
}
