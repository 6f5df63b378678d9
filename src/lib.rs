//! A red-black tree ordered map for Rust.
//!
//! This crate provides [`RBTreeMap`], an ordered key-value map whose API mirrors the standard
//! library's `BTreeMap`, backed by a classic red-black binary search tree:
//!
//! - Lookups, insertions and removals in O(log n) worst case
//! - Ascending and descending iteration without an auxiliary stack
//! - [`from_sorted_iter`](RBTreeMap::from_sorted_iter) - Linear-time construction of a
//!   minimum-height tree from sorted input
//!
//! # Example
//!
//! ```
//! use rb_tree_map::RBTreeMap;
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Keys come back in order.
//! let names: Vec<_> = scores.keys().copied().collect();
//! assert_eq!(names, ["Alice", "Bob", "Carol"]);
//!
//! // Sorted input skips per-insert balancing.
//! let squares = RBTreeMap::from_sorted_iter((1..=7).map(|n| (n, n * n)));
//! assert_eq!(squares[&4], 16);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Safe** - No `unsafe` code; nodes live in an index arena
//! - **Traceable** - Rotations and fixups are reported through the [`log`] facade at
//!   `trace` level
//!
//! # Implementation
//!
//! Nodes are stored in a slot arena and linked by non-zero indices. Child links own their
//! subtrees; each node also records its parent as a plain back-reference, which is what
//! rotations, fixups and in-order stepping navigate by.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod rbtree_map;

pub use rbtree_map::RBTreeMap;
