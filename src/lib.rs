//! Ordered symbol tables on a left-leaning red-black tree.
//!
//! This crate provides [`RBTreeMap`] and [`RBTreeSet`], ordered collections whose API
//! follows the standard library's `BTreeMap` and `BTreeSet`, plus the classic
//! symbol-table order statistics, each in O(log n):
//!
//! - [`min_key`](RBTreeMap::min_key) / [`max_key`](RBTreeMap::max_key) - The smallest and largest key
//! - [`floor`](RBTreeMap::floor) / [`ceiling`](RBTreeMap::ceiling) - The nearest key at or below / above a probe
//! - [`rank`](RBTreeMap::rank) - The number of keys smaller than a probe
//! - [`select`](RBTreeMap::select) - The key with a given number of smaller keys
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first element
//!
//! # Example
//!
//! ```
//! use llrb_tree::{RBTreeMap, Rank};
//!
//! let mut st = RBTreeMap::new();
//! for (key, value) in [(3, "Three"), (1, "One"), (2, "Two"), (4, "Four"), (10, "Ten")] {
//!     st.insert(key, value);
//! }
//!
//! // Standard map operations work as expected
//! assert_eq!(st.get(&2), Some(&"Two"));
//! assert_eq!(st.len(), 5);
//!
//! // Order statistics
//! assert_eq!(st.floor(&7), Some(&4));
//! assert_eq!(st.ceiling(&5), Some(&10));
//! assert_eq!(st.rank(&10), 4);
//! assert_eq!(st.select(3), Ok(&4));
//! assert_eq!(st[Rank(0)], "One");
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Nodes are owned through `Box`; iterators borrow them
//! - **Guaranteed balance** - The height never exceeds `2 * log2(n + 1)`
//! - **Checkable** - [`RBTreeMap::check_invariants`] verifies every structural invariant
//!
//! # Implementation
//!
//! The tree is Sedgewick's left-leaning red-black tree, a binary encoding of a 2-3 tree in
//! which every 3-node is a black node with a red left child. Every node records the size of
//! its subtree, which makes rank and select logarithmic. Mutations recurse from the root and
//! rebuild the path on the way back, so nodes need no parent pointers.
//!
//! Instrumentation is opt-in: pass a [`Probe`] such as [`Counters`] to
//! [`RBTreeMap::get_probed`] or [`RBTreeMap::insert_probed`]. Structural mutations emit
//! `tracing` events at the `trace` level.

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

mod error;
mod order_statistic;
mod probe;
mod raw;
mod tree_shape;

pub mod rb_tree_map;
pub mod rb_tree_set;

pub use error::{Error, InvariantViolation};
pub use order_statistic::Rank;
pub use probe::{Counters, Probe};
pub use rb_tree_map::RBTreeMap;
pub use rb_tree_set::RBTreeSet;
pub use tree_shape::TreeShape;
