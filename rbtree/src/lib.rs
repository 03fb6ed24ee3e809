//! Intrusive, ordered, in-memory associative container backed by a
//! red-black tree.
//!
//! "Intrusive" means the tree does not allocate, own, or free anything: the
//! link a node needs to participate in a tree — parent pointer, two child
//! pointers, one color bit — lives embedded inside the caller's own struct,
//! and the caller is responsible for that struct's storage and lifetime.
//! [`Linked`] is the trait that lets the tree find that embedded link and
//! get back to the enclosing object; [`intrusive_adapter!`] implements it
//! for you from a field name.
//!
//! Four flavors share one implementation, monomorphized from [`Tree`] over a
//! cache policy:
//!
//! - [`RbTree`] — root pointer only.
//! - [`LCachedTree`] — plus an O(1) cached minimum.
//! - [`RCachedTree`] — plus an O(1) cached maximum.
//! - [`LRCachedTree`] — both.
//!
//! ```
//! use rbtree::{intrusive_adapter, node_init, RbTree};
//!
//! struct Item {
//!     link: rbtree::RbLink,
//!     key: i32,
//! }
//! intrusive_adapter!(Item, link);
//!
//! let mut a = Item { link: Default::default(), key: 3 };
//! let mut b = Item { link: Default::default(), key: 1 };
//! node_init(&mut a);
//! node_init(&mut b);
//!
//! let mut tree: RbTree<Item> = RbTree::new();
//! unsafe {
//!     tree.insert(&mut a, |x, y| x.key.cmp(&y.key));
//!     tree.insert(&mut b, |x, y| x.key.cmp(&y.key));
//!     assert_eq!(tree.first().unwrap().key, 1);
//! }
//! ```
//!
//! Every operation that walks or mutates a tree is `unsafe`: the compiler
//! cannot verify that a linked node is still the live object its embedded
//! link claims to point into. See [`Linked`] and [`Tree`] for the exact
//! contract. Nothing here allocates, performs I/O, or retries; a tree is not
//! `Send`/`Sync` and carries no internal locking — concurrent access is
//! entirely the caller's responsibility.
//!
//! The `safety-checks` feature (on by default) turns a violated
//! precondition on a hot path into a no-op or an absent result rather than
//! undefined behavior; see [`safety`] for the toggle this crate uses
//! internally.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

mod cache;
mod engine;
mod link;
mod safety;
mod tree;

pub use cache::{BothCache, CacheSlots, LeftCache, NoCache, RightCache};
pub use link::{Color, Linked, RbLink};
pub use tree::{next, node_init, prev, Iter, LCachedTree, LRCachedTree, RCachedTree, RbTree, Tree};

/// Re-exported so [`intrusive_adapter!`] can name `memoffset::offset_of!`
/// without requiring callers to depend on `memoffset` themselves.
#[doc(hidden)]
pub use memoffset;
