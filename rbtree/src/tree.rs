//! The typed public surface: [`Tree`] and its four flavor aliases.

use crate::cache::{BothCache, CacheSlots, LeftCache, NoCache, RightCache};
use crate::engine;
use crate::link::{Color, Linked, RbLink};
use crate::safety::guard;
use core::cmp::Ordering;
use core::marker::PhantomData;
use core::ptr;

/// An intrusive, ordered, in-memory associative container backed by a
/// red-black tree, generic over the cache policy `C`.
///
/// Prefer the flavor aliases — [`RbTree`], [`LCachedTree`], [`RCachedTree`],
/// [`LRCachedTree`] — over naming `Tree` directly.
///
/// `Tree` does not own, allocate, or free the nodes it links: every method
/// that walks or mutates the structure is `unsafe`, because the compiler has
/// no way to verify that a node handed in is still the live object its
/// embedded link claims to point into, or that it outlives its membership
/// (see the resource-ownership contract on [`Linked`]). A tree is not
/// `Send`/`Sync`; concurrent access is entirely the caller's responsibility.
pub struct Tree<T: Linked, C: CacheSlots = NoCache> {
    root: *mut RbLink,
    cache: C,
    _marker: PhantomData<fn() -> T>,
}

/// Base tree: root pointer only.
pub type RbTree<T> = Tree<T, NoCache>;
/// Left-cached tree: base tree plus an O(1) cached minimum.
pub type LCachedTree<T> = Tree<T, LeftCache>;
/// Right-cached tree: base tree plus an O(1) cached maximum.
pub type RCachedTree<T> = Tree<T, RightCache>;
/// Both-cached tree: base tree plus O(1) cached minimum and maximum.
pub type LRCachedTree<T> = Tree<T, BothCache>;

impl<T: Linked, C: CacheSlots> Default for Tree<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resets `node`'s embedded link to the disconnected sentinel: parent
/// pointing at itself, both children absent. Every node must pass through
/// this once, after being placed at its final address, before its first
/// [`Tree::insert`] — the tree trusts a node hint or insert target is
/// disconnected rather than resetting it defensively (the stronger of the
/// two preconditions the source library's drafts disagree on; see
/// `DESIGN.md`).
pub fn node_init<T: Linked>(node: &mut T) {
    RbLink::disconnect(node.link_ptr());
}

impl<T: Linked, C: CacheSlots> Tree<T, C> {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            root: ptr::null_mut(),
            cache: C::default(),
            _marker: PhantomData,
        }
    }

    /// Whether the tree currently holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_null()
    }

    fn raw_cmp<F: FnMut(&T, &T) -> Ordering>(
        mut cmp: F,
    ) -> impl FnMut(*const RbLink, *const RbLink) -> Ordering {
        move |a, b| unsafe { cmp(T::from_link(a), T::from_link(b)) }
    }

    /// Inserts `node`, which must currently be disconnected (see
    /// [`node_init`]), preserving all invariants. May change the root.
    ///
    /// # Safety
    /// `node` must be disconnected and must outlive its membership in
    /// `self`.
    pub unsafe fn insert<F: FnMut(&T, &T) -> Ordering>(&mut self, node: &mut T, mut cmp: F) {
        let link = node.link_ptr();
        guard!(RbLink::is_disconnected(link));

        if C::HAS_MIN || C::HAS_MAX {
            self.note_insert(link, &mut cmp);
        }
        self.insert_from_root(link, cmp);
    }

    /// Inserts `node` starting the BST descent from `hint` instead of the
    /// root. `hint` must be a valid iterator into `self`; validity (`cmp(hint,
    /// node) < 0` and either `hint` has no successor or the successor
    /// compares `>= node`) is checked and, if it fails, this falls back to a
    /// plain root-anchored [`insert`](Self::insert) — never a precondition
    /// violation.
    ///
    /// # Safety
    /// `node` must be disconnected, `hint` must be an iterator into `self`,
    /// and `node` must outlive its membership in `self`.
    pub unsafe fn insert_at<F: FnMut(&T, &T) -> Ordering>(
        &mut self,
        node: &mut T,
        hint: &T,
        mut cmp: F,
    ) {
        let link = node.link_ptr();
        guard!(RbLink::is_disconnected(link));

        if C::HAS_MIN || C::HAS_MAX {
            self.note_insert(link, &mut cmp);
        }

        let hint_link = hint.link_ptr() as *const RbLink;
        let next_link = engine::next(hint_link);

        let hint_is_less = cmp(hint, &*node) == Ordering::Less;
        let successor_is_not_less =
            next_link.is_null() || cmp(T::from_link(next_link), &*node) != Ordering::Less;

        if hint_is_less && successor_is_not_less {
            engine::insert_basic(hint_link as *mut RbLink, link, &mut Self::raw_cmp(cmp));
            engine::insert_rebalance(link);
            self.root = engine::retrace_root(link);
        } else {
            self.insert_from_root(link, cmp);
        }
    }

    /// Shared tail of `insert`/`insert_at`'s fallback path: empty-tree base
    /// case, otherwise BST descent from the current root and fix-up. Does
    /// not touch the cache — callers already did that.
    unsafe fn insert_from_root<F: FnMut(&T, &T) -> Ordering>(&mut self, link: *mut RbLink, cmp: F) {
        if self.root.is_null() {
            (*link).set_parent_and_color(ptr::null_mut(), Color::Black);
            (*link).set_left(ptr::null_mut());
            (*link).set_right(ptr::null_mut());
            self.root = link;
            return;
        }

        let root = self.root;
        engine::insert_basic(root, link, &mut Self::raw_cmp(cmp));
        engine::insert_rebalance(link);
        self.root = engine::retrace_root(link);
    }

    /// Binary search for a node comparing equal to `key`. Among duplicates,
    /// returns the shallowest match.
    ///
    /// # Safety
    /// Every node currently in `self` must still be a live, unmoved `T`.
    pub unsafe fn find<F: FnMut(&T, &T) -> Ordering>(&self, key: &T, cmp: F) -> Option<&T> {
        let found = engine::find(self.root, key.link_ptr(), &mut Self::raw_cmp(cmp));
        if found.is_null() {
            None
        } else {
            Some(T::from_link(found))
        }
    }

    /// Locates a node equal to `key` via `find` and removes it, invoking
    /// `copy` to preserve the removed key's logical successor identity (see
    /// [`delete_at`](Self::delete_at)). A no-op, successfully, if nothing
    /// compares equal to `key`.
    ///
    /// # Safety
    /// Every node currently in `self` must still be a live, unmoved `T`,
    /// and `copy` must not touch either argument's embedded link.
    pub unsafe fn delete<F, Cp>(&mut self, key: &T, mut cmp: F, copy: Cp) -> Option<&T>
    where
        F: FnMut(&T, &T) -> Ordering,
        Cp: FnMut(&T, &mut T),
    {
        let target = engine::find(self.root, key.link_ptr(), &mut Self::raw_cmp(&mut cmp));
        if target.is_null() {
            return None;
        }
        self.delete_at(T::from_link_mut(target), cmp, copy)
    }

    /// Removes `node`, which must currently be in `self`, using
    /// copy-based deletion: the node actually unlinked from the graph is an
    /// in-order predecessor standing in for `node` when `node` has two
    /// children, not `node` itself; `copy` is invoked to move the
    /// predecessor's payload into `node` first; `copy` must not touch
    /// either argument's embedded link. `node` is left disconnected.
    /// Returns the node that followed the removed key, if any.
    ///
    /// # Safety
    /// `node` must currently be a member of `self`, and `copy` must not
    /// touch either argument's embedded link.
    pub unsafe fn delete_at<F, Cp>(&mut self, node: &mut T, mut cmp: F, mut copy: Cp) -> Option<&T>
    where
        F: FnMut(&T, &T) -> Ordering,
        Cp: FnMut(&T, &mut T),
    {
        let link = node.link_ptr();

        if C::HAS_MIN || C::HAS_MAX {
            self.note_pre_delete(link, &mut cmp);
        }

        let mut raw_copy = |src: *const RbLink, dst: *mut RbLink| {
            copy(T::from_link(src), T::from_link_mut(dst));
        };
        let outcome = engine::delete_at(link, &mut raw_copy);
        self.root = outcome.new_root;

        if self.root.is_null() {
            self.cache.clear();
        }

        if outcome.next.is_null() {
            None
        } else {
            Some(T::from_link(outcome.next))
        }
    }

    unsafe fn note_insert<F: FnMut(&T, &T) -> Ordering>(&mut self, link: *mut RbLink, cmp: &mut F) {
        if C::HAS_MIN {
            let min = self.cache.min_link();
            if min.is_null() || cmp(T::from_link(link), T::from_link(min)) != Ordering::Greater {
                self.cache.set_min_link(link);
            }
        }
        if C::HAS_MAX {
            let max = self.cache.max_link();
            if max.is_null() || cmp(T::from_link(link), T::from_link(max)) != Ordering::Less {
                self.cache.set_max_link(link);
            }
        }
    }

    unsafe fn note_pre_delete<F: FnMut(&T, &T) -> Ordering>(
        &mut self,
        link: *mut RbLink,
        cmp: &mut F,
    ) {
        if C::HAS_MIN {
            let min = self.cache.min_link();
            if !min.is_null() && cmp(T::from_link(link), T::from_link(min)) == Ordering::Equal {
                self.cache.set_min_link(engine::next(min));
            }
        }
        if C::HAS_MAX {
            let max = self.cache.max_link();
            if !max.is_null() && cmp(T::from_link(link), T::from_link(max)) == Ordering::Equal {
                self.cache.set_max_link(engine::prev(max));
            }
        }
    }

    /// The leftmost (minimum) node, or `None` if empty. O(log N); cache
    /// flavors expose an O(1) `min()` instead (see their inherent impls).
    ///
    /// # Safety
    /// Every node currently in `self` must still be a live, unmoved `T`.
    pub unsafe fn first(&self) -> Option<&T> {
        let n = engine::first(self.root);
        if n.is_null() {
            None
        } else {
            Some(T::from_link(n))
        }
    }

    /// The rightmost (maximum) node, or `None` if empty.
    ///
    /// # Safety
    /// Every node currently in `self` must still be a live, unmoved `T`.
    pub unsafe fn last(&self) -> Option<&T> {
        let n = engine::last(self.root);
        if n.is_null() {
            None
        } else {
            Some(T::from_link(n))
        }
    }

    /// Applies `cb` to every node in ascending order. `cb` must not insert
    /// or remove nodes; doing so is undefined.
    ///
    /// # Safety
    /// Every node currently in `self` must still be a live, unmoved `T`.
    pub unsafe fn inorder_foreach<F: FnMut(&T)>(&self, mut cb: F) {
        engine::inorder_foreach(self.root, &mut |link| cb(T::from_link(link)));
    }

    /// Applies `cb` to every node, visiting a node before its subtrees.
    ///
    /// # Safety
    /// Every node currently in `self` must still be a live, unmoved `T`.
    pub unsafe fn preorder_foreach<F: FnMut(&T)>(&self, mut cb: F) {
        engine::preorder_foreach(self.root, &mut |link| cb(T::from_link(link)));
    }

    /// Applies `cb` to every node, visiting a node after its subtrees.
    ///
    /// # Safety
    /// Every node currently in `self` must still be a live, unmoved `T`.
    pub unsafe fn postorder_foreach<F: FnMut(&T)>(&self, mut cb: F) {
        engine::postorder_foreach(self.root, &mut |link| cb(T::from_link(link)));
    }

    /// A forward iterator over the tree in ascending order.
    ///
    /// # Safety
    /// Every node currently in `self` must still be a live, unmoved `T`,
    /// for as long as the returned iterator is used.
    pub unsafe fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: engine::first(self.root),
            next_back: engine::last(self.root),
            _marker: PhantomData,
        }
    }
}

impl<T: Linked> Tree<T, LeftCache> {
    /// The cached minimum node, in O(1).
    ///
    /// # Safety
    /// The cached node must still be a live, unmoved `T`.
    pub unsafe fn min(&self) -> Option<&T> {
        let n = self.cache.min_link();
        if n.is_null() {
            None
        } else {
            Some(T::from_link(n))
        }
    }
}

impl<T: Linked> Tree<T, RightCache> {
    /// The cached maximum node, in O(1).
    ///
    /// # Safety
    /// The cached node must still be a live, unmoved `T`.
    pub unsafe fn max(&self) -> Option<&T> {
        let n = self.cache.max_link();
        if n.is_null() {
            None
        } else {
            Some(T::from_link(n))
        }
    }
}

impl<T: Linked> Tree<T, BothCache> {
    /// The cached minimum node, in O(1).
    ///
    /// # Safety
    /// The cached node must still be a live, unmoved `T`.
    pub unsafe fn min(&self) -> Option<&T> {
        let n = self.cache.min_link();
        if n.is_null() {
            None
        } else {
            Some(T::from_link(n))
        }
    }

    /// The cached maximum node, in O(1).
    ///
    /// # Safety
    /// The cached node must still be a live, unmoved `T`.
    pub unsafe fn max(&self) -> Option<&T> {
        let n = self.cache.max_link();
        if n.is_null() {
            None
        } else {
            Some(T::from_link(n))
        }
    }
}

/// Returns the in-order successor of `node`, or `None` if `node` is the
/// last element of its tree. Free function rather than a `Tree` method
/// because an iterator's traversal doesn't depend on which tree flavor
/// produced it — it needs only the link graph.
///
/// # Safety
/// `node` must currently be a member of some tree, and every node it is
/// linked to must still be a live, unmoved `T`.
pub unsafe fn next<T: Linked>(node: &T) -> Option<&T> {
    let n = engine::next(node.link_ptr());
    if n.is_null() {
        None
    } else {
        Some(T::from_link(n))
    }
}

/// Returns the in-order predecessor of `node`, or `None` if `node` is the
/// first element of its tree.
///
/// # Safety
/// `node` must currently be a member of some tree, and every node it is
/// linked to must still be a live, unmoved `T`.
pub unsafe fn prev<T: Linked>(node: &T) -> Option<&T> {
    let n = engine::prev(node.link_ptr());
    if n.is_null() {
        None
    } else {
        Some(T::from_link(n))
    }
}

/// A forward/backward iterator over a tree's nodes in ascending order,
/// produced by [`Tree::iter`].
pub struct Iter<'a, T> {
    next: *mut RbLink,
    next_back: *mut RbLink,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: Linked> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }
        let current = self.next;
        if current == self.next_back {
            self.next = ptr::null_mut();
            self.next_back = ptr::null_mut();
        } else {
            self.next = engine::next(current);
        }
        Some(unsafe { T::from_link(current) })
    }
}

impl<'a, T: Linked> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next_back.is_null() {
            return None;
        }
        let current = self.next_back;
        if current == self.next {
            self.next = ptr::null_mut();
            self.next_back = ptr::null_mut();
        } else {
            self.next_back = engine::prev(current);
        }
        Some(unsafe { T::from_link(current) })
    }
}
