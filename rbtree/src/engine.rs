//! The balancing kernel: rotations, insert/delete fix-up, and search,
//! expressed purely over `*mut RbLink`.
//!
//! Every function here is blind to the caller's element type — comparisons
//! and copies are supplied as closures already resolved to `RbLink`
//! pointers by [`crate::tree::Tree`]. Keeping this layer untyped is what lets
//! the four cache flavors (and any future one) share a single copy of the
//! ~45% of the source that is rotations and fix-up loops.
//!
//! Absent links are represented the same way the source does: a null
//! pointer, not `Option`. The typed layer in `tree.rs` is where null becomes
//! `Option`/`&T`.

use crate::link::{Color, RbLink};
use core::cmp::Ordering;
use core::ptr;

pub(crate) type CmpFn<'a> = dyn FnMut(*const RbLink, *const RbLink) -> Ordering + 'a;
pub(crate) type CopyFn<'a> = dyn FnMut(*const RbLink, *mut RbLink) + 'a;

#[inline]
fn is_red(n: *const RbLink) -> bool {
    !n.is_null() && unsafe { (*n).is_red() }
}

#[inline]
fn is_black(n: *const RbLink) -> bool {
    n.is_null() || unsafe { (*n).is_black() }
}

#[inline]
fn parent_of(n: *const RbLink) -> *mut RbLink {
    if n.is_null() {
        ptr::null_mut()
    } else {
        unsafe { (*n).parent() }
    }
}

/// The other child of `node`'s parent, or null if `node` is the root or an
/// only child.
fn sibling(node: *const RbLink) -> *mut RbLink {
    let parent = parent_of(node);
    if parent.is_null() {
        return ptr::null_mut();
    }
    unsafe {
        if (*parent).left() == node as *mut RbLink {
            (*parent).right()
        } else {
            (*parent).left()
        }
    }
}

/// Rewrites whichever child slot of `parent` points at `old` to point at
/// `new`, and reparents `new`. With `parent` null this only reparents `new`
/// — used when a rotation or fix-up promotes a new subtree root.
fn replace_child(parent: *mut RbLink, old: *mut RbLink, new: *mut RbLink) {
    unsafe {
        if !parent.is_null() {
            if (*parent).left() == old {
                (*parent).set_left(new);
            } else if (*parent).right() == old {
                (*parent).set_right(new);
            }
        }
        if !new.is_null() {
            (*new).set_parent(parent);
        }
    }
}

fn rotate_left(root: *mut RbLink) {
    unsafe {
        let upper = (*root).parent();
        let pivot = (*root).right();

        (*root).set_right((*pivot).left());
        if !(*root).right().is_null() {
            (*(*root).right()).set_parent(root);
        }

        (*pivot).set_left(root);
        (*root).set_parent(pivot);

        (*pivot).set_parent(upper);
        replace_child(upper, root, pivot);
    }
}

fn rotate_right(root: *mut RbLink) {
    unsafe {
        let upper = (*root).parent();
        let pivot = (*root).left();

        (*root).set_left((*pivot).right());
        if !(*root).left().is_null() {
            (*(*root).left()).set_parent(root);
        }

        (*pivot).set_right(root);
        (*root).set_parent(pivot);

        (*pivot).set_parent(upper);
        replace_child(upper, root, pivot);
    }
}

/// Walks parent links up from `from` to the current root of its tree.
/// Rotations never update a `Tree`'s root field directly (mirroring the
/// source, which only ever mutates node-local links during fix-up) so every
/// mutating operation ends with one of these retraces before storing the
/// result back into `Tree::root`.
pub(crate) fn retrace_root(mut from: *mut RbLink) -> *mut RbLink {
    unsafe {
        while !(*from).parent().is_null() {
            from = (*from).parent();
        }
    }
    from
}

/// Standard BST descent from `root`, attaching `node` as a red leaf. Ties
/// go right.
pub(crate) fn insert_basic(root: *mut RbLink, node: *mut RbLink, cmp: &mut CmpFn<'_>) {
    let mut cursor = root;
    let mut cursor_parent = ptr::null_mut();
    let mut went_left = false;

    while !cursor.is_null() {
        cursor_parent = cursor;
        if cmp(node, cursor) == Ordering::Less {
            went_left = true;
            cursor = unsafe { (*cursor).left() };
        } else {
            went_left = false;
            cursor = unsafe { (*cursor).right() };
        }
    }

    unsafe {
        (*node).set_parent_and_color(cursor_parent, Color::Red);
        (*node).set_left(ptr::null_mut());
        (*node).set_right(ptr::null_mut());
        if went_left {
            (*cursor_parent).set_left(node);
        } else {
            (*cursor_parent).set_right(node);
        }
    }
}

/// Red-black insert fix-up (CLRS `RB-INSERT-FIXUP`). `node` is the freshly
/// attached red leaf; colors and rotations propagate upward until the
/// red-has-black-children invariant is restored.
pub(crate) fn insert_rebalance(mut node: *mut RbLink) {
    loop {
        let parent = parent_of(node);
        if parent.is_null() {
            unsafe { (*node).set_color(Color::Black) };
            return;
        }
        if is_black(node) || is_black(parent) {
            return;
        }

        let grandparent = parent_of(parent);
        let uncle = sibling(parent);

        if is_red(uncle) {
            unsafe {
                (*parent).set_color(Color::Black);
                (*uncle).set_color(Color::Black);
                (*grandparent).set_color(Color::Red);
            }
            node = grandparent;
            continue;
        }

        let parent_is_left = unsafe { (*grandparent).left() == parent };
        let node_is_left = unsafe { (*parent).left() == node };

        if parent_is_left && node_is_left {
            // left-left
            swap_colors(parent, grandparent);
            rotate_right(grandparent);
        } else if parent_is_left {
            // left-right: rotate into left-left, then re-read the frame of
            // reference (the old parent is now the pivot's child) and apply
            // the left-left case to it.
            rotate_left(parent);
            let center = parent;
            let center_parent = parent_of(center);
            let center_grandparent = parent_of(center_parent);
            swap_colors(center_parent, center_grandparent);
            rotate_right(center_grandparent);
        } else if node_is_left {
            // right-left: mirror of left-right.
            rotate_right(parent);
            let center = parent;
            let center_parent = parent_of(center);
            let center_grandparent = parent_of(center_parent);
            swap_colors(center_parent, center_grandparent);
            rotate_left(center_grandparent);
        } else {
            // right-right: mirror of left-left.
            swap_colors(parent, grandparent);
            rotate_left(grandparent);
        }
        return;
    }
}

fn swap_colors(a: *mut RbLink, b: *mut RbLink) {
    unsafe {
        let a_color = (*a).color();
        (*a).set_color((*b).color());
        (*b).set_color(a_color);
    }
}

/// Binary search from `anchor`; returns the shallowest node comparing equal
/// to `key`, or null.
pub(crate) fn find(anchor: *const RbLink, key: *const RbLink, cmp: &mut CmpFn<'_>) -> *mut RbLink {
    let mut cursor = anchor as *mut RbLink;
    while !cursor.is_null() {
        match cmp(key, cursor) {
            Ordering::Less => cursor = unsafe { (*cursor).left() },
            Ordering::Equal => break,
            Ordering::Greater => cursor = unsafe { (*cursor).right() },
        }
    }
    cursor
}

pub(crate) fn first(anchor: *const RbLink) -> *mut RbLink {
    if anchor.is_null() {
        return ptr::null_mut();
    }
    let mut cursor = anchor as *mut RbLink;
    unsafe {
        while !(*cursor).left().is_null() {
            cursor = (*cursor).left();
        }
    }
    cursor
}

pub(crate) fn last(anchor: *const RbLink) -> *mut RbLink {
    if anchor.is_null() {
        return ptr::null_mut();
    }
    let mut cursor = anchor as *mut RbLink;
    unsafe {
        while !(*cursor).right().is_null() {
            cursor = (*cursor).right();
        }
    }
    cursor
}

/// In-order successor: leftmost of the right subtree if one exists,
/// otherwise the first ancestor we are a left descendant of.
pub(crate) fn next(node: *const RbLink) -> *mut RbLink {
    if node.is_null() || RbLink::is_disconnected(node) {
        return ptr::null_mut();
    }
    unsafe {
        if !(*node).right().is_null() {
            return first((*node).right());
        }
        let mut cursor = node as *mut RbLink;
        let mut cursor_parent = (*cursor).parent();
        while !cursor_parent.is_null() && cursor == (*cursor_parent).right() {
            cursor = cursor_parent;
            cursor_parent = (*cursor_parent).parent();
        }
        cursor_parent
    }
}

/// In-order predecessor, symmetric to [`next`].
pub(crate) fn prev(node: *const RbLink) -> *mut RbLink {
    if node.is_null() || RbLink::is_disconnected(node) {
        return ptr::null_mut();
    }
    unsafe {
        if !(*node).left().is_null() {
            return last((*node).left());
        }
        let mut cursor = node as *mut RbLink;
        let mut cursor_parent = (*cursor).parent();
        while !cursor_parent.is_null() && cursor == (*cursor_parent).left() {
            cursor = cursor_parent;
            cursor_parent = (*cursor_parent).parent();
        }
        cursor_parent
    }
}

/// The node that should take `target`'s place once it is removed: the
/// in-order predecessor if `target` has two children, its sole child if it
/// has exactly one, or null if it is a leaf.
///
/// The source keeps both a predecessor and a successor variant across its
/// drafts and is explicit that either is correct as long as the choice is
/// applied consistently (see the delete fix-up ordering note). This crate
/// follows the predecessor choice, matching the call site actually wired
/// into deletion.
fn predecessor(target: *const RbLink) -> *mut RbLink {
    unsafe {
        let left = (*target).left();
        let right = (*target).right();
        if !left.is_null() && !right.is_null() {
            prev(target)
        } else if !right.is_null() {
            right
        } else {
            left
        }
    }
}

/// Splices `target`'s single (or absent) child into its slot and resets
/// `target` to the disconnected state.
fn unlink(target: *mut RbLink) {
    unsafe {
        let child = if !(*target).left().is_null() {
            (*target).left()
        } else {
            (*target).right()
        };
        let parent = (*target).parent();
        replace_child(parent, target, child);
        RbLink::disconnect(target);
    }
}

/// Copy-based physical delete: if `replacement` exists, overwrite `target`'s
/// payload from it via `copy` and unlink `replacement` instead of `target`;
/// otherwise unlink `target` directly. `copy` must not touch link fields —
/// enforced by construction, since it only ever receives user payload
/// accessors, never `RbLink`s, once wrapped by [`crate::tree::Tree`].
fn move_and_delete(replacement: *mut RbLink, target: *mut RbLink, copy: &mut CopyFn<'_>) {
    if !replacement.is_null() {
        copy(replacement, target);
        unlink(replacement);
    } else {
        unlink(target);
    }
}

/// Red-black delete fix-up (CLRS `RB-DELETE-FIXUP`), centered on the node
/// standing in for a removed black node.
pub(crate) fn delete_rebalance(mut node: *mut RbLink) {
    loop {
        let parent = parent_of(node);
        if parent.is_null() {
            if !node.is_null() {
                unsafe { (*node).set_color(Color::Black) };
            }
            return;
        }
        if is_red(node) {
            unsafe { (*node).set_color(Color::Black) };
            return;
        }

        let mut sib = sibling(node);

        // Case 1: red sibling. Rotate it into the parent's place so we land
        // on a black sibling for the remaining cases.
        if is_red(sib) {
            unsafe {
                (*sib).set_color(Color::Black);
                (*parent).set_color(Color::Red);
            }
            if sib == unsafe { (*parent).right() } {
                rotate_left(parent);
            } else {
                rotate_right(parent);
            }
            sib = sibling(node);
        }

        let sib_left = if sib.is_null() { ptr::null_mut() } else { unsafe { (*sib).left() } };
        let sib_right = if sib.is_null() { ptr::null_mut() } else { unsafe { (*sib).right() } };

        // Case 2: both of the sibling's children are black (or absent).
        // Push the double-black up to the parent and continue.
        if is_black(sib_left) && is_black(sib_right) {
            unsafe { (*sib).set_color(Color::Red) };
            node = parent;
            continue;
        }

        if sib == unsafe { (*parent).right() } {
            // Case 3: far (right) child black, near (left) child red —
            // rotate the red into the far position first.
            if is_black(sib_right) {
                unsafe {
                    (*sib_left).set_color(Color::Black);
                    (*sib).set_color(Color::Red);
                }
                rotate_right(sib);
                sib = sibling(node);
            }
            // Case 4: far child red — one rotation finishes the fix-up.
            let sib_right = unsafe { (*sib).right() };
            unsafe {
                (*sib).set_color((*parent).color());
                (*parent).set_color(Color::Black);
                (*sib_right).set_color(Color::Black);
            }
            rotate_left(parent);
            return;
        } else {
            if is_black(sib_left) {
                unsafe {
                    (*sib_right).set_color(Color::Black);
                    (*sib).set_color(Color::Red);
                }
                rotate_left(sib);
                sib = sibling(node);
            }
            let sib_left = unsafe { (*sib).left() };
            unsafe {
                (*sib).set_color((*parent).color());
                (*parent).set_color(Color::Black);
                (*sib_left).set_color(Color::Black);
            }
            rotate_right(parent);
            return;
        }
    }
}

/// Result of a full delete: what to store back as the tree root (null if
/// the tree is now empty) and the iterator to whatever followed the removed
/// key, captured before the physical unlink invalidated `target`'s links.
pub(crate) struct DeleteOutcome {
    pub(crate) new_root: *mut RbLink,
    pub(crate) next: *mut RbLink,
}

/// Removes `target` from the tree rooted wherever its parent chain leads,
/// following the source's rebalance-before-unlink ordering: fix-up runs on
/// the replacement (or target itself, if it has no two-children
/// replacement) while the graph still contains it, so black-height is
/// already restored by the time the physical splice happens.
pub(crate) fn delete_at(target: *mut RbLink, copy: &mut CopyFn<'_>) -> DeleteOutcome {
    let replacement = predecessor(target);

    if !replacement.is_null() {
        delete_rebalance(replacement);
    } else {
        delete_rebalance(target);
    }

    let mut cursor = target;
    unsafe {
        while !(*cursor).parent().is_null() {
            cursor = (*cursor).parent();
        }
    }

    let next = next(target);
    move_and_delete(replacement, target, copy);

    let new_root = if RbLink::is_disconnected(cursor) {
        ptr::null_mut()
    } else {
        cursor
    };

    DeleteOutcome { new_root, next }
}

pub(crate) fn inorder_foreach(anchor: *mut RbLink, cb: &mut dyn FnMut(*mut RbLink)) {
    if anchor.is_null() {
        return;
    }
    unsafe {
        inorder_foreach((*anchor).left(), cb);
        cb(anchor);
        inorder_foreach((*anchor).right(), cb);
    }
}

pub(crate) fn preorder_foreach(anchor: *mut RbLink, cb: &mut dyn FnMut(*mut RbLink)) {
    if anchor.is_null() {
        return;
    }
    unsafe {
        cb(anchor);
        preorder_foreach((*anchor).left(), cb);
        preorder_foreach((*anchor).right(), cb);
    }
}

pub(crate) fn postorder_foreach(anchor: *mut RbLink, cb: &mut dyn FnMut(*mut RbLink)) {
    if anchor.is_null() {
        return;
    }
    unsafe {
        postorder_foreach((*anchor).left(), cb);
        postorder_foreach((*anchor).right(), cb);
        cb(anchor);
    }
}
