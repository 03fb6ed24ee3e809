//! Cache-variant policies shared by the four tree flavors.
//!
//! The source library hand-duplicates every insert/delete entry point four
//! times (plain, lcached, rcached, lrcached) because C has no generics. The
//! balancing kernel underneath is identical in all four; only the few lines
//! that touch the min/max cache differ. [`Tree`](crate::Tree) is generic over
//! a [`CacheSlots`] implementation instead, so the duplication collapses to
//! one generic struct plus four zero-sized policy types, monomorphized back
//! down to the same four concrete trees the spec describes.

use crate::link::RbLink;
use core::ptr;

/// Storage and update policy for a tree's optional min/max cache.
///
/// `HAS_MIN`/`HAS_MAX` let [`Tree`](crate::Tree) skip cache bookkeeping
/// entirely at compile time for flavors that don't track a given side —
/// the plain tree's `note_insert`/`note_pre_delete` calls are inlined away
/// to nothing.
pub trait CacheSlots: Default {
    /// Whether this policy tracks a minimum.
    const HAS_MIN: bool;
    /// Whether this policy tracks a maximum.
    const HAS_MAX: bool;

    /// The cached minimum, or null if untracked or the tree is empty.
    fn min_link(&self) -> *mut RbLink;
    /// The cached maximum, or null if untracked or the tree is empty.
    fn max_link(&self) -> *mut RbLink;
    /// Overwrites the cached minimum. A no-op on policies that don't track one.
    fn set_min_link(&mut self, n: *mut RbLink);
    /// Overwrites the cached maximum. A no-op on policies that don't track one.
    fn set_max_link(&mut self, n: *mut RbLink);

    /// Resets both slots to null, for when the tree becomes empty.
    fn clear(&mut self) {
        self.set_min_link(ptr::null_mut());
        self.set_max_link(ptr::null_mut());
    }
}

/// Base tree: no cache, root pointer only.
#[derive(Debug, Default)]
pub struct NoCache;

impl CacheSlots for NoCache {
    const HAS_MIN: bool = false;
    const HAS_MAX: bool = false;

    fn min_link(&self) -> *mut RbLink {
        ptr::null_mut()
    }
    fn max_link(&self) -> *mut RbLink {
        ptr::null_mut()
    }
    fn set_min_link(&mut self, _n: *mut RbLink) {}
    fn set_max_link(&mut self, _n: *mut RbLink) {}
}

/// Left-cached tree: base tree plus a cached leftmost (minimum) node.
#[derive(Debug, Default)]
pub struct LeftCache {
    min: *mut RbLink,
}

impl CacheSlots for LeftCache {
    const HAS_MIN: bool = true;
    const HAS_MAX: bool = false;

    fn min_link(&self) -> *mut RbLink {
        self.min
    }
    fn max_link(&self) -> *mut RbLink {
        ptr::null_mut()
    }
    fn set_min_link(&mut self, n: *mut RbLink) {
        self.min = n;
    }
    fn set_max_link(&mut self, _n: *mut RbLink) {}
}

/// Right-cached tree: base tree plus a cached rightmost (maximum) node.
#[derive(Debug, Default)]
pub struct RightCache {
    max: *mut RbLink,
}

impl CacheSlots for RightCache {
    const HAS_MIN: bool = false;
    const HAS_MAX: bool = true;

    fn min_link(&self) -> *mut RbLink {
        ptr::null_mut()
    }
    fn max_link(&self) -> *mut RbLink {
        self.max
    }
    fn set_min_link(&mut self, _n: *mut RbLink) {}
    fn set_max_link(&mut self, n: *mut RbLink) {
        self.max = n;
    }
}

/// Both-cached tree: base tree plus cached minimum and maximum nodes.
#[derive(Debug, Default)]
pub struct BothCache {
    min: *mut RbLink,
    max: *mut RbLink,
}

impl CacheSlots for BothCache {
    const HAS_MIN: bool = true;
    const HAS_MAX: bool = true;

    fn min_link(&self) -> *mut RbLink {
        self.min
    }
    fn max_link(&self) -> *mut RbLink {
        self.max
    }
    fn set_min_link(&mut self, n: *mut RbLink) {
        self.min = n;
    }
    fn set_max_link(&mut self, n: *mut RbLink) {
        self.max = n;
    }
}
