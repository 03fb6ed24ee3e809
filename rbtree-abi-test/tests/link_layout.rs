//! External, public-surface-only layout assertions for `RbLink`.
//!
//! Field-offset checks need private-field access and live as a unit test
//! inside `rbtree::link` instead; this crate only asserts what a downstream
//! consumer of the public API can observe: size, alignment, and the color
//! encoding `Linked` implementors are allowed to rely on.

use rbtree::{Color, RbLink};
use static_assertions::{assert_eq_align, assert_eq_size};

#[test]
fn rblink_is_three_words() {
    assert_eq!(core::mem::size_of::<RbLink>(), 3 * core::mem::size_of::<usize>());
}

#[test]
fn rblink_alignment_matches_a_pointer() {
    assert_eq!(core::mem::align_of::<RbLink>(), core::mem::align_of::<usize>());
}

assert_eq_size!(RbLink, [usize; 3]);
assert_eq_align!(RbLink, usize);

#[test]
fn color_values_fit_in_the_reserved_bit() {
    assert_eq!(Color::Red as usize, 0);
    assert_eq!(Color::Black as usize, 1);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn rblink_size_64bit() {
    assert_eq!(core::mem::size_of::<RbLink>(), 24);
}

#[cfg(target_pointer_width = "32")]
#[test]
fn rblink_size_32bit() {
    assert_eq!(core::mem::size_of::<RbLink>(), 12);
}

#[test]
fn fresh_link_round_trips_through_default() {
    let link = RbLink::default();
    // A freshly constructed, not-yet-placed link reports the transient
    // all-zero state; callers must run it through `rbtree::node_init` once
    // it has a stable address before it is a true disconnected sentinel.
    assert_eq!(core::mem::size_of_val(&link), 3 * core::mem::size_of::<usize>());
}
