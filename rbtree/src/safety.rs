//! The `safety-checks` feature toggle.
//!
//! Mirrors the source library's `RB_UNSAFE` build switch and its
//! `RB_NULL_CHECK`/`RB_NULL_CHECK_V` macro pair (`rbtree.h`): with the
//! feature on, a failed precondition degrades to a no-op (or a sentinel for
//! value-returning calls); with it off, the check is compiled out entirely
//! and a violated precondition is simply undefined behavior in exchange for
//! one fewer branch per call. Observable behavior under well-formed inputs
//! is identical either way.
//!
//! `guard!(cond)` returns `()` early out of the enclosing function on
//! failure; `guard!(cond, sentinel)` returns `sentinel`.

#[cfg(feature = "safety-checks")]
macro_rules! guard {
    ($cond:expr) => {
        if !($cond) {
            return;
        }
    };
    ($cond:expr, $sentinel:expr) => {
        if !($cond) {
            return $sentinel;
        }
    };
}

#[cfg(not(feature = "safety-checks"))]
macro_rules! guard {
    ($cond:expr) => {
        debug_assert!($cond);
    };
    ($cond:expr, $sentinel:expr) => {
        debug_assert!($cond);
    };
}

pub(crate) use guard;
