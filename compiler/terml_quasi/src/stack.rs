//! Stack safety for recursion over templates and specimens.
//!
//! Substitution and matching recurse once per tree level. Specimens can
//! come from outside, so each level checks the remaining stack and grows
//! it when needed instead of overflowing.
//!
//! - **Red zone**: 100KB - if less than this remains, grow the stack
//! - **Growth size**: 1MB per growth

const RED_ZONE: usize = 100 * 1024;

const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
