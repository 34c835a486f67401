//! Stack growth for recursive walks over nested vectors.
//!
//! Display, comparison, arithmetic and `chr` conversion all recurse once per
//! level of vector nesting. Each of those recursion points goes through
//! [`ensure_sufficient_stack`], which grows the stack on demand on native
//! targets and is a passthrough on `wasm32`.

/// Remaining stack below which we grow (100KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
