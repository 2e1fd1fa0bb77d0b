/// Bytes that must remain on the stack before a recursive step runs.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, moving to a fresh heap-allocated stack segment first when the
/// current one is close to exhausted.
///
/// The parser, the resolver and the evaluator enter every recursive step
/// through this. Their depth limits still apply on top of it, so scripts
/// fail with an error instead of growing the stack forever.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// Without stack switching on wasm the closure runs directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
