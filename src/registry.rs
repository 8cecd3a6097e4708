//! Thread-local frame registry.
//!
//! Resolves the "implicit parent lookup" question from the core spec's
//! Design Notes (§9) the way it explicitly sanctions: "an explicit registry
//! keyed by the current task handle" standing in for walking a
//! coroutine-parent pointer. `corosensei` hands a coroutine's [`Yielder`]
//! to its entry closure by value rather than exposing a global `current()`,
//! so [`await_from_sync`](crate::await_from_sync) needs some other way to
//! find its way back to the driver from arbitrary call depth — this slot
//! is it.
//!
//! This holds at most one frame, not a stack: exactly one coroutine is ever
//! actively running synchronous code on a given OS thread at a time (core
//! spec §5, "cooperative, two-party"), including when several `async_entry`
//! invocations are in flight concurrently or nested inside one another —
//! each one's frame is only present here while its code is the code
//! actually running, and is popped *before* it suspends, then re-pushed
//! only once it is resumed ([`await_from_sync`](crate::await_from_sync)
//! does both halves of that swap around its call to `Yielder::suspend`). A
//! frame that is merely parked, waiting on its own yielded future, holds no
//! slot at all — so a sibling or nested invocation that becomes active in
//! the meantime can never collide with, or be shadowed by, a frame that
//! isn't actually executing right now.

use std::cell::RefCell;

use tokio::runtime::Handle;

use crate::context::{Frame, Yielder};

thread_local! {
	static FRAME: RefCell<Option<Frame>> = const { RefCell::new(None) };
}

/// Occupies this OS thread's slot with the frame of the coroutine that is
/// about to run (or has just resumed running) synchronous code.
///
/// # Safety
/// `yielder` must stay valid — i.e. the coroutine that owns it must still
/// be running on this call stack — until the matching [`pop`] call.
pub(crate) unsafe fn push(yielder: *const Yielder, runtime: Handle) {
	FRAME.with(|frame| {
		let previous = frame.borrow_mut().replace(Frame { yielder, runtime });

		debug_assert!(
			previous.is_none(),
			"corobridge: registry slot already occupied by another frame"
		);
	});
}

/// Vacates this OS thread's slot.
///
/// Must be called exactly once for every [`push`]: right before the
/// pushing coroutine suspends, or once it has returned or unwound for
/// good.
#[allow(clippy::expect_used)]
pub(crate) fn pop() {
	FRAME.with(|frame| {
		frame
			.borrow_mut()
			.take()
			.expect("corobridge: frame registry underflow (push/pop mismatch)");
	});
}

/// Returns this thread's active frame, if any.
///
/// A call to [`await_from_sync`](crate::await_from_sync) is legal (core
/// spec §3 invariant 1) iff this returns `Some`; the returned frame is by
/// construction the caller's own — only one coroutine is ever actively
/// running on a thread at once (core spec §4.2: "only the stack identity
/// matters, not the call depth").
pub(crate) fn current() -> Option<(*const Yielder, Handle)> {
	FRAME.with(|frame| frame.borrow().as_ref().map(|frame| (frame.yielder, frame.runtime.clone())))
}
