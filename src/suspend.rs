//! The suspension primitive (core spec §4.2).

use std::future::Future;

use tokio::runtime::Handle;

use crate::context::{BoxAny, BoxFuture, Outcome, Yielder};
use crate::error::{BridgeError, Result};
use crate::registry;

/// Re-occupies the registry slot this call vacated once `Yielder::suspend`
/// returns — including when it returns by way of a forced unwind (the
/// coroutine being dropped while suspended), so the registry is always
/// balanced by the time the driver's own pop-on-drop guard runs, whether
/// this frame is finishing normally or being torn down with it.
struct RepushGuard {
	yielder: *const Yielder,
	runtime: Handle
}

impl Drop for RepushGuard {
	fn drop(&mut self) {
		// Safety: see `await_from_sync` below — this pointer is still valid
		// for as long as this guard itself is reachable.
		unsafe { registry::push(self.yielder, self.runtime.clone()) };
	}
}

/// Suspends the calling synchronous frame until `fut` completes, returning
/// its result.
///
/// Valid only when called from a stack that is a descendant of a live
/// [`async_entry`](crate::async_entry) call on this OS thread — i.e. from
/// inside the callable `async_entry` adopted, or from any plain (non-async)
/// function that callable transitively calls, at any depth
/// (core spec §4.2: "only the stack identity matters, not the call depth").
///
/// # Errors
/// Returns [`BridgeError::IllegalContext`] if called with no enclosing
/// `async_entry` on this thread, and [`BridgeError::Cancelled`] if the
/// enclosing driver's cancellation token (see `EntryOptions::cancellation`)
/// fired while `fut` was outstanding.
///
/// # Panics
/// If `fut` itself panics while being polled, that panic is resumed here,
/// at the call site — not turned into an `Err` — so that a `catch_unwind`
/// around this call observes exactly what a direct `.await` would have
/// produced (core spec §7: exception fidelity, never rewrapped).
pub fn await_from_sync<F>(fut: F) -> Result<F::Output>
where
	F: Future + 'static,
	F::Output: 'static
{
	let (yielder, runtime) = registry::current().ok_or(BridgeError::IllegalContext)?;

	// This frame is about to stop being the one actively running on this
	// thread — a sibling or nested `async_entry` may become active while
	// we're parked, so the slot must be free for it.
	registry::pop();

	let boxed: BoxFuture = Box::pin(async move {
		let value = fut.await;

		Box::new(value) as BoxAny
	});

	let outcome = {
		let _repush = RepushGuard { yielder, runtime };

		/* Safety: `registry::current` only ever returns a pointer to the
		 * `Yielder` of the coroutine currently executing on this thread;
		 * that coroutine only resumes (normally or via forced unwind) once
		 * `suspend` below returns, and `yielder` stays valid for that
		 * entire span since the coroutine owning it is merely suspended,
		 * not dropped, until then. */
		unsafe { &*yielder }.suspend(boxed)
	};

	match outcome {
		Outcome::Value(value) => Ok(downcast(value)),
		Outcome::Panic(payload) => std::panic::resume_unwind(payload),
		Outcome::Cancelled => Err(BridgeError::Cancelled)
	}
}

#[allow(clippy::panic)]
fn downcast<T: 'static>(value: BoxAny) -> T {
	match value.downcast::<T>() {
		Ok(value) => *value,
		/* the driver only ever resumes with the output of the exact future
		 * this call just yielded, so the type always matches; this arm
		 * guards against a future change to the driver breaking that */
		Err(_) => unreachable!("corobridge: resumed with a value of the wrong type")
	}
}
