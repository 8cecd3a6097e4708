//! The driver: `async_entry` and `async_entry_with` (core spec §4.1).

use std::panic::AssertUnwindSafe;

use corosensei::{Coroutine, CoroutineResult};
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::context::{BoxFuture, Coro, Outcome};
use crate::error::{BridgeError, Result};
use crate::registry;

/// Pops this child's frame off the thread-local registry when dropped,
/// including when dropped by a panic unwinding through the coroutine's own
/// stack, so a panicking callable never leaves the registry unbalanced.
struct PopGuard;

impl Drop for PopGuard {
	fn drop(&mut self) {
		registry::pop();
	}
}

/// Warns if `async_entry`'s own future is dropped while its callable is
/// still suspended mid-`await_from_sync` — e.g. the surrounding task was
/// cancelled out from under it. `corosensei` force-unwinds the abandoned
/// coroutine stack when that happens (running `PopGuard` along the way), but
/// the callable never gets to finish, so this is the one case worth flagging.
struct AbandonedGuard(bool);

impl Drop for AbandonedGuard {
	fn drop(&mut self) {
		if !self.0 {
			tracing::warn!(
				"async_entry: future dropped while its callable was still suspended; \
				 the child coroutine's stack is being abandoned"
			);
		}
	}
}

/// Options for [`async_entry_with`].
#[derive(Default)]
pub struct EntryOptions {
	/// Fail with [`BridgeError::NoSuspension`] if the adopted callable
	/// returns without ever calling [`await_from_sync`](crate::await_from_sync).
	///
	/// Defaults to `false`: the core spec treats this as a matter of
	/// caller policy, not a fixed protocol rule (core spec §9, Open
	/// Questions).
	pub require_suspension: bool,

	/// A token this driver races the child's yielded futures against.
	///
	/// Tokio has no awaitable that "raises" when a surrounding task is
	/// cancelled — cancellation there is silent and drop-based — so this is
	/// the Tokio-ecosystem stand-in for "the host runtime's cancellation
	/// signal" from core spec §5: firing it delivers
	/// [`BridgeError::Cancelled`] into the child at its suspended
	/// `await_from_sync` call site, the same way any other outcome is
	/// delivered.
	pub cancellation: Option<CancellationToken>
}

impl EntryOptions {
	#[must_use]
	pub fn with_require_suspension(mut self, require_suspension: bool) -> Self {
		self.require_suspension = require_suspension;
		self
	}

	#[must_use]
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = Some(token);
		self
	}
}

/// Adopts a synchronous callable into the enclosing asynchronous context.
///
/// Equivalent to [`async_entry_with`] with default [`EntryOptions`].
///
/// # Errors
/// See [`async_entry_with`].
///
/// # Panics
/// Propagates any panic `f` raises, or any panic raised by a future it
/// awaits via [`await_from_sync`](crate::await_from_sync), unchanged.
///
/// # Non-`Send` future
/// The future this returns pins a stackful coroutine to the OS thread it
/// starts running on (core spec §5) and so is **not** `Send`. Drive it from
/// a current-thread runtime or a [`tokio::task::LocalSet`], not
/// `tokio::spawn`.
pub async fn async_entry<F, R>(f: F) -> Result<R>
where
	F: FnOnce() -> R + 'static,
	R: 'static
{
	async_entry_with(f, EntryOptions::default()).await
}

/// Adopts a synchronous callable into the enclosing asynchronous context,
/// with explicit [`EntryOptions`].
///
/// Implements the core spec's §4.1 protocol: create a child stack running
/// `f`, then alternate between resuming it and natively awaiting whatever
/// future it yielded, until it finishes. The returned future completes with
/// `f`'s return value, or fails with [`BridgeError::NoSuspension`] if
/// `options.require_suspension` was set and `f` never called
/// [`await_from_sync`](crate::await_from_sync).
///
/// # Errors
/// - [`BridgeError::NoSuspension`] per `options.require_suspension` above.
/// - [`BridgeError::Cancelled`] is never returned directly from here — a
///   fired cancellation token is delivered *into* `f` at its suspended
///   `await_from_sync` call site (core spec §4.1 step 3c); it only emerges
///   from this function if `f` does not catch it and lets it propagate.
///
/// # Panics
/// See [`async_entry`].
pub async fn async_entry_with<F, R>(f: F, options: EntryOptions) -> Result<R>
where
	F: FnOnce() -> R + 'static,
	R: 'static
{
	let runtime = Handle::current();

	let mut coroutine: Coro<R> = Coroutine::new(move |yielder, _initial: Outcome| {
		/* Safety: this pointer stays valid for as long as this coroutine
		 * exists, which outlives every registry frame built from it —
		 * including the ones `await_from_sync` pops and re-pushes around
		 * each suspension, not just this initial one. */
		unsafe { registry::push(yielder, runtime) };

		// Runs on unwind too, so a panicking `f` still leaves the registry
		// balanced before corosensei re-raises that panic on the resumer's
		// stack.
		let _guard = PopGuard;

		f()
	});

	let mut suspended = false;
	let mut resume = Outcome::Value(Box::new(()));
	let mut abandoned = AbandonedGuard(false);

	loop {
		match coroutine.resume(resume) {
			CoroutineResult::Return(value) => {
				abandoned.0 = true;

				if options.require_suspension && !suspended {
					tracing::debug!("async_entry: callable returned without suspending");

					return Err(BridgeError::NoSuspension);
				}

				tracing::debug!(suspended, "async_entry: complete");

				return Ok(value);
			}
			CoroutineResult::Yield(yielded) => {
				suspended = true;

				#[cfg(feature = "tracing-ext")]
				tracing::trace!("async_entry: awaiting a yielded future");

				resume = drive_one(yielded, options.cancellation.as_ref()).await;
			}
		}
	}
}

/// Natively awaits exactly one yielded future (core spec §5: "the driver
/// awaits exactly zero or one awaitable per round-trip"), racing it against
/// the cancellation token if one was supplied, and catching any panic so it
/// can be resumed at the child's suspension site rather than here.
async fn drive_one(fut: BoxFuture, cancel: Option<&CancellationToken>) -> Outcome {
	let guarded = AssertUnwindSafe(fut).catch_unwind();

	tokio::pin!(guarded);

	let result = match cancel {
		Some(token) => {
			tokio::select! {
				biased;

				() = token.cancelled() => {
					tracing::debug!("async_entry: cancellation token fired while awaiting");

					return Outcome::Cancelled;
				}
				result = &mut guarded => result,
			}
		}
		None => guarded.await
	};

	match result {
		Ok(value) => Outcome::Value(value),
		Err(payload) => {
			#[cfg(feature = "tracing-ext")]
			tracing::trace!("async_entry: yielded future panicked while being polled");

			Outcome::Panic(payload)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_options_do_not_require_suspension() {
		let options = EntryOptions::default();

		assert!(!options.require_suspension);
		assert!(options.cancellation.is_none());
	}

	#[test]
	fn builders_set_their_field_and_leave_the_other_alone() {
		let token = CancellationToken::new();

		let options = EntryOptions::default()
			.with_require_suspension(true)
			.with_cancellation(token);

		assert!(options.require_suspension);
		assert!(options.cancellation.is_some());
	}
}
