//! The child stack wrapper and its data model (core spec §3, §4.3, §4.4).

use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use corosensei::Coroutine;
use tokio::runtime::Handle;

/// A type-erased value, used to carry arbitrary `Future::Output`s and panic
/// payloads across the child/driver boundary without the coroutine having to
/// be generic over every awaited future's output type.
///
/// Not `Send`: the whole point of this crate is a stackful coroutine pinned
/// to one OS thread (core spec §5, "single-threaded, cooperative,
/// two-party"), so nothing here ever needs to cross a thread boundary.
pub(crate) type BoxAny = Box<dyn Any>;

/// A type-erased, boxed future: what the child yields to the driver each
/// time it calls [`await_from_sync`](crate::await_from_sync).
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = BoxAny>>>;

/// What the driver resumes the child with (core spec §3: "the value the
/// child receives ... is precisely the value the awaited awaitable
/// produced, or, if the awaitable raised, that same exception").
pub(crate) enum Outcome {
	/// The awaited future completed normally.
	Value(BoxAny),
	/// The awaited future panicked while being polled. Resumed at the
	/// `await_from_sync` call site via [`std::panic::resume_unwind`].
	Panic(BoxAny),
	/// The host task's cancellation token fired before the awaited future
	/// completed.
	Cancelled
}

pub(crate) type Yielder = corosensei::Yielder<Outcome, BoxFuture>;

/// The coroutine running the adopted synchronous callable. `R` is the
/// callable's concrete return type; only the yielded futures in between are
/// type-erased.
pub(crate) type Coro<R> = Coroutine<Outcome, BoxFuture, R>;

/// Record pushed onto the thread-local [frame registry](crate::registry)
/// while a child stack is running, so [`await_from_sync`](crate::await_from_sync)
/// can find its way back to the driver without any value being threaded
/// through the intervening synchronous call frames.
///
/// This is the core spec's "Child Stack Wrapper" (§4.3): it makes parent
/// identity trivially queryable (the registry stack itself encodes it — the
/// frame directly below this one, if any, is this driver's parent) and
/// captures the `runtime_marker` handle at creation time.
pub(crate) struct Frame {
	/// Valid for exactly as long as this frame is at the top of the
	/// registry: pushed right before the coroutine's entry point starts
	/// running the adopted callable, popped right after it returns (or
	/// unwinds). The coroutine never runs concurrently with the driver
	/// (core spec invariant 2), so there is never a second live reference
	/// to the pointee while this pointer is read.
	pub(crate) yielder: *const Yielder,
	/// Captured purely for identity/debugging, per core spec §3 and §4.3 —
	/// never consulted to make a scheduling decision.
	pub(crate) runtime: Handle
}
