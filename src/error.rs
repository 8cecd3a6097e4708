use thiserror::Error;

/// Contract-violation and cancellation failures the bridge can surface.
///
/// User exceptions (a panic from the adopted callable, or from an awaited
/// future) are deliberately *not* a variant here — they propagate as
/// ordinary Rust panics, unchanged, per the exception-fidelity rule this
/// crate exists to uphold.
#[derive(Debug, Error)]
pub enum BridgeError {
	/// [`await_from_sync`](crate::await_from_sync) was called from a stack
	/// that is not a descendant of any live [`async_entry`](crate::async_entry).
	#[error("await_from_sync called outside of any async_entry")]
	IllegalContext,

	/// [`EntryOptions::require_suspension`](crate::EntryOptions::require_suspension)
	/// was set and the adopted callable returned without ever calling
	/// [`await_from_sync`](crate::await_from_sync).
	#[error("async_entry callable returned without suspending")]
	NoSuspension,

	/// The [`CancellationToken`](tokio_util::sync::CancellationToken) passed
	/// via [`EntryOptions::cancellation`](crate::EntryOptions::cancellation)
	/// fired while the driver was awaiting on the child's behalf.
	#[error("cancelled while awaiting on behalf of the bridged call")]
	Cancelled
}

/// Shorthand for the result type every public `corobridge` entry point returns.
pub type Result<T> = std::result::Result<T, BridgeError>;
