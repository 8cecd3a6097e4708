//! `corobridge` lets a plain, synchronous function — running anywhere
//! inside a cooperative asynchronous runtime — call into awaitables as if
//! the surrounding context were itself `async`, without threading `.await`
//! through every intervening stack frame.
//!
//! Two operations make up the whole public surface:
//!
//! - [`async_entry`] adopts a synchronous callable into the enclosing
//!   asynchronous context, running it on its own stackful coroutine.
//! - [`await_from_sync`] is a plain (non-`async`) function, callable from
//!   anywhere underneath an `async_entry`'s callable, that suspends the
//!   calling stack on an arbitrary [`Future`](std::future::Future) and
//!   returns its output — or resumes its panic — as an ordinary value.
//!
//! ```no_run
//! # async fn run() -> corobridge::Result<()> {
//! let greeting = corobridge::async_entry(|| {
//!     // plain, synchronous code — no `async`, no `.await` — that still
//!     // suspends on a real future:
//!     let suffix = corobridge::await_from_sync(async { "!" })?;
//!
//!     Ok::<_, corobridge::BridgeError>(format!("hi{suffix}"))
//! })
//! .await??;
//!
//! assert_eq!(greeting, "hi!");
//! # Ok(())
//! # }
//! ```
//!
//! # What this is not
//!
//! This crate does not implement an event loop, a non-blocking I/O layer,
//! preemption or time-slicing, a general green-thread scheduler, or
//! cross-task channels, and it does not monkey-patch the host runtime. It
//! composes exactly two existing schedulers — Tokio's task scheduler and a
//! stackful-coroutine facility (`corosensei`) — and nothing else.
//!
//! # Non-`Send` futures
//!
//! [`async_entry`]'s returned future pins a native call stack to the OS
//! thread it starts running on, so it is **not** `Send`. Drive it from a
//! current-thread [`tokio::runtime::Runtime`] or from a
//! [`tokio::task::LocalSet`] — never `tokio::spawn`.

mod context;
mod driver;
mod error;
mod registry;
mod suspend;

pub use corobridge_macros::bridge_test;
pub use driver::{async_entry, async_entry_with, EntryOptions};
pub use error::{BridgeError, Result};
pub use suspend::await_from_sync;
