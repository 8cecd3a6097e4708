use std::panic::catch_unwind;

use corobridge::{async_entry_with, await_from_sync, bridge_test, EntryOptions};

// Distinct from `exceptions.rs`: Rust splits "the callable raised" into two
// channels (`Result::Err` and a real panic) where the source language had
// one, so the panic channel needs its own coverage (core spec §7).
#[bridge_test]
fn panic_caught_at_the_suspension_site() {
	let caught = catch_unwind(|| await_from_sync(async { panic!("boom") }));

	let payload = caught.expect_err("expected the panicking future to resume its panic here");
	let message = payload.downcast_ref::<&str>().copied().unwrap_or("<unknown payload>");

	assert_eq!(message, "boom");
}

#[tokio::test(flavor = "current_thread")]
#[should_panic(expected = "boom")]
async fn uncaught_panic_propagates_out_of_async_entry() {
	let local = tokio::task::LocalSet::new();

	local
		.run_until(async {
			async_entry_with(
				|| {
					await_from_sync(async { panic!("boom") }).unwrap();
				},
				EntryOptions::default()
			)
			.await
			.unwrap();
		})
		.await;
}
