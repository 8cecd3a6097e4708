use std::time::Duration;

use corobridge::{async_entry_with, await_from_sync, EntryOptions};
use tokio_util::sync::CancellationToken;

#[tokio::test(flavor = "current_thread")]
#[should_panic(expected = "Cancelled")]
async fn cancellation_surfaces_at_the_suspended_await() {
	let local = tokio::task::LocalSet::new();

	local
		.run_until(async {
			let token = CancellationToken::new();
			let options = EntryOptions::default().with_cancellation(token.clone());

			tokio::spawn({
				let token = token.clone();

				async move {
					tokio::time::sleep(Duration::from_millis(10)).await;
					token.cancel();
				}
			});

			// The callable never catches `BridgeError::Cancelled`, so it
			// unwraps straight into a panic that resume()s out through
			// `async_entry_with`'s own future, exactly like any other
			// uncaught exception (core spec §4.1 step 3c, §7).
			async_entry_with(
				|| {
					await_from_sync(tokio::time::sleep(Duration::from_secs(10))).unwrap();
				},
				options
			)
			.await
			.unwrap();
		})
		.await;
}
