use corobridge::{async_entry, async_entry_with, await_from_sync, BridgeError, EntryOptions};

#[tokio::test(flavor = "current_thread")]
async fn rejects_a_callable_that_never_suspends() {
	let local = tokio::task::LocalSet::new();

	local
		.run_until(async {
			let options = EntryOptions::default().with_require_suspension(true);

			let err = async_entry_with(|| 42, options)
				.await
				.expect_err("the callable never called await_from_sync");

			assert!(matches!(err, BridgeError::NoSuspension));
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn accepts_a_callable_that_does_suspend() {
	let local = tokio::task::LocalSet::new();

	local
		.run_until(async {
			let options = EntryOptions::default().with_require_suspension(true);

			let value = async_entry_with(|| await_from_sync(async { 42 }).unwrap(), options)
				.await
				.unwrap();

			assert_eq!(value, 42);
		})
		.await;
}

#[tokio::test(flavor = "current_thread")]
async fn defaults_to_not_requiring_suspension() {
	let local = tokio::task::LocalSet::new();

	local
		.run_until(async {
			let value = async_entry(|| 42).await.unwrap();

			assert_eq!(value, 42);
		})
		.await;
}
