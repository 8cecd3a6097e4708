use corobridge::{async_entry, await_from_sync, bridge_test};

#[derive(Debug)]
struct ValueError(String);

#[bridge_test]
fn exception_round_trip() {
	let result: Result<i32, ValueError> =
		await_from_sync(async { Err(ValueError("x".to_string())) }).unwrap();

	let message = match result {
		Ok(_) => panic!("expected the awaited future to resolve to an Err"),
		Err(ValueError(message)) => message
	};

	assert_eq!(message, "x");
}

// Not `#[bridge_test]`: that macro only checks the *driver's* outcome
// (`BridgeError`), discarding the callable's own return value, so asserting
// on the propagated `ValueError` itself needs `async_entry` driven by hand.
#[tokio::test(flavor = "current_thread")]
async fn uncaught_exception_propagates_through_the_callables_own_result() {
	let local = tokio::task::LocalSet::new();

	local
		.run_until(async {
			let outcome = async_entry(|| -> Result<(), ValueError> {
				await_from_sync(async { Err(ValueError("boom".to_string())) }).unwrap()
			})
			.await
			.unwrap();

			let message = match outcome {
				Ok(()) => panic!("expected the callable's own Err to come back unmodified"),
				Err(ValueError(message)) => message
			};

			assert_eq!(message, "boom");
		})
		.await;
}
