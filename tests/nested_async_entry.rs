use corobridge::{async_entry, await_from_sync, bridge_test};

// The "second async_entry started inside the child" edge case (core spec
// §4.2): the outer callable suspends on the *inner* `async_entry`'s future,
// which pushes a second frame onto the same thread's registry. Suspension
// inside the inner callable must resolve to that inner frame, not the
// outer one underneath it.
#[bridge_test]
fn nested_async_entry() {
	let inner = await_from_sync(async_entry(|| await_from_sync(async { 41 }).unwrap() + 1)).unwrap();

	assert_eq!(inner.unwrap(), 42);
}
