//! Proc-macro companion for `corobridge`.
//!
//! Mirrors the teacher crate's `#[main]` attribute: it rewrites a plain
//! function body into one that bootstraps a runtime and drives it to
//! completion. Here the "runtime" is a single-threaded Tokio `LocalSet`
//! (required because `async_entry`'s future pins a coroutine stack to one
//! OS thread and so is not `Send`), and the function body, instead of being
//! `async` itself, is the *synchronous* callable handed to `async_entry`.

use proc_macro::TokenStream;
use quote::ToTokens;
use syn::{parse_macro_input, ItemFn};

/// Turns a plain synchronous test function into a `#[test]` that runs its
/// body through [`corobridge::async_entry`] on a fresh current-thread Tokio
/// runtime.
///
/// ```ignore
/// #[corobridge_macros::bridge_test]
/// fn echo() {
///     let got = corobridge::await_from_sync(async { 1 }).unwrap();
///     assert_eq!(got, 1);
/// }
/// ```
#[proc_macro_attribute]
pub fn bridge_test(attr: TokenStream, item: TokenStream) -> TokenStream {
	if !attr.is_empty() {
		return syn::Error::new_spanned(
			proc_macro2::TokenStream::from(attr),
			"bridge_test takes no arguments"
		)
		.to_compile_error()
		.into();
	}

	let mut func = parse_macro_input!(item as ItemFn);

	if func.sig.asyncness.take().is_some() {
		return syn::Error::new_spanned(
			&func.sig,
			"#[bridge_test] applies to a synchronous fn, not an async fn \
			 (the body runs as the callable passed to async_entry)"
		)
		.to_compile_error()
		.into();
	}

	let body = &func.block;
	let output = &func.sig.output;

	func.block = Box::new(syn::parse_quote! {{
		let runtime = ::tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()
			.expect("corobridge: failed to start the test runtime");
		let local = ::tokio::task::LocalSet::new();

		local.block_on(&runtime, async move {
			let result: ::corobridge::Result<_> = ::corobridge::async_entry(move || #output #body).await;

			result.expect("corobridge: bridged test body returned an error");
		});
	}});

	func.sig.output = syn::ReturnType::Default;
	func.attrs.push(syn::parse_quote! { #[test] });

	func.to_token_stream().into()
}
