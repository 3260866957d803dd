//! OAuth 1.0a consumer for RFC 5849 providers: drive the three-legged credential exchange across
//! the resource-owner redirect and sign arbitrary requests with HMAC-SHA1.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod ext;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod signature;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		flows::{CallbackFlow, NoCallbackFlow},
		http::ReqwestHttpClient,
		provider::{CredentialContext, ProviderEndpoints},
		store::{MemoryStore, TemporaryTokenStore},
	};

	/// Callback flow type alias used by reqwest-backed integration tests.
	pub type ReqwestTestCallbackFlow = CallbackFlow<ReqwestHttpClient>;
	/// No-callback flow type alias used by reqwest-backed integration tests.
	pub type ReqwestTestNoCallbackFlow = NoCallbackFlow<ReqwestHttpClient>;

	/// Builds endpoints that point at a mock provider, given a closure mapping paths to URLs
	/// (e.g. `|path| server.url(path)` for `httpmock`).
	pub fn mock_endpoints(url_for: impl Fn(&str) -> String) -> ProviderEndpoints {
		let parse = |path: &str| {
			Url::parse(&url_for(path)).expect("Mock provider URL should parse successfully.")
		};

		ProviderEndpoints {
			temporary_credentials: parse("/oauth/request_token"),
			authorize: Some(parse("/oauth/authorize")),
			token_credentials: parse("/oauth/access_token"),
		}
	}

	/// Constructs a [`CredentialContext`] bound to a fresh in-memory store.
	pub fn build_test_context(
		endpoints: ProviderEndpoints,
		consumer_key: &str,
		consumer_secret: &str,
		callback: Option<Url>,
	) -> (CredentialContext, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn TemporaryTokenStore> = store_backend.clone();
		let mut builder =
			CredentialContext::builder(consumer_key, consumer_secret).endpoints(endpoints).store(store);

		if let Some(callback) = callback {
			builder = builder.callback(callback);
		}

		let context = builder.build().expect("Test credential context should build successfully.");

		(context, store_backend)
	}

	/// Builds a callback-capable flow over the default reqwest transport.
	pub fn build_reqwest_callback_flow(
		endpoints: ProviderEndpoints,
		consumer_key: &str,
		consumer_secret: &str,
		callback: Option<Url>,
	) -> (ReqwestTestCallbackFlow, Arc<MemoryStore>) {
		let (context, store) = build_test_context(endpoints, consumer_key, consumer_secret, callback);

		(CallbackFlow::new(context), store)
	}

	/// Builds a no-callback flow over the default reqwest transport.
	pub fn build_reqwest_no_callback_flow(
		endpoints: ProviderEndpoints,
		consumer_key: &str,
		consumer_secret: &str,
	) -> (ReqwestTestNoCallbackFlow, Arc<MemoryStore>) {
		let (context, store) = build_test_context(endpoints, consumer_key, consumer_secret, None);
		let flow = NoCallbackFlow::new(context)
			.expect("No-callback flow should accept a context without a callback URL.");

		(flow, store)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use ::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
