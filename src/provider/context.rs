//! Immutable credential context bound to a single flow orchestrator.

/// Builder API for assembling credential contexts.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::{ConsumerCredentials, ConsumerKey},
	provider::ProviderEndpoints,
	signature::NonceSource,
	store::TemporaryTokenStore,
};

/// Consumer credentials, provider endpoints, optional callback, and the bound temporary-token
/// store.
///
/// Built once through [`CredentialContext::builder`] and then handed to a flow variant, which owns
/// it for the rest of its life.
#[derive(Clone)]
pub struct CredentialContext {
	pub(crate) consumer: ConsumerCredentials,
	pub(crate) endpoints: ProviderEndpoints,
	pub(crate) callback: Option<Url>,
	pub(crate) realm: Option<String>,
	pub(crate) store: Arc<dyn TemporaryTokenStore>,
	pub(crate) nonce_source: Arc<dyn NonceSource>,
}
impl CredentialContext {
	/// Creates a new builder for the provided consumer key and secret.
	pub fn builder(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
	) -> CredentialContextBuilder {
		CredentialContextBuilder::new(consumer_key, consumer_secret)
	}

	/// Consumer key sent as `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &ConsumerKey {
		&self.consumer.key
	}

	/// Provider endpoints.
	pub fn endpoints(&self) -> &ProviderEndpoints {
		&self.endpoints
	}

	/// Callback URL sent as `oauth_callback`, if configured.
	pub fn callback(&self) -> Option<&Url> {
		self.callback.as_ref()
	}

	/// Realm rendered into `Authorization` headers, if configured.
	pub fn realm(&self) -> Option<&str> {
		self.realm.as_deref()
	}

	/// Bound temporary-token store.
	pub fn store(&self) -> &Arc<dyn TemporaryTokenStore> {
		&self.store
	}
}
impl Debug for CredentialContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialContext")
			.field("consumer_key", &self.consumer.key)
			.field("consumer_secret", &self.consumer.secret)
			.field("endpoints", &self.endpoints)
			.field("callback", &self.callback)
			.field("realm", &self.realm)
			.finish()
	}
}
