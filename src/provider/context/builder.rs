// self
use crate::{
	_prelude::*,
	auth::{ConsumerCredentials, ConsumerKey, ConsumerSecret},
	error::ConfigError,
	provider::{CredentialContext, ProviderEndpoints},
	signature::{NonceSource, SystemNonceSource},
	store::TemporaryTokenStore,
};

/// Builder for [`CredentialContext`] values.
pub struct CredentialContextBuilder {
	consumer_key: String,
	consumer_secret: String,
	endpoints: Option<ProviderEndpoints>,
	callback: Option<Url>,
	realm: Option<String>,
	store: Option<Arc<dyn TemporaryTokenStore>>,
	nonce_source: Option<Arc<dyn NonceSource>>,
}
impl CredentialContextBuilder {
	/// Creates a new builder seeded with the consumer credentials.
	pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: consumer_secret.into(),
			endpoints: None,
			callback: None,
			realm: None,
			store: None,
			nonce_source: None,
		}
	}

	/// Sets the provider endpoints.
	pub fn endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
		self.endpoints = Some(endpoints);

		self
	}

	/// Sets the callback URL sent as `oauth_callback`.
	pub fn callback(mut self, url: Url) -> Self {
		self.callback = Some(url);

		self
	}

	/// Sets the realm rendered into `Authorization` headers.
	pub fn realm(mut self, realm: impl Into<String>) -> Self {
		self.realm = Some(realm.into());

		self
	}

	/// Binds the temporary-token store.
	pub fn store(mut self, store: Arc<dyn TemporaryTokenStore>) -> Self {
		self.store = Some(store);

		self
	}

	/// Overrides the nonce/timestamp source (defaults to [`SystemNonceSource`]).
	pub fn nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
		self.nonce_source = Some(source);

		self
	}

	/// Validates the configuration and produces the context.
	pub fn build(self) -> Result<CredentialContext, ConfigError> {
		let key = ConsumerKey::new(&self.consumer_key)?;

		if self.consumer_secret.is_empty() {
			return Err(ConfigError::EmptyConsumerSecret);
		}

		let endpoints = self.endpoints.ok_or(ConfigError::MissingEndpoints)?;

		endpoints.validate()?;

		let store = self.store.ok_or(ConfigError::MissingStore)?;

		Ok(CredentialContext {
			consumer: ConsumerCredentials::new(key, ConsumerSecret::new(self.consumer_secret)),
			endpoints,
			callback: self.callback,
			realm: self.realm,
			store,
			nonce_source: self.nonce_source.unwrap_or_else(|| Arc::new(SystemNonceSource)),
		})
	}
}
impl Debug for CredentialContextBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialContextBuilder")
			.field("consumer_key", &self.consumer_key)
			.field("consumer_secret_set", &!self.consumer_secret.is_empty())
			.field("endpoints", &self.endpoints)
			.field("callback", &self.callback)
			.field("realm", &self.realm)
			.field("store_set", &self.store.is_some())
			.finish()
	}
}
