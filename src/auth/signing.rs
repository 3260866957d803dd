//! Reusable signing context for resource requests made on behalf of a resource owner.

// crates.io
use ::http::Method;
// self
use crate::{
	_prelude::*,
	auth::{AccessCredential, AccessToken, ConsumerCredentials, ConsumerKey, TokenSecret},
	signature::{
		NonceSource, OAUTH_VERSION, OAuthParameters, SIGNATURE_METHOD, SignedParameters,
		SystemNonceSource,
	},
};

/// Consumer credentials plus an access token, ready to sign any number of requests.
///
/// The context is immutable and not time-limited; share it freely across threads.
#[derive(Clone)]
pub struct SigningContext {
	consumer: ConsumerCredentials,
	token: AccessToken,
	token_secret: TokenSecret,
	realm: Option<String>,
	nonce_source: Arc<dyn NonceSource>,
}
impl SigningContext {
	/// Builds a context from previously persisted token credentials.
	pub fn new(consumer: ConsumerCredentials, token: AccessToken, token_secret: TokenSecret) -> Self {
		Self { consumer, token, token_secret, realm: None, nonce_source: Arc::new(SystemNonceSource) }
	}

	/// Builds a context from a fresh token-credential exchange.
	pub fn from_access(consumer: ConsumerCredentials, access: &AccessCredential) -> Self {
		Self::new(consumer, access.token.clone(), access.secret.clone())
	}

	/// Adds a `realm` to every rendered `Authorization` header.
	pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
		self.realm = Some(realm.into());

		self
	}

	/// Replaces the nonce/timestamp source.
	pub fn with_nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
		self.nonce_source = source;

		self
	}

	/// Consumer key used for `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &ConsumerKey {
		&self.consumer.key
	}

	/// Access token used for `oauth_token`.
	pub fn token(&self) -> &AccessToken {
		&self.token
	}

	/// Access token secret; the second half of the HMAC key.
	pub fn token_secret(&self) -> &TokenSecret {
		&self.token_secret
	}

	/// Configured realm, if any.
	pub fn realm(&self) -> Option<&str> {
		self.realm.as_deref()
	}

	/// Always `HMAC-SHA1`.
	pub fn signature_method(&self) -> &'static str {
		SIGNATURE_METHOD
	}

	/// Always `1.0`.
	pub fn version(&self) -> &'static str {
		OAUTH_VERSION
	}

	/// Signs `method` + `url` (query included) plus any form-encoded `body_params`.
	pub fn sign(
		&self,
		method: &Method,
		url: &Url,
		body_params: &[(String, String)],
	) -> SignedParameters {
		OAuthParameters::new(&self.consumer.key, self.nonce_source.as_ref())
			.token(self.token.as_str())
			.sign(method, url, body_params, &self.consumer.secret, Some(&self.token_secret))
	}

	/// Signs the request and renders the `Authorization` header value.
	pub fn authorization_header(
		&self,
		method: &Method,
		url: &Url,
		body_params: &[(String, String)],
	) -> String {
		self.sign(method, url, body_params).authorization_header(self.realm())
	}
}
impl Debug for SigningContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SigningContext")
			.field("consumer_key", &self.consumer.key)
			.field("token", &self.token)
			.field("token_secret", &self.token_secret)
			.field("signature_method", &SIGNATURE_METHOD)
			.field("version", &OAUTH_VERSION)
			.field("realm", &self.realm)
			.finish()
	}
}
