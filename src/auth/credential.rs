//! Credential pairs produced and consumed by the three-legged exchange.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ConsumerKey, ConsumerSecret, TemporaryToken, TokenSecret},
};

/// Client credentials (consumer key + shared secret).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerCredentials {
	/// Consumer key sent as `oauth_consumer_key`.
	pub key: ConsumerKey,
	/// Consumer secret; the first half of every HMAC key.
	pub secret: ConsumerSecret,
}
impl ConsumerCredentials {
	/// Pairs a key with its secret.
	pub fn new(key: ConsumerKey, secret: ConsumerSecret) -> Self {
		Self { key, secret }
	}
}

/// Temporary credentials returned by the provider in step one.
///
/// The secret stays inside the crate and the configured store; only the token is handed back to
/// callers.
#[derive(Clone, Debug)]
pub(crate) struct TemporaryCredential {
	/// Temporary token forwarded to the authorize endpoint.
	pub(crate) token: TemporaryToken,
	pub(crate) secret: TokenSecret,
	/// Whether the provider echoed `oauth_callback_confirmed=true`.
	pub(crate) callback_confirmed: bool,
}

/// Token credentials returned by a successful token-credential exchange.
///
/// Only the flow orchestrator builds this type. Persisting it is the caller's job.
#[derive(Clone, Debug, Serialize)]
#[non_exhaustive]
pub struct AccessCredential {
	/// Access token sent as `oauth_token` on resource requests.
	pub token: AccessToken,
	/// Access token secret (empty when the provider omits it).
	pub secret: TokenSecret,
	/// Any additional fields in the provider response (e.g. `user_id`, `screen_name`).
	pub extra: BTreeMap<String, String>,
}
impl AccessCredential {
	pub(crate) fn new(
		token: AccessToken,
		secret: TokenSecret,
		extra: BTreeMap<String, String>,
	) -> Self {
		Self { token, secret, extra }
	}
}
