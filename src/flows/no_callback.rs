//! Flow variant for providers that issue token credentials without a verifier.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	flows::{AuthorisedResult, BeginResult, Consumer, VerifierPolicy},
	http::OAuthHttpClient,
	provider::CredentialContext,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Runs the exchange without `oauth_callback` or `oauth_verifier`.
///
/// Construction fails when the context carries a callback URL, and [`NoCallbackFlow::authorised`]
/// takes no verifier, so neither parameter can reach the provider.
pub struct NoCallbackFlow<C>
where
	C: ?Sized + OAuthHttpClient,
{
	consumer: Consumer<C>,
}
impl<C> NoCallbackFlow<C>
where
	C: ?Sized + OAuthHttpClient,
{
	/// Creates the flow over a caller-provided transport.
	pub fn with_http_client(
		context: CredentialContext,
		http_client: Arc<C>,
	) -> Result<Self, ConfigError> {
		if context.callback.is_some() {
			return Err(ConfigError::UnexpectedCallback);
		}

		Ok(Self { consumer: Consumer::with_http_client(context, http_client, VerifierPolicy::Absent) })
	}

	/// Underlying orchestrator.
	pub fn consumer(&self) -> &Consumer<C> {
		&self.consumer
	}

	/// Requests temporary credentials; see [`Consumer::begin`].
	pub async fn begin(&self) -> Result<BeginResult> {
		self.consumer.begin().await
	}

	/// Exchanges the temporary token for token credentials.
	pub async fn authorised(&self, temporary_token: &str) -> Result<AuthorisedResult> {
		self.consumer.exchange(temporary_token, None).await
	}
}
impl<C> Clone for NoCallbackFlow<C>
where
	C: ?Sized + OAuthHttpClient,
{
	fn clone(&self) -> Self {
		Self { consumer: self.consumer.clone() }
	}
}
impl<C> Debug for NoCallbackFlow<C>
where
	C: ?Sized + OAuthHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("NoCallbackFlow").field("consumer", &self.consumer).finish()
	}
}
#[cfg(feature = "reqwest")]
impl NoCallbackFlow<ReqwestHttpClient> {
	/// Creates the flow over a default reqwest transport.
	pub fn new(context: CredentialContext) -> Result<Self, ConfigError> {
		Self::with_http_client(context, Arc::new(ReqwestHttpClient::default()))
	}
}
