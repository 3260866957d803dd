//! Flow variant for providers that hand the resource owner a verifier.

// self
use crate::{
	_prelude::*,
	auth::Verifier,
	error::ConfigError,
	flows::{AuthorisedResult, BeginResult, Consumer, VerifierPolicy},
	http::OAuthHttpClient,
	provider::CredentialContext,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Runs the exchange with `oauth_callback` and a mandatory `oauth_verifier`.
///
/// `begin` announces the configured callback URL, or `oob` when none is configured so the
/// provider displays the verifier to the resource owner instead of redirecting.
pub struct CallbackFlow<C>
where
	C: ?Sized + OAuthHttpClient,
{
	consumer: Consumer<C>,
}
impl<C> CallbackFlow<C>
where
	C: ?Sized + OAuthHttpClient,
{
	/// Creates the flow over a caller-provided transport.
	pub fn with_http_client(context: CredentialContext, http_client: Arc<C>) -> Self {
		Self { consumer: Consumer::with_http_client(context, http_client, VerifierPolicy::Required) }
	}

	/// Underlying orchestrator.
	pub fn consumer(&self) -> &Consumer<C> {
		&self.consumer
	}

	/// Requests temporary credentials; see [`Consumer::begin`].
	pub async fn begin(&self) -> Result<BeginResult> {
		self.consumer.begin().await
	}

	/// Exchanges the temporary token and the resource owner's verifier for token credentials.
	///
	/// An empty verifier fails with [`ConfigError::InvalidIdentifier`] before the store or the
	/// network is touched.
	pub async fn authorised(&self, temporary_token: &str, verifier: &str) -> Result<AuthorisedResult> {
		let verifier = Verifier::new(verifier).map_err(ConfigError::from)?;

		self.consumer.exchange(temporary_token, Some(&verifier)).await
	}
}
impl<C> Clone for CallbackFlow<C>
where
	C: ?Sized + OAuthHttpClient,
{
	fn clone(&self) -> Self {
		Self { consumer: self.consumer.clone() }
	}
}
impl<C> Debug for CallbackFlow<C>
where
	C: ?Sized + OAuthHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CallbackFlow").field("consumer", &self.consumer).finish()
	}
}
#[cfg(feature = "reqwest")]
impl CallbackFlow<ReqwestHttpClient> {
	/// Creates the flow over a default reqwest transport.
	pub fn new(context: CredentialContext) -> Self {
		Self::with_http_client(context, Arc::new(ReqwestHttpClient::default()))
	}
}
