//! Temporary-credential request (RFC 5849 §2.1), the `begin` half of the exchange.

// crates.io
use ::http::Method;
// self
use crate::{
	_prelude::*,
	auth::{TemporaryCredential, TemporaryToken, TokenSecret},
	flows::{Consumer, common},
	http::OAuthHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	signature::OAuthParameters,
	store::TemporaryTokenStore,
};

const ENDPOINT: &str = "temporary_credentials";

/// Output of [`Consumer::begin`].
#[derive(Clone, Debug)]
pub struct BeginResult {
	/// Temporary token issued by the provider.
	pub temporary_token: TemporaryToken,
	/// Resource-owner redirect, present only when an authorize endpoint is configured.
	pub redirect_url: Option<Url>,
	/// Whether the provider echoed `oauth_callback_confirmed=true`.
	pub callback_confirmed: bool,
}

impl<C> Consumer<C>
where
	C: ?Sized + OAuthHttpClient,
{
	/// Obtains temporary credentials, stores the secret, and returns the redirect target.
	///
	/// The request is signed with an empty token secret. The secret returned by the provider is
	/// written to the bound store before this method returns and never leaves the crate.
	pub async fn begin(&self) -> Result<BeginResult> {
		const KIND: FlowKind = FlowKind::TemporaryCredentials;

		let span = FlowSpan::new(KIND, "begin");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let context = &self.context;
				let url = &context.endpoints.temporary_credentials;
				let mut params =
					OAuthParameters::new(&context.consumer.key, context.nonce_source.as_ref());

				if let Some(callback) = self.callback_parameter() {
					params = params.callback(callback);
				}

				let signed = params.sign(&Method::POST, url, &[], &context.consumer.secret, None);
				let request =
					common::credential_request(url, &signed.authorization_header(context.realm()))
						.map_err(|source| Error::TemporaryTokenRequest { source })?;
				let response = self
					.http_client
					.execute(request)
					.await
					.map_err(|source| Error::TemporaryTokenRequest { source })?;

				common::ensure_success(&response)
					.map_err(|source| Error::TemporaryTokenRequest { source })?;

				let credential = parse_temporary_credential(response.body())?;

				<dyn TemporaryTokenStore>::put(
					context.store.as_ref(),
					&credential.token,
					&credential.secret,
				)
				.await?;

				let redirect_url = context.endpoints.authorize_url(credential.token.as_str());

				Ok(BeginResult {
					temporary_token: credential.token,
					redirect_url,
					callback_confirmed: credential.callback_confirmed,
				})
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}

/// Extracts `oauth_token`, `oauth_token_secret`, and `oauth_callback_confirmed`.
pub(crate) fn parse_temporary_credential(body: &[u8]) -> Result<TemporaryCredential> {
	let mut fields = common::parse_form(body);
	let token = common::take_required(&mut fields, ENDPOINT, "oauth_token")?;
	let secret = common::take_required(&mut fields, ENDPOINT, "oauth_token_secret")?;
	let token = TemporaryToken::new(token)
		.map_err(|source| Error::InvalidResponseData { endpoint: ENDPOINT, source })?;
	let callback_confirmed =
		fields.get("oauth_callback_confirmed").is_some_and(|value| value == "true");

	Ok(TemporaryCredential { token, secret: TokenSecret::new(secret), callback_confirmed })
}
