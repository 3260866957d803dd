//! Token-credential exchange (RFC 5849 §2.3), the `authorised` half of the exchange.

// crates.io
use ::http::Method;
// self
use crate::{
	_prelude::*,
	auth::{AccessCredential, AccessToken, SigningContext, TemporaryToken, TokenSecret, Verifier},
	error::ConfigError,
	flows::{Consumer, common},
	http::OAuthHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	signature::OAuthParameters,
	store::TemporaryTokenStore,
};

const ENDPOINT: &str = "token_credentials";

/// Output of a successful token-credential exchange.
#[derive(Clone, Debug)]
pub struct AuthorisedResult {
	/// Token credentials; persisting them is the caller's job.
	pub access: AccessCredential,
	/// Ready-to-use signer bound to the consumer and the new token credentials.
	pub signing: SigningContext,
}

impl<C> Consumer<C>
where
	C: ?Sized + OAuthHttpClient,
{
	/// Exchanges `temporary_token` (plus `verifier`, when supplied) for token credentials.
	///
	/// The temporary secret is read back from the bound store; an unknown or expired token fails
	/// with [`Error::TokenNotFound`] before any request is sent.
	pub(crate) async fn exchange(
		&self,
		temporary_token: &str,
		verifier: Option<&Verifier>,
	) -> Result<AuthorisedResult> {
		const KIND: FlowKind = FlowKind::TokenCredentials;

		let span = FlowSpan::new(KIND, "authorised");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let context = &self.context;
				let token = TemporaryToken::new(temporary_token).map_err(ConfigError::from)?;
				let secret = <dyn TemporaryTokenStore>::get(context.store.as_ref(), &token)
					.await?
					.ok_or(Error::TokenNotFound)?;
				let url = &context.endpoints.token_credentials;
				let mut params =
					OAuthParameters::new(&context.consumer.key, context.nonce_source.as_ref())
						.token(token.as_str());

				if let Some(verifier) = verifier {
					params = params.verifier(verifier.as_str());
				}

				let signed =
					params.sign(&Method::POST, url, &[], &context.consumer.secret, Some(&secret));
				let request =
					common::credential_request(url, &signed.authorization_header(context.realm()))
						.map_err(|source| Error::AccessTokenRequest { source })?;
				let response = self
					.http_client
					.execute(request)
					.await
					.map_err(|source| Error::AccessTokenRequest { source })?;

				common::ensure_success(&response)
					.map_err(|source| Error::AccessTokenRequest { source })?;

				let access = parse_access_credential(response.body())?;
				let mut signing = SigningContext::from_access(context.consumer.clone(), &access)
					.with_nonce_source(context.nonce_source.clone());

				if let Some(realm) = context.realm() {
					signing = signing.with_realm(realm);
				}

				Ok(AuthorisedResult { access, signing })
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}

/// Extracts the token credentials; a missing `oauth_token_secret` reads as empty.
pub(crate) fn parse_access_credential(body: &[u8]) -> Result<AccessCredential> {
	let mut fields = common::parse_form(body);
	let token = common::take_required(&mut fields, ENDPOINT, "oauth_token")?;
	let token = AccessToken::new(token)
		.map_err(|source| Error::InvalidResponseData { endpoint: ENDPOINT, source })?;
	let secret = fields.remove("oauth_token_secret").unwrap_or_default();

	Ok(AccessCredential::new(token, TokenSecret::new(secret), fields))
}
