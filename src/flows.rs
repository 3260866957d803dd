//! Flow orchestrator and the two verifier policies built on top of it.
//!
//! [`Consumer`] owns the transport and the [`CredentialContext`] and drives both protocol steps.
//! Callers normally reach it through one of the variants:
//!
//! - [`NoCallbackFlow`] sends no `oauth_callback` and exchanges the temporary token without a
//!   verifier.
//! - [`CallbackFlow`] always sends `oauth_callback` (the configured URL or `oob`) and requires a
//!   non-empty verifier to finish.

pub mod access;
pub mod callback;
pub mod common;
pub mod no_callback;
pub mod temporary;

pub use access::*;
pub use callback::*;
pub use no_callback::*;
pub use temporary::*;

// self
use crate::{_prelude::*, http::OAuthHttpClient, provider::CredentialContext};

/// Literal `oauth_callback` value for out-of-band verifier delivery (RFC 5849 §2.1).
pub const OUT_OF_BAND: &str = "oob";

/// Whether the token-credential exchange carries an `oauth_verifier`.
///
/// Resolved once when a flow variant is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifierPolicy {
	/// No callback is announced and no verifier is sent.
	Absent,
	/// A callback (or `oob`) is announced and a verifier is mandatory.
	Required,
}

/// Drives the three-legged exchange against a single service provider.
///
/// The consumer owns the HTTP client and the credential context so the flow steps can focus on
/// protocol logic. It holds no per-flow state; the temporary secret travels through the store
/// bound to the context.
pub struct Consumer<C>
where
	C: ?Sized + OAuthHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	context: CredentialContext,
	policy: VerifierPolicy,
}
impl<C> Consumer<C>
where
	C: ?Sized + OAuthHttpClient,
{
	pub(crate) fn with_http_client(
		context: CredentialContext,
		http_client: Arc<C>,
		policy: VerifierPolicy,
	) -> Self {
		Self { http_client, context, policy }
	}

	/// Credential context bound to this consumer.
	pub fn context(&self) -> &CredentialContext {
		&self.context
	}

	/// Verifier policy resolved at construction.
	pub fn policy(&self) -> VerifierPolicy {
		self.policy
	}

	/// Value sent as `oauth_callback`, if any.
	pub fn callback_parameter(&self) -> Option<String> {
		match self.policy {
			VerifierPolicy::Absent => None,
			VerifierPolicy::Required => Some(
				self.context.callback.as_ref().map_or_else(|| OUT_OF_BAND.to_owned(), Url::to_string),
			),
		}
	}
}
impl<C> Clone for Consumer<C>
where
	C: ?Sized + OAuthHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			context: self.context.clone(),
			policy: self.policy,
		}
	}
}
impl<C> Debug for Consumer<C>
where
	C: ?Sized + OAuthHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Consumer")
			.field("context", &self.context)
			.field("policy", &self.policy)
			.finish()
	}
}
