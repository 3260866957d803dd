//! Consumer-level error types shared across flows, signing, and stores.

// self
use crate::_prelude::*;

/// Consumer-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical consumer error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Temporary-token store failure (distinct from [`Error::TokenNotFound`]).
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// The temporary-credential request could not be completed.
	#[error("Temporary credential request failed.")]
	TemporaryTokenRequest {
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// The token-credential (access token) request could not be completed.
	#[error("Token credential request failed.")]
	AccessTokenRequest {
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// A signed resource request could not be executed.
	#[error("Signed request failed.")]
	SignedRequest {
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// Provider returned a well-formed response that lacks a required field.
	#[error("The {endpoint} response is missing `{field}`.")]
	MissingResponseData {
		/// Endpoint label (`temporary_credentials` or `token_credentials`).
		endpoint: &'static str,
		/// Missing or empty response field.
		field: &'static str,
	},
	/// Provider returned a token value that fails identifier validation.
	#[error("The {endpoint} response carries an invalid `oauth_token`.")]
	InvalidResponseData {
		/// Endpoint label (`temporary_credentials` or `token_credentials`).
		endpoint: &'static str,
		/// Validation failure.
		#[source]
		source: crate::auth::IdentifierError,
	},
	/// No temporary-token secret is stored for the supplied token; the handshake window may have
	/// elapsed or the token was never issued by this consumer. Restart authorization.
	#[error("No temporary token secret is stored for the supplied token.")]
	TokenNotFound,
}

/// Configuration and validation failures raised by the consumer.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A key, token, or verifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Credential context was built without a consumer secret.
	#[error("Consumer secret cannot be empty.")]
	EmptyConsumerSecret,
	/// Credential context was built without provider endpoints.
	#[error("Provider endpoints are required.")]
	MissingEndpoints,
	/// Credential context was built without a temporary-token store.
	#[error("A temporary token store is required.")]
	MissingStore,
	/// An endpoint URL could not be parsed.
	#[error("The {endpoint} endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTP or HTTPS.
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// A callback URL was configured for the no-callback flow.
	#[error("The no-callback flow cannot be configured with a callback URL.")]
	UnexpectedCallback,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, unexpected provider status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// The outbound request could not be assembled.
	#[error("HTTP request could not be constructed.")]
	Request(#[from] ::http::Error),
	/// A credential endpoint answered with a non-success status.
	#[error("Provider answered with HTTP {status}: {body_preview}.")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
		/// Leading slice of the response body, for diagnostics.
		body_preview: String,
	},
}
impl TransportError {
	const BODY_PREVIEW_LEN: usize = 256;

	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Builds an [`TransportError::UnexpectedStatus`] with a bounded body preview.
	pub fn unexpected_status(status: u16, body: &[u8]) -> Self {
		let text = String::from_utf8_lossy(body);
		let body_preview = text.chars().take(Self::BODY_PREVIEW_LEN).collect();

		Self::UnexpectedStatus { status, body_preview }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
