//! HTTP-execution capability consumed by the flows and the request signer.
//!
//! The crate never opens sockets itself. Every outbound call goes through
//! [`OAuthHttpClient::execute`], which receives a fully signed [`::http::Request`] and returns
//! the buffered [`::http::Response`]. Timeouts, retries, proxies, and redirect policy belong to
//! the implementation the caller supplies.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Buffered request type handed to transports.
pub type HttpRequest = ::http::Request<Vec<u8>>;
/// Buffered response type returned by transports.
pub type HttpResponse = ::http::Response<Vec<u8>>;
/// Boxed future returned by [`OAuthHttpClient::execute`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing signed OAuth requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back several flows, and
/// the futures they return must be `Send` so flow futures can hop executors.
pub trait OAuthHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` and buffers the response body.
	///
	/// Non-2xx statuses are not errors at this layer; return them as regular responses.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_>;
}
impl<T> OAuthHttpClient for Arc<T>
where
	T: ?Sized + OAuthHttpClient,
{
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		<T as OAuthHttpClient>::execute(&**self, request)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Credential endpoints answer directly, so configure any custom [`ReqwestClient`] passed to
/// [`ReqwestHttpClient::with_client`] with the redirect and timeout policy the deployment needs.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl OAuthHttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		Box::pin(async move {
			let request = reqwest::Request::try_from(request)?;
			let response = self.0.execute(request).await?;
			let status = response.status();
			let version = response.version();
			let headers = response.headers().to_owned();
			let body = response.bytes().await?.to_vec();
			let mut response_new = HttpResponse::new(body);

			*response_new.status_mut() = status;
			*response_new.version_mut() = version;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
