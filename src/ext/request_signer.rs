//! Request signing for resource requests made with token credentials.

// crates.io
use ::http::{
	HeaderValue,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::SigningContext,
	error::{ConfigError, TransportError},
	http::{HttpRequest, HttpResponse, OAuthHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Describes how to attach an OAuth `Authorization` header to an outbound request without
/// constraining the HTTP client type.
///
/// Generic over both the request and error types so implementers can integrate with any client
/// builder while the crate ships the `http::Request` implementation.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the request and returns it with a fresh `Authorization` header.
	fn sign_request(&self, request: Request) -> Result<Request, Error>;
}
impl RequestSignerExt<HttpRequest, Error> for SigningContext {
	fn sign_request(&self, mut request: HttpRequest) -> Result<HttpRequest> {
		let url = Url::parse(&request.uri().to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "resource", source })?;
		let body_params = form_parameters(&request);
		let header = self.authorization_header(request.method(), &url, &body_params);
		let value = HeaderValue::try_from(header)
			.map_err(|e| Error::SignedRequest { source: TransportError::Request(e.into()) })?;

		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(request)
	}
}

/// Signs `request` with `signing` and executes it through `client`.
///
/// The raw response is returned whatever its status; interpreting non-2xx answers is up to the
/// caller. Transport failures surface as [`Error::SignedRequest`].
pub async fn execute_signed<C>(
	client: &C,
	signing: &SigningContext,
	request: HttpRequest,
) -> Result<HttpResponse>
where
	C: ?Sized + OAuthHttpClient,
{
	const KIND: FlowKind = FlowKind::SignedRequest;

	let span = FlowSpan::new(KIND, "execute_signed");

	obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

	let result = span
		.instrument(async move {
			let request = signing.sign_request(request)?;

			client.execute(request).await.map_err(|source| Error::SignedRequest { source })
		})
		.await;

	match &result {
		Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
		Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
	}

	result
}

/// Body parameters that participate in the signature; only form-encoded bodies qualify.
fn form_parameters(request: &HttpRequest) -> Vec<(String, String)> {
	let is_form = request
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.split(';').next())
		.is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE));

	if !is_form {
		return Vec::new();
	}

	url::form_urlencoded::parse(request.body()).into_owned().collect()
}

#[cfg(test)]
mod tests {
	// crates.io
	use ::http::Method;
	// self
	use super::*;
	use crate::{
		auth::{AccessToken, ConsumerCredentials, ConsumerKey, ConsumerSecret, TokenSecret},
		signature::FixedNonceSource,
	};

	fn photos_context() -> SigningContext {
		let consumer = ConsumerCredentials::new(
			ConsumerKey::new("dpf43f3p2l4k3l03").expect("Consumer key fixture should be valid."),
			ConsumerSecret::new("kd94hf93k423kf44"),
		);

		SigningContext::new(
			consumer,
			AccessToken::new("nnch734d00sl2jdk").expect("Access token fixture should be valid."),
			TokenSecret::new("pfkkdhi9sl3r4s00"),
		)
		.with_nonce_source(Arc::new(FixedNonceSource::new("kllo9940pd9333jh", 1_191_242_096)))
	}

	fn header(request: &HttpRequest) -> &str {
		request
			.headers()
			.get(AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.expect("Signed request should carry an Authorization header.")
	}

	#[test]
	fn signs_query_parameters_of_get_requests() {
		let request =
			::http::Request::get("http://photos.example.net/photos?file=vacation.jpg&size=original")
				.body(Vec::new())
				.expect("Request fixture should build.");
		let signed = photos_context().sign_request(request).expect("Signing should succeed.");

		assert!(header(&signed).contains("oauth_signature=\"tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D\""));
	}

	#[test]
	fn form_bodies_participate_in_the_signature() {
		let url = Url::parse("http://photos.example.net/photos").expect("URL fixture should parse.");
		let form = ::http::Request::post(url.as_str())
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded; charset=utf-8")
			.body(b"file=vacation.jpg&size=original".to_vec())
			.expect("Request fixture should build.");
		let context = photos_context();
		let signed = context.sign_request(form).expect("Signing should succeed.");
		let expected = context.authorization_header(
			&Method::POST,
			&url,
			&[("file".into(), "vacation.jpg".into()), ("size".into(), "original".into())],
		);

		assert_eq!(header(&signed), expected);
	}

	#[test]
	fn other_bodies_are_excluded() {
		let url = Url::parse("http://photos.example.net/photos").expect("URL fixture should parse.");
		let json = ::http::Request::post(url.as_str())
			.header(CONTENT_TYPE, "application/json")
			.body(br#"{"file":"vacation.jpg"}"#.to_vec())
			.expect("Request fixture should build.");
		let context = photos_context();
		let signed = context.sign_request(json).expect("Signing should succeed.");

		assert_eq!(header(&signed), context.authorization_header(&Method::POST, &url, &[]));
	}
}
