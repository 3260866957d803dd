// std
use std::{collections::VecDeque, sync::Arc};
// crates.io
use http::{Method, StatusCode, header::AUTHORIZATION};
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
use url::Url;
// self
use oauth1_consumer::{
	error::{ConfigError, Error},
	ext::{self, RequestSignerExt},
	flows::{CallbackFlow, NoCallbackFlow},
	http::{HttpFuture, HttpRequest, HttpResponse, OAuthHttpClient},
	provider::{CredentialContext, ProviderEndpoints},
	auth::{TemporaryToken, TokenSecret},
	signature::FixedNonceSource,
	store::{MemoryStore, StoreError, StoreFuture, TemporaryTokenStore},
};

const NONCE: &str = "nonce123";
const TIMESTAMP: i64 = 1_700_000_000;

/// Replays canned responses and keeps every request it receives.
#[derive(Default)]
struct RecordingClient {
	requests: Mutex<Vec<HttpRequest>>,
	responses: Mutex<VecDeque<(u16, &'static str)>>,
}
impl RecordingClient {
	fn replying(responses: impl IntoIterator<Item = (u16, &'static str)>) -> Arc<Self> {
		Arc::new(Self {
			requests: Default::default(),
			responses: Mutex::new(responses.into_iter().collect()),
		})
	}

	fn authorization(&self, index: usize) -> String {
		self.requests.lock()[index]
			.headers()
			.get(AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.expect("Recorded request should carry an Authorization header.")
			.to_owned()
	}

	fn request_count(&self) -> usize {
		self.requests.lock().len()
	}
}
impl OAuthHttpClient for RecordingClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		self.requests.lock().push(request);

		let (status, body) = self.responses.lock().pop_front().unwrap_or((500, "no canned response"));

		Box::pin(async move {
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() = StatusCode::from_u16(status).map_err(http::Error::from)?;

			Ok(response)
		})
	}
}

/// Store whose every operation fails with a backend error.
struct UnavailableStore;
impl TemporaryTokenStore for UnavailableStore {
	fn put<'a>(&'a self, _: &'a TemporaryToken, _: &'a TokenSecret) -> StoreFuture<'a, ()> {
		Box::pin(async { Err(StoreError::Backend { message: "store offline".into() }) })
	}

	fn get<'a>(&'a self, _: &'a TemporaryToken) -> StoreFuture<'a, Option<TokenSecret>> {
		Box::pin(async { Err(StoreError::Backend { message: "store offline".into() }) })
	}
}

fn endpoints() -> ProviderEndpoints {
	ProviderEndpoints::parse(
		"https://provider.example/oauth/request_token",
		Some("https://provider.example/oauth/authorize"),
		"https://provider.example/oauth/access_token",
	)
	.expect("Endpoint fixture should parse.")
}

fn context(callback: Option<&str>) -> (CredentialContext, Arc<MemoryStore>) {
	let store = Arc::new(MemoryStore::default());
	let shared: Arc<dyn TemporaryTokenStore> = store.clone();
	let mut builder = CredentialContext::builder("ck", "cs")
		.endpoints(endpoints())
		.store(shared)
		.nonce_source(Arc::new(FixedNonceSource::new(NONCE, TIMESTAMP)));

	if let Some(callback) = callback {
		builder = builder.callback(Url::parse(callback).expect("Callback fixture should parse."));
	}

	(builder.build().expect("Credential context should build."), store)
}

/// Splits an `Authorization: OAuth ...` value into decoded name/value pairs.
fn header_params(header: &str) -> Vec<(String, String)> {
	header
		.strip_prefix("OAuth ")
		.expect("Header should use the OAuth scheme.")
		.split(", ")
		.map(|pair| {
			let (name, quoted) = pair.split_once('=').expect("Header parameter should contain `=`.");
			let value = quoted.trim_matches('"');

			(
				name.to_owned(),
				percent_decode_str(value).decode_utf8().expect("Header value should be UTF-8.").into_owned(),
			)
		})
		.collect()
}

fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
	params.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
}

#[tokio::test]
async fn callback_flow_signatures_match_hand_computed_values() {
	let client = RecordingClient::replying([
		(200, "oauth_token=tok123&oauth_token_secret=sec456&oauth_callback_confirmed=true"),
		(200, "oauth_token=atok&oauth_token_secret=asec&user_id=42"),
	]);
	let (context, store) = context(None);
	let flow = CallbackFlow::with_http_client(context, client.clone());
	let begin = flow.begin().await.expect("Temporary credential request should succeed.");

	assert_eq!(begin.temporary_token.as_str(), "tok123");
	assert!(begin.callback_confirmed);
	assert_eq!(
		begin.redirect_url.map(String::from).as_deref(),
		Some("https://provider.example/oauth/authorize?oauth_token=tok123")
	);
	assert_eq!(store.len(), 1);

	let temporary = header_params(&client.authorization(0));

	assert_eq!(param(&temporary, "oauth_callback"), Some("oob"));
	assert_eq!(param(&temporary, "oauth_consumer_key"), Some("ck"));
	assert_eq!(param(&temporary, "oauth_nonce"), Some(NONCE));
	assert_eq!(param(&temporary, "oauth_timestamp"), Some("1700000000"));
	assert_eq!(param(&temporary, "oauth_signature_method"), Some("HMAC-SHA1"));
	assert_eq!(param(&temporary, "oauth_version"), Some("1.0"));
	// base64(HMAC-SHA1("cs&", "POST&https%3A%2F%2Fprovider.example%2Foauth%2Frequest_token&...")).
	assert_eq!(param(&temporary, "oauth_signature"), Some("pPhMH1Rgup63+F5pPBSAaUcpXvY="));

	let authorised =
		flow.authorised("tok123", "verifier1").await.expect("Token credential exchange should succeed.");
	let access = header_params(&client.authorization(1));

	assert_eq!(param(&access, "oauth_callback"), None);
	assert_eq!(param(&access, "oauth_token"), Some("tok123"));
	assert_eq!(param(&access, "oauth_verifier"), Some("verifier1"));
	// Keyed with "cs&sec456", the temporary secret stored by `begin`.
	assert_eq!(param(&access, "oauth_signature"), Some("w5OvyMJaGBwy2OsoSRv4KqDDfLw="));
	assert_eq!(authorised.access.token.as_str(), "atok");
	assert_eq!(authorised.access.secret.expose(), "asec");
	assert_eq!(authorised.access.extra.get("user_id").map(String::as_str), Some("42"));
	assert_eq!(authorised.signing.token_secret().expose(), "asec");
	assert_eq!(authorised.signing.signature_method(), "HMAC-SHA1");
	assert_eq!(authorised.signing.version(), "1.0");
}

#[tokio::test]
async fn signing_context_signs_resource_requests() {
	let client = RecordingClient::replying([
		(200, "oauth_token=tok123&oauth_token_secret=sec456"),
		(200, "oauth_token=atok&oauth_token_secret=asec"),
		(404, "missing"),
	]);
	let (context, _store) = context(None);
	let flow = CallbackFlow::with_http_client(context, client.clone());

	flow.begin().await.expect("Temporary credential request should succeed.");

	let signing = flow
		.authorised("tok123", "verifier1")
		.await
		.expect("Token credential exchange should succeed.")
		.signing;
	let request = http::Request::builder()
		.method(Method::GET)
		.uri("https://api.example/1/statuses?count=5")
		.body(Vec::new())
		.expect("Resource request should build.");
	let response = ext::execute_signed(client.as_ref(), &signing, request)
		.await
		.expect("Signed request should reach the transport.");

	// Non-2xx answers are handed back untouched.
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let resource = header_params(&client.authorization(2));

	assert_eq!(param(&resource, "oauth_token"), Some("atok"));
	assert_eq!(param(&resource, "count"), None);
	// Keyed with "cs&asec"; the query parameter `count=5` is part of the base string.
	assert_eq!(param(&resource, "oauth_signature"), Some("+HZwj/fPXlX3jwXPEu1ZW0k2Tu4="));

	let again = signing
		.sign_request(
			http::Request::get("https://api.example/1/statuses?count=5")
				.body(Vec::new())
				.expect("Resource request should build."),
		)
		.expect("Signing should succeed.");

	assert_eq!(
		again.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
		Some(client.authorization(2).as_str())
	);
}

#[tokio::test]
async fn configured_callback_url_is_announced() {
	let client = RecordingClient::replying([(200, "oauth_token=tok123&oauth_token_secret=sec456")]);
	let (context, _store) = context(Some("https://app.example/cb?session=1"));
	let flow = CallbackFlow::with_http_client(context, client.clone());

	flow.begin().await.expect("Temporary credential request should succeed.");

	let params = header_params(&client.authorization(0));

	assert_eq!(param(&params, "oauth_callback"), Some("https://app.example/cb?session=1"));
}

#[tokio::test]
async fn no_callback_flow_sends_neither_callback_nor_verifier() {
	let client = RecordingClient::replying([
		(200, "oauth_token=tok123&oauth_token_secret=sec456"),
		(200, "oauth_token=atok"),
	]);
	let (context, _store) = context(None);
	let flow = NoCallbackFlow::with_http_client(context, client.clone())
		.expect("Context without callback should be accepted.");
	let begin = flow.begin().await.expect("Temporary credential request should succeed.");

	assert!(!begin.callback_confirmed);
	assert_eq!(param(&header_params(&client.authorization(0)), "oauth_callback"), None);

	let authorised = flow
		.authorised(begin.temporary_token.as_str())
		.await
		.expect("Token credential exchange should succeed.");
	let access = header_params(&client.authorization(1));

	assert_eq!(param(&access, "oauth_verifier"), None);
	assert_eq!(param(&access, "oauth_token"), Some("tok123"));
	assert!(authorised.access.secret.is_empty());
}

#[tokio::test]
async fn no_callback_flow_rejects_callback_configuration() {
	let client = RecordingClient::replying([]);
	let (context, _store) = context(Some("https://app.example/cb"));
	let err = NoCallbackFlow::with_http_client(context, client)
		.expect_err("A callback URL should be rejected by the no-callback flow.");

	assert!(matches!(err, ConfigError::UnexpectedCallback));
}

#[tokio::test]
async fn empty_verifier_fails_before_any_request() {
	let client = RecordingClient::replying([(200, "oauth_token=tok123&oauth_token_secret=sec456")]);
	let (context, _store) = context(None);
	let flow = CallbackFlow::with_http_client(context, client.clone());

	flow.begin().await.expect("Temporary credential request should succeed.");

	let err = flow.authorised("tok123", "").await.expect_err("Empty verifier should be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::InvalidIdentifier(_))));
	assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn realm_leads_the_authorization_header() {
	let client = RecordingClient::replying([(200, "oauth_token=tok123&oauth_token_secret=sec456")]);
	let store: Arc<dyn TemporaryTokenStore> = Arc::new(MemoryStore::default());
	let context = CredentialContext::builder("ck", "cs")
		.endpoints(endpoints())
		.realm("Photos")
		.store(store)
		.nonce_source(Arc::new(FixedNonceSource::new(NONCE, TIMESTAMP)))
		.build()
		.expect("Credential context should build.");
	let flow = CallbackFlow::with_http_client(context, client.clone());

	flow.begin().await.expect("Temporary credential request should succeed.");

	let header = client.authorization(0);

	assert!(header.starts_with("OAuth realm=\"Photos\", "));
	// The realm never participates in the signature.
	assert_eq!(
		param(&header_params(&header), "oauth_signature"),
		Some("pPhMH1Rgup63+F5pPBSAaUcpXvY=")
	);
}

fn unavailable_store_flow(client: Arc<RecordingClient>) -> CallbackFlow<RecordingClient> {
	let store: Arc<dyn TemporaryTokenStore> = Arc::new(UnavailableStore);
	let context = CredentialContext::builder("ck", "cs")
		.endpoints(endpoints())
		.store(store)
		.nonce_source(Arc::new(FixedNonceSource::new(NONCE, TIMESTAMP)))
		.build()
		.expect("Credential context should build.");

	CallbackFlow::with_http_client(context, client)
}

#[tokio::test]
async fn store_write_failure_fails_begin() {
	let client = RecordingClient::replying([(200, "oauth_token=tok123&oauth_token_secret=sec456")]);
	let flow = unavailable_store_flow(client.clone());
	let err = flow.begin().await.expect_err("A failing store write should fail `begin`.");

	assert!(matches!(err, Error::Storage(StoreError::Backend { .. })));
	assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn store_read_failure_is_not_reported_as_unknown_token() {
	let client = RecordingClient::replying([(200, "oauth_token=atok&oauth_token_secret=asec")]);
	let flow = unavailable_store_flow(client.clone());
	let err = flow
		.authorised("tok123", "verifier1")
		.await
		.expect_err("A failing store read should fail `authorised`.");

	assert!(matches!(err, Error::Storage(StoreError::Backend { .. })));
	assert!(!matches!(err, Error::TokenNotFound));
	assert_eq!(client.request_count(), 0);
}
