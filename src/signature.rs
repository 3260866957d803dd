//! HMAC-SHA1 signature engine (RFC 5849 §3.4) and `Authorization` header rendering.
//!
//! Everything here is a pure function of its inputs except [`NonceSource`], which callers inject
//! so the nonce/timestamp pair can be pinned when reproducing known signatures.
//!
//! The pipeline is:
//!
//! 1. [`normalize_parameters`] percent-encodes every name and value, sorts by encoded name then
//!    encoded value, and joins `name=value` pairs with `&`.
//! 2. [`signature_base_string`] joins the uppercase method, the encoded [`base_string_uri`], and
//!    the encoded normalized parameters with `&`. Query parameters of the request URL are merged
//!    into the parameter set automatically.
//! 3. [`hmac_sha1_signature`] keys HMAC-SHA1 with [`signing_key`] and base64-encodes the digest.

pub mod encode;
pub mod nonce;

pub use encode::*;
pub use nonce::*;

// std
use std::fmt::Write as _;
// crates.io
use ::http::Method;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::{ConsumerKey, ConsumerSecret, TokenSecret},
};

/// Value of `oauth_signature_method` for every request this crate signs.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Value of `oauth_version` for every request this crate signs.
pub const OAUTH_VERSION: &str = "1.0";

type HmacSha1 = Hmac<Sha1>;

/// Decodes the query component of `url` into name/value pairs
/// (`application/x-www-form-urlencoded` rules, so `+` decodes to a space).
pub fn query_parameters(url: &Url) -> Vec<(String, String)> {
	url.query_pairs().into_owned().collect()
}

/// Builds the normalized request parameter string (RFC 5849 §3.4.1.3.2).
///
/// Duplicate names are allowed; pairs sharing a name are ordered by encoded value.
pub fn normalize_parameters<'a, I>(params: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut encoded: Vec<(String, String)> = params
		.into_iter()
		.map(|(name, value)| (percent_encode(name), percent_encode(value)))
		.collect();

	encoded.sort_unstable();

	let mut buf = String::new();

	for (idx, (name, value)) in encoded.iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(name);
		buf.push('=');
		buf.push_str(value);
	}

	buf
}

/// Builds the base string URI: lowercase scheme and host, explicit port only when it is not the
/// scheme default, path, and no query or fragment (RFC 5849 §3.4.1.2).
pub fn base_string_uri(url: &Url) -> String {
	let mut buf = String::new();

	buf.push_str(&url.scheme().to_ascii_lowercase());
	buf.push_str("://");
	buf.push_str(&url.host_str().unwrap_or_default().to_ascii_lowercase());

	// `Url` already drops ports that match the scheme default.
	if let Some(port) = url.port() {
		let _ = write!(buf, ":{port}");
	}

	buf.push_str(url.path());

	buf
}

/// Builds the signature base string for `method` + `url` over `params` plus the URL's own
/// query parameters.
///
/// `params` should contain the protocol parameters (without `oauth_signature` or `realm`) and
/// any form-encoded body parameters.
pub fn signature_base_string(method: &Method, url: &Url, params: &[(String, String)]) -> String {
	let query = query_parameters(url);
	let normalized = normalize_parameters(
		query.iter().chain(params.iter()).map(|(name, value)| (name.as_str(), value.as_str())),
	);

	format!(
		"{}&{}&{}",
		method.as_str().to_ascii_uppercase(),
		percent_encode(&base_string_uri(url)),
		percent_encode(&normalized),
	)
}

/// Builds the HMAC key: encoded consumer secret, `&`, encoded token secret (empty when absent).
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
	format!(
		"{}&{}",
		percent_encode(consumer_secret),
		percent_encode(token_secret.unwrap_or_default())
	)
}

/// Computes `oauth_signature` for the request.
pub fn hmac_sha1_signature(
	method: &Method,
	url: &Url,
	params: &[(String, String)],
	consumer_secret: &str,
	token_secret: Option<&str>,
) -> String {
	let base = signature_base_string(method, url, params);
	let key = signing_key(consumer_secret, token_secret);

	sign_base_string(&key, &base)
}

fn sign_base_string(key: &str, base: &str) -> String {
	let mut mac =
		HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length.");

	mac.update(base.as_bytes());

	STANDARD.encode(mac.finalize().into_bytes())
}

/// Protocol parameters for a single signed request.
///
/// The nonce and timestamp are drawn once at construction, so a value signs exactly one request.
#[derive(Clone)]
pub struct OAuthParameters {
	consumer_key: ConsumerKey,
	token: Option<String>,
	callback: Option<String>,
	verifier: Option<String>,
	nonce: String,
	timestamp: i64,
}
impl OAuthParameters {
	/// Starts a parameter set for `consumer_key`, drawing a fresh nonce and timestamp.
	pub fn new(consumer_key: &ConsumerKey, source: &dyn NonceSource) -> Self {
		Self {
			consumer_key: consumer_key.clone(),
			token: None,
			callback: None,
			verifier: None,
			nonce: source.nonce(),
			timestamp: source.timestamp(),
		}
	}

	/// Sets `oauth_token`.
	pub fn token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());

		self
	}

	/// Sets `oauth_callback` (a callback URL or the literal `oob`).
	pub fn callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());

		self
	}

	/// Sets `oauth_verifier`.
	pub fn verifier(mut self, verifier: impl Into<String>) -> Self {
		self.verifier = Some(verifier.into());

		self
	}

	/// The nonce drawn for this request.
	pub fn nonce(&self) -> &str {
		&self.nonce
	}

	/// The timestamp drawn for this request.
	pub fn timestamp(&self) -> i64 {
		self.timestamp
	}

	/// Returns the protocol parameters that participate in the signature.
	pub fn to_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::with_capacity(8);

		if let Some(callback) = &self.callback {
			pairs.push(("oauth_callback".into(), callback.clone()));
		}

		pairs.push(("oauth_consumer_key".into(), self.consumer_key.to_string()));
		pairs.push(("oauth_nonce".into(), self.nonce.clone()));
		pairs.push(("oauth_signature_method".into(), SIGNATURE_METHOD.into()));
		pairs.push(("oauth_timestamp".into(), self.timestamp.to_string()));

		if let Some(token) = &self.token {
			pairs.push(("oauth_token".into(), token.clone()));
		}
		if let Some(verifier) = &self.verifier {
			pairs.push(("oauth_verifier".into(), verifier.clone()));
		}

		pairs.push(("oauth_version".into(), OAUTH_VERSION.into()));

		pairs
	}

	/// Signs the request described by `method`, `url`, and the form-encoded `body_params`.
	pub fn sign(
		self,
		method: &Method,
		url: &Url,
		body_params: &[(String, String)],
		consumer_secret: &ConsumerSecret,
		token_secret: Option<&TokenSecret>,
	) -> SignedParameters {
		let mut pairs = self.to_pairs();
		let mut signed_over = pairs.clone();

		signed_over.extend_from_slice(body_params);

		let signature = hmac_sha1_signature(
			method,
			url,
			&signed_over,
			consumer_secret.expose(),
			token_secret.map(TokenSecret::expose),
		);

		pairs.push(("oauth_signature".into(), signature.clone()));

		SignedParameters { pairs, signature }
	}
}
impl Debug for OAuthParameters {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthParameters")
			.field("consumer_key", &self.consumer_key)
			.field("token_set", &self.token.is_some())
			.field("callback", &self.callback)
			.field("verifier_set", &self.verifier.is_some())
			.field("timestamp", &self.timestamp)
			.finish()
	}
}

/// Protocol parameters plus the computed `oauth_signature`.
#[derive(Clone, Debug)]
pub struct SignedParameters {
	pairs: Vec<(String, String)>,
	signature: String,
}
impl SignedParameters {
	/// The base64 `oauth_signature` value.
	pub fn signature(&self) -> &str {
		&self.signature
	}

	/// All protocol parameters including `oauth_signature`.
	pub fn pairs(&self) -> &[(String, String)] {
		&self.pairs
	}

	/// Renders the `Authorization: OAuth ...` header value (RFC 5849 §3.5.1).
	///
	/// `realm` is emitted first when supplied and never participates in the signature.
	pub fn authorization_header(&self, realm: Option<&str>) -> String {
		let mut buf = String::from("OAuth ");
		let mut first = true;

		if let Some(realm) = realm {
			let escaped = realm.replace('\\', "\\\\").replace('"', "\\\"");
			let _ = write!(buf, "realm=\"{escaped}\"");

			first = false;
		}

		let mut sorted: Vec<_> = self.pairs.iter().collect();

		sorted.sort();

		for (name, value) in sorted {
			if !first {
				buf.push_str(", ");
			}

			let _ = write!(buf, "{}=\"{}\"", percent_encode(name), percent_encode(value));

			first = false;
		}

		buf
	}
}
