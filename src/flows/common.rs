//! Shared helpers for the credential requests (request assembly, status checks, form parsing).

// crates.io
use ::http::{
	Method,
	header::{AUTHORIZATION, CONTENT_LENGTH},
};
// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::{HttpRequest, HttpResponse},
};

/// Builds the empty-bodied `POST` sent to a credential endpoint.
pub(crate) fn credential_request(
	url: &Url,
	authorization: &str,
) -> Result<HttpRequest, TransportError> {
	Ok(::http::Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(AUTHORIZATION, authorization)
		.header(CONTENT_LENGTH, "0")
		.body(Vec::new())?)
}

/// Rejects non-2xx answers from credential endpoints.
pub(crate) fn ensure_success(response: &HttpResponse) -> Result<(), TransportError> {
	if response.status().is_success() {
		Ok(())
	} else {
		Err(TransportError::unexpected_status(response.status().as_u16(), response.body()))
	}
}

/// Decodes an `application/x-www-form-urlencoded` body.
///
/// The first occurrence wins when a name repeats.
pub(crate) fn parse_form(body: &[u8]) -> BTreeMap<String, String> {
	let mut fields = BTreeMap::new();

	for (name, value) in url::form_urlencoded::parse(body) {
		fields.entry(name.into_owned()).or_insert_with(|| value.into_owned());
	}

	fields
}

/// Removes `field` from `fields`, failing when it is absent or empty.
pub(crate) fn take_required(
	fields: &mut BTreeMap<String, String>,
	endpoint: &'static str,
	field: &'static str,
) -> Result<String> {
	match fields.remove(field) {
		Some(value) if !value.is_empty() => Ok(value),
		_ => Err(Error::MissingResponseData { endpoint, field }),
	}
}
