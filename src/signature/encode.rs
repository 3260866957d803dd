//! RFC 3986 percent-encoding as required by RFC 5849 §3.6.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except ALPHA, DIGIT, `-`, `.`, `_`, and `~`.
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes `value` over its UTF-8 bytes using uppercase hex digits.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}
