//! Clock and nonce capability feeding `oauth_timestamp` and `oauth_nonce`.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

const NONCE_LEN: usize = 32;

/// Supplies the per-request nonce and timestamp.
///
/// Implementations must be safe to call from concurrent flows and must not repeat a nonce for the
/// same timestamp.
pub trait NonceSource
where
	Self: Send + Sync,
{
	/// Returns a fresh random nonce.
	fn nonce(&self) -> String;

	/// Returns the current time in seconds since the Unix epoch.
	fn timestamp(&self) -> i64;
}

/// Default source backed by the thread-local CSPRNG and the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemNonceSource;
impl NonceSource for SystemNonceSource {
	fn nonce(&self) -> String {
		rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
	}

	fn timestamp(&self) -> i64 {
		OffsetDateTime::now_utc().unix_timestamp()
	}
}

/// Source that always returns the same nonce and timestamp; used to reproduce published signature
/// vectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedNonceSource {
	/// Nonce returned on every call.
	pub nonce: String,
	/// Timestamp returned on every call.
	pub timestamp: i64,
}
impl FixedNonceSource {
	/// Creates a fixed source.
	pub fn new(nonce: impl Into<String>, timestamp: i64) -> Self {
		Self { nonce: nonce.into(), timestamp }
	}
}
impl NonceSource for FixedNonceSource {
	fn nonce(&self) -> String {
		self.nonce.clone()
	}

	fn timestamp(&self) -> i64 {
		self.timestamp
	}
}
