//! Temporary-token store contract and built-in implementations.
//!
//! `begin` writes the temporary token → secret mapping and `authorised` reads it back, usually in
//! a different request (and possibly a different process) after the resource owner approves
//! access. Stores must make a completed [`TemporaryTokenStore::put`] visible to every later
//! [`TemporaryTokenStore::get`]; concurrent writes for one token may resolve last-write-wins.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{TemporaryToken, TokenSecret},
};

/// Boxed future returned by [`TemporaryTokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract mapping temporary tokens to their secrets.
pub trait TemporaryTokenStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the secret for `token`.
	fn put<'a>(&'a self, token: &'a TemporaryToken, secret: &'a TokenSecret) -> StoreFuture<'a, ()>;

	/// Fetches the secret for `token`; `Ok(None)` when unknown or expired.
	fn get<'a>(&'a self, token: &'a TemporaryToken) -> StoreFuture<'a, Option<TokenSecret>>;
}

/// Error type produced by [`TemporaryTokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures (e.g., serde) surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Stored secret plus its optional expiry instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSecret {
	/// Temporary token secret.
	pub secret: TokenSecret,
	/// Instant after which the entry reads as absent.
	pub expires_at: Option<OffsetDateTime>,
}
impl StoredSecret {
	/// Wraps `secret`, expiring `ttl` after `now` when a TTL is set.
	pub fn new(secret: TokenSecret, ttl: Option<Duration>, now: OffsetDateTime) -> Self {
		Self { secret, expires_at: ttl.map(|ttl| now + ttl) }
	}

	/// Whether the entry has expired at `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|at| now >= at)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_consumer_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let consumer_error: Error = store_error.clone().into();

		assert!(matches!(consumer_error, Error::Storage(_)));
		assert!(consumer_error.to_string().contains("database unreachable"));

		let source = StdError::source(&consumer_error)
			.expect("Consumer error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn stored_secret_expiry_is_inclusive() {
		let now = time::macros::datetime!(2025-11-10 12:00 UTC);
		let entry = StoredSecret::new(TokenSecret::new("sec"), Some(Duration::minutes(5)), now);

		assert!(!entry.is_expired_at(now + Duration::minutes(4)));
		assert!(entry.is_expired_at(now + Duration::minutes(5)));
		assert!(!StoredSecret::new(TokenSecret::new("sec"), None, now).is_expired_at(now));
	}
}
