//! Thread-safe in-memory [`TemporaryTokenStore`] for tests and single-process deployments.
//!
//! Entries live only as long as the owning process. Multi-instance deployments, where `begin` and
//! `authorised` may land on different hosts, need a shared durable store instead.

// self
use crate::{
	_prelude::*,
	auth::{TemporaryToken, TokenSecret},
	store::{StoreError, StoreFuture, StoredSecret, TemporaryTokenStore},
};

type StoreMap = Arc<RwLock<HashMap<TemporaryToken, StoredSecret>>>;

/// In-process storage backend with an optional retention window.
///
/// Cloning shares the underlying map; construct one instance per consumer and pass it explicitly.
///
/// Entries are never removed after a successful exchange, so the [`Default`] store (no TTL) grows
/// with every `begin`. Long-running consumers should use [`MemoryStore::with_ttl`] with a window
/// of a few minutes and call [`MemoryStore::purge_expired`] periodically.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	map: StoreMap,
	ttl: Option<Duration>,
}
impl MemoryStore {
	/// Creates a store whose entries read as absent once `ttl` has elapsed.
	///
	/// This is the constructor to use outside tests; see the type-level docs.
	pub fn with_ttl(ttl: Duration) -> Self {
		Self { map: Default::default(), ttl: Some(ttl) }
	}

	/// Number of stored entries, including ones that expired but were not read yet.
	pub fn len(&self) -> usize {
		self.map.read().len()
	}

	/// Whether the store holds no entries.
	pub fn is_empty(&self) -> bool {
		self.map.read().is_empty()
	}

	/// Drops every expired entry.
	pub fn purge_expired(&self) {
		let now = OffsetDateTime::now_utc();

		self.map.write().retain(|_, entry| !entry.is_expired_at(now));
	}

	fn put_now(&self, token: TemporaryToken, secret: TokenSecret) -> Result<(), StoreError> {
		let entry = StoredSecret::new(secret, self.ttl, OffsetDateTime::now_utc());

		self.map.write().insert(token, entry);

		Ok(())
	}

	fn get_now(&self, token: &TemporaryToken) -> Option<TokenSecret> {
		let now = OffsetDateTime::now_utc();
		let mut guard = self.map.write();
		let expired = guard.get(token)?.is_expired_at(now);

		if expired {
			guard.remove(token);

			return None;
		}

		guard.get(token).map(|entry| entry.secret.clone())
	}
}
impl TemporaryTokenStore for MemoryStore {
	fn put<'a>(&'a self, token: &'a TemporaryToken, secret: &'a TokenSecret) -> StoreFuture<'a, ()> {
		let token = token.to_owned();
		let secret = secret.to_owned();

		Box::pin(async move { self.put_now(token, secret) })
	}

	fn get<'a>(&'a self, token: &'a TemporaryToken) -> StoreFuture<'a, Option<TokenSecret>> {
		Box::pin(async move { Ok(self.get_now(token)) })
	}
}
