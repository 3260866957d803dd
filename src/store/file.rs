//! File-backed [`TemporaryTokenStore`] that survives process restarts.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{TemporaryToken, TokenSecret},
	store::{StoreError, StoreFuture, StoredSecret, TemporaryTokenStore},
};

type Snapshot = HashMap<TemporaryToken, StoredSecret>;

/// Persists temporary-token secrets to a JSON file after each mutation.
///
/// Every operation re-reads the snapshot from disk, so instances opened on the same path (in this
/// process or another one) observe each other's completed writes. Writes go through a temporary
/// file plus rename, so readers never observe a torn snapshot. The read-merge-write cycle is only
/// serialized within one instance and its clones; concurrent writers in separate processes may
/// lose updates.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	ttl: Option<Duration>,
	inner: Arc<RwLock<Snapshot>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, ttl: None, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Sets the retention window applied to subsequent writes.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = Some(ttl);

		self
	}

	/// Location of the JSON snapshot.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.is_empty() {
			return Ok(HashMap::new());
		}

		let mut de = serde_json::Deserializer::from_slice(&bytes);
		let entries: Vec<(TemporaryToken, StoredSecret)> =
			serde_path_to_error::deserialize(&mut de).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {} at `{}`: {}", path.display(), e.path(), e.inner()),
			})?;
		let now = OffsetDateTime::now_utc();

		Ok(entries.into_iter().filter(|(_, entry)| !entry.is_expired_at(now)).collect())
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &Snapshot) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let snapshot: Vec<_> = contents.iter().collect();
		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl TemporaryTokenStore for FileStore {
	fn put<'a>(&'a self, token: &'a TemporaryToken, secret: &'a TokenSecret) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();
			let mut guard = self.inner.write();
			let mut snapshot = Self::load_snapshot(&self.path)?;

			snapshot.insert(token.to_owned(), StoredSecret::new(secret.to_owned(), self.ttl, now));
			self.persist_locked(&snapshot)?;
			*guard = snapshot;

			Ok(())
		})
	}

	fn get<'a>(&'a self, token: &'a TemporaryToken) -> StoreFuture<'a, Option<TokenSecret>> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let snapshot = Self::load_snapshot(&self.path)?;
			let now = OffsetDateTime::now_utc();
			let secret = snapshot
				.get(token)
				.filter(|entry| !entry.is_expired_at(now))
				.map(|entry| entry.secret.clone());

			*guard = snapshot;

			Ok(secret)
		})
	}
}
