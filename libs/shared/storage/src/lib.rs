//! Durable client-scoped key-value storage.
//!
//! Each named store ("auth-storage", "theme-storage", ...) is one versioned JSON
//! file under the configured storage directory. The store name doubles as the
//! schema namespace so future versions can migrate blobs independently.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const STORE_SCHEMA_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid store name: {0}")]
    InvalidStoreName(String),

    #[error("Unsupported schema version {found} for store {store} (expected {expected})")]
    VersionMismatch {
        store: String,
        found: u32,
        expected: u32,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreBlob<T> {
    version: u32,
    state: T,
}

/// File-backed key-value store scoped to one client installation.
#[derive(Debug, Clone)]
pub struct ClientStore {
    root: PathBuf,
}

impl ClientStore {
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!("Client store opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn get<T: DeserializeOwned>(&self, store_name: &str) -> Result<Option<T>, StorageError> {
        let path = self.blob_path(store_name)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let blob: StoreBlob<T> = match serde_json::from_str(&raw) {
            Ok(blob) => blob,
            Err(err) => {
                // A corrupt blob is treated as absent rather than wedging the caller.
                warn!("Discarding unreadable blob for store {}: {}", store_name, err);
                return Ok(None);
            }
        };

        if blob.version != STORE_SCHEMA_VERSION {
            return Err(StorageError::VersionMismatch {
                store: store_name.to_string(),
                found: blob.version,
                expected: STORE_SCHEMA_VERSION,
            });
        }

        Ok(Some(blob.state))
    }

    pub fn put<T: Serialize>(&self, store_name: &str, state: &T) -> Result<(), StorageError> {
        let path = self.blob_path(store_name)?;
        let blob = StoreBlob {
            version: STORE_SCHEMA_VERSION,
            state,
        };
        let raw = serde_json::to_string_pretty(&blob)?;

        // Write through a temp file so a crash mid-write never leaves a torn blob.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &path)?;
        debug!("Persisted store {}", store_name);
        Ok(())
    }

    pub fn remove(&self, store_name: &str) -> Result<(), StorageError> {
        let path = self.blob_path(store_name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn blob_path(&self, store_name: &str) -> Result<PathBuf, StorageError> {
        let valid = !store_name.is_empty()
            && store_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidStoreName(store_name.to_string()));
        }
        Ok(self.root.join(format!("{store_name}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Pref {
        theme: String,
    }

    #[test]
    fn round_trips_a_named_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClientStore::open(dir.path()).unwrap();

        assert_eq!(store.get::<Pref>("theme-storage").unwrap(), None);

        let pref = Pref {
            theme: "dark".to_string(),
        };
        store.put("theme-storage", &pref).unwrap();
        assert_eq!(store.get::<Pref>("theme-storage").unwrap(), Some(pref));

        store.remove("theme-storage").unwrap();
        assert_eq!(store.get::<Pref>("theme-storage").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_store_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClientStore::open(dir.path()).unwrap();
        let err = store.get::<Pref>("../escape").unwrap_err();
        assert!(matches!(err, StorageError::InvalidStoreName(_)));
    }

    #[test]
    fn corrupt_blob_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClientStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("auth-storage.json"), "{not json").unwrap();
        assert_eq!(store.get::<Pref>("auth-storage").unwrap(), None);
    }
}
