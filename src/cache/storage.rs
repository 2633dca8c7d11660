//! Storage Backend Module
//!
//! The cache store only needs two operations from its medium: read an item by
//! key and write an item by key. Anything that can round-trip plain JSON can
//! back a store.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

// == Storage Backend ==
/// Key-value medium underneath a [`CacheStore`](crate::cache::CacheStore).
pub trait StorageBackend: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get_item(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: Value) -> Result<()>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for Arc<S> {
    fn get_item(&self, key: &str) -> Option<Value> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: Value) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// Type-erased backend shared between owners.
pub type SharedStorage = Arc<dyn StorageBackend>;

// == Memory Storage ==
/// In-process map. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<Value> {
        self.items.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: Value) -> Result<()> {
        self.items.write().insert(key.to_string(), value);
        Ok(())
    }
}

// == File Storage ==
/// JSON file holding every item as one object.
///
/// The file is read once on open and rewritten in full on each write through
/// a temporary sibling file, so a failed write leaves the previous contents.
///
/// Writes are synchronous `std::fs` calls made under the lock. From async
/// code they block the calling worker for the length of the rewrite, which
/// suits small caches; move large stores behind `spawn_blocking`.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<HashMap<String, Value>>,
}

impl FileStorage {
    /// Opens `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        debug!("Opened file storage at {} with {} items", path.display(), items.len());

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &HashMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Option<Value> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: Value) -> Result<()> {
        let mut items = self.items.lock();
        let mut next = items.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *items = next;
        Ok(())
    }
}
