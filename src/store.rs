use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys, one JSON document each.
pub mod keys {
    pub const CYCLES: &str = "menstrual_cycles";
    pub const DAY_ENTRIES: &str = "day_entries";
    pub const USER_STATS: &str = "user_stats";
    pub const ACHIEVEMENTS: &str = "achievements";
    pub const AI_INSIGHTS: &str = "ai_insights";
    pub const DONATIONS: &str = "donation_transactions";
    pub const DONATION_STATS: &str = "donation_stats";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed for `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("bad JSON document under `{key}`: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The persistence boundary: a flat namespace of JSON documents. Not
/// transactional across keys.
pub trait KvStore: Send {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// Reads and decodes a document, falling back to `default` when the key is
/// absent.
pub fn load_or<T, F>(store: &dyn KvStore, key: &str, default: F) -> Result<T, StoreError>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key)? {
        Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        }),
        None => Ok(default()),
    }
}

pub fn save<T: Serialize>(store: &mut dyn KvStore, key: &str, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &bytes)
}

/// Volatile store used in tests and ad-hoc tooling.
#[derive(Default)]
pub struct MemoryStore {
    docs: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.docs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.docs.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// One `<key>.json` file per document under a data directory. Good enough
/// for a single profile; writes to different keys are independent.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        fs::write(self.path(key), value).map_err(|source| StoreError::Io {
            key: key.to_string(),
            source,
        })
    }
}
