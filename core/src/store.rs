//! # Range Store
//!
//! Keyed persistence of one [`RangeSet`] per provider, last writer wins.
//!
//! The byte-level side is the [`Storage`] trait (a plain key to bytes map); [`RangeStore`]
//! layers the canonical JSON record on top of it. CIDR syntax is not checked here,
//! that is left to the matcher at query time.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use ip2provider_common::ranges::RangeSet;
use ip2provider_common::{Error, Result};

pub const RECORD_FILE: &str = "ipranges.json";

/// Raw key to bytes persistence.
pub trait Storage: Send + Sync {
    /// `Ok(None)` when nothing was ever written under `key`.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Stores each key at `<root>/<key>/ipranges.json`.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(key).join(RECORD_FILE)
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.record_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.record_path(key);
        let dir = self.root.join(key);
        fs::create_dir_all(&dir)?;

        // Rename into place so a concurrent reader sees either the old or the new record.
        let tmp = dir.join(format!(".{RECORD_FILE}.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| io::Error::other("memory storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| io::Error::other("memory storage lock poisoned"))?;
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// What is currently stored for a provider, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredStatus {
    Present { ipv4: usize, ipv6: usize },
    Missing,
    Corrupt(String),
}

pub struct RangeStore<S> {
    storage: S,
    write_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: Storage> RangeStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save(&self, provider: &str, ranges: &RangeSet) -> Result<()> {
        let bytes = ranges.to_json()?;

        let lock = self.write_lock(provider)?;
        let _guard = lock
            .lock()
            .map_err(|_| io::Error::other(format!("write lock for '{provider}' poisoned")))?;
        self.storage.write(provider, &bytes)?;
        Ok(())
    }

    pub fn load(&self, provider: &str) -> Result<RangeSet> {
        let bytes = self
            .storage
            .read(provider)?
            .ok_or_else(|| Error::NotFound(provider.to_string()))?;

        RangeSet::from_json(&bytes).map_err(|e| Error::CorruptData {
            provider: provider.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn status(&self, provider: &str) -> Result<StoredStatus> {
        match self.load(provider) {
            Ok(ranges) => Ok(StoredStatus::Present {
                ipv4: ranges.ipv4.len(),
                ipv6: ranges.ipv6.len(),
            }),
            Err(Error::NotFound(_)) => Ok(StoredStatus::Missing),
            Err(Error::CorruptData { reason, .. }) => Ok(StoredStatus::Corrupt(reason)),
            Err(e) => Err(e),
        }
    }

    fn write_lock(&self, provider: &str) -> Result<Arc<Mutex<()>>> {
        let mut locks = self
            .write_locks
            .lock()
            .map_err(|_| io::Error::other("write lock table poisoned"))?;
        Ok(locks.entry(provider.to_string()).or_default().clone())
    }
}
