//! Key-value persistence for values that outlive a session
//!
//! Stores hold JSON strings under fixed keys. [`Persisted`] mirrors one
//! [`Record`] in memory; during play its storage failures are logged, never
//! surfaced.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Durable string storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store (tests, or hosts without durable storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let value =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;

        // Temp file + rename: readers never see a partial record
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

/// A JSON value kept under a fixed key
pub trait Record: Serialize + DeserializeOwned {
    const STORAGE_KEY: &'static str;

    /// Fold in the stored record when this value was built up while storage
    /// was unreadable
    fn merge(&mut self, stored: Self);
}

/// Read a record. Storage errors propagate; an unparsable record counts as
/// absent and is replaced on the next write.
pub fn read_record<T: Record>(store: &dyn KeyValueStore) -> Result<Option<T>> {
    let Some(json) = store.get(T::STORAGE_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str(&json) {
        Ok(record) => Ok(Some(record)),
        Err(err) => {
            log::warn!("Discarding unreadable {} record: {err}", T::STORAGE_KEY);
            Ok(None)
        }
    }
}

pub fn write_record<T: Record>(store: &mut dyn KeyValueStore, record: &T) -> Result<()> {
    let json = serde_json::to_string(record)?;
    store
        .set(T::STORAGE_KEY, &json)
        .with_context(|| format!("saving {}", T::STORAGE_KEY))?;
    log::debug!("Saved {}: {json}", T::STORAGE_KEY);
    Ok(())
}

/// In-memory copy of a stored [`Record`]
///
/// Read once up front. If that read fails the value starts from default and
/// nothing is written until a later read succeeds and the stored record has
/// been merged in, so an unreadable record is never overwritten by a smaller
/// one.
#[derive(Debug, Clone)]
pub struct Persisted<T> {
    value: T,
    synced: bool,
}

impl<T: Record + Default> Persisted<T> {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match read_record::<T>(store) {
            Ok(Some(value)) => {
                log::info!("Loaded {}", T::STORAGE_KEY);
                Self {
                    value,
                    synced: true,
                }
            }
            Ok(None) => {
                log::info!("No {} record found, starting fresh", T::STORAGE_KEY);
                Self {
                    value: T::default(),
                    synced: true,
                }
            }
            Err(err) => {
                log::warn!("Could not load {}, starting fresh: {err:#}", T::STORAGE_KEY);
                Self {
                    value: T::default(),
                    synced: false,
                }
            }
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Apply `change` and write the value back if it reports a change.
    /// Returns what `change` returned.
    pub fn update(
        &mut self,
        store: &mut dyn KeyValueStore,
        change: impl FnOnce(&mut T) -> bool,
    ) -> bool {
        self.sync(&*store);
        if !change(&mut self.value) {
            return false;
        }
        if !self.synced {
            log::warn!(
                "{} kept in memory only: stored record unreadable",
                T::STORAGE_KEY
            );
        } else if let Err(err) = write_record(store, &self.value) {
            log::warn!("{} kept in memory only: {err:#}", T::STORAGE_KEY);
        }
        true
    }

    fn sync(&mut self, store: &dyn KeyValueStore) {
        if self.synced {
            return;
        }
        match read_record::<T>(store) {
            Ok(stored) => {
                if let Some(stored) = stored {
                    self.value.merge(stored);
                }
                self.synced = true;
                log::info!("{} storage readable again", T::STORAGE_KEY);
            }
            Err(err) => log::warn!("{} still unreadable: {err:#}", T::STORAGE_KEY),
        }
    }
}
