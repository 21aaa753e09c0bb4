use crate::error::FacadeError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub trait KeyValueStore {
    fn put(&self, key: &str, value: String) -> Result<(), FacadeError>;

    fn get(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn put(&self, key: &str, value: String) -> Result<(), FacadeError> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// A missing file starts empty; an unreadable or corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FacadeError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|error| {
                FacadeError::Storage(format!("{} is not a storage file: {error}", path.display()))
            })?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                return Err(FacadeError::Storage(format!(
                    "failed to read {}: {error}",
                    path.display()
                )))
            }
        };
        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), FacadeError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| {
                FacadeError::Storage(format!("failed to create {}: {error}", parent.display()))
            })?;
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|error| FacadeError::Storage(error.to_string()))?;
        fs::write(&self.path, raw).map_err(|error| {
            FacadeError::Storage(format!("failed to write {}: {error}", self.path.display()))
        })
    }
}

impl KeyValueStore for FileStore {
    /// The entry only becomes visible once the file write succeeded.
    fn put(&self, key: &str, value: String) -> Result<(), FacadeError> {
        let mut next = self.entries.borrow().clone();
        next.insert(key.to_string(), value);
        self.write_entries(&next)?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), FacadeError> {
    if key.is_empty() {
        return Ok(());
    }
    let encoded = serde_json::to_string(value)
        .map_err(|error| FacadeError::Storage(format!("failed to encode `{key}`: {error}")))?;
    store.put(key, encoded)
}

/// Missing, empty and undecodable entries all read as `None`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key).filter(|raw| !raw.is_empty())?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(key, %error, "stored value could not be decoded");
            None
        }
    }
}
