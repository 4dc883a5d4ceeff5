use std::{collections::BTreeMap, fmt, io::Error, path::PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Record;

pub const DEFAULT_COLLECTION: &str = "_default";
pub const TRACKS: &str = "tracks";
pub const ALBUMS: &str = "albums";
pub const ARTISTS: &str = "artists";

#[derive(Debug)]
pub enum StoreError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeError(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "store io error: {}", e),
            StoreError::SerdeError(e) => write!(f, "store file is not valid json: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Which field identifies a record during an upsert.
#[derive(Debug, Clone, Copy)]
pub enum Key<'a> {
    Id(&'a str),
    Name(&'a str),
}

impl Key<'_> {
    fn field(&self) -> &'static str {
        match self {
            Key::Id(_) => "id",
            Key::Name(_) => "name",
        }
    }

    fn value(&self) -> &str {
        match self {
            Key::Id(v) | Key::Name(v) => v,
        }
    }

    fn matches(&self, record: &Record) -> bool {
        record.get(self.field()).and_then(Value::as_str) == Some(self.value())
    }
}

/// An ordered list of documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, key: Key<'_>) -> Option<&Record> {
        self.records.iter().find(|r| key.matches(r))
    }

    /// Merges `record` into the first record matching `key`, or appends it.
    ///
    /// Fields of `record` overwrite stored fields of the same name; stored
    /// fields it does not mention are kept.
    pub fn upsert(&mut self, record: Record, key: Key<'_>) -> &Record {
        let index = match self.records.iter().position(|r| key.matches(r)) {
            Some(index) => {
                self.records[index].extend(record);
                index
            }
            None => {
                self.records.push(record);
                self.records.len() - 1
            }
        };
        &self.records[index]
    }

    /// Upserts on the record's own `id`. Records without a string id are
    /// rejected with `None`.
    pub fn upsert_by_id(&mut self, record: Record) -> Option<&Record> {
        let id = record.get("id").and_then(Value::as_str)?.to_string();
        Some(self.upsert(record, Key::Id(&id)))
    }
}

/// A JSON file holding named collections, loaded fully into memory.
///
/// Nothing touches the disk until [`Store::persist`] is called.
#[derive(Debug, Default)]
pub struct Store {
    path: Option<PathBuf>,
    collections: BTreeMap<String, Collection>,
}

impl Store {
    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at `path` and loads every collection into memory.
    ///
    /// A missing or blank file opens as an empty store; nothing is created on
    /// disk until [`Store::persist`].
    ///
    /// # Errors
    ///
    /// - [`StoreError::IoError`] when the file exists but cannot be read
    /// - [`StoreError::SerdeError`] when its content is not a JSON object of
    ///   record arrays
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let collections = if path.is_file() {
            let content = async_fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            collections,
        })
    }

    /// Writes every collection back as pretty-printed JSON, creating parent
    /// directories as needed. A no-op for [`Store::in_memory`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IoError`] when the directory or file cannot be
    /// written.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.collections)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Returns the named collection, creating it when absent.
    pub fn collection(&mut self, name: &str) -> &mut Collection {
        self.collections.entry(name.to_string()).or_default()
    }

    /// Full scan of a collection; unknown names read as empty.
    pub fn all(&self, name: &str) -> &[Record] {
        self.collections
            .get(name)
            .map(Collection::all)
            .unwrap_or_default()
    }

    pub fn collections(&self) -> impl Iterator<Item = (&str, &Collection)> {
        self.collections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn purge(&mut self) {
        self.collections.clear();
    }

    /// Looks up a metadata singleton by `name` in the default collection.
    pub fn get(&self, name: &str) -> Option<&Record> {
        self.collections
            .get(DEFAULT_COLLECTION)
            .and_then(|c| c.find(Key::Name(name)))
    }

    /// Upserts a metadata singleton in the default collection. The `name`
    /// field of the stored record is always set to `name`.
    pub fn upsert(&mut self, name: &str, mut record: Record) -> &Record {
        record.insert("name".to_string(), Value::String(name.to_string()));
        self.collection(DEFAULT_COLLECTION)
            .upsert(record, Key::Name(name))
    }
}
