use crate::error::{ExtractError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What happened when the persisted cache was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLoad {
    /// No cache file yet
    Missing,
    /// Cache file read with this many entries
    Loaded(usize),
    /// Cache file was unreadable or malformed; started empty
    Recovered(String),
}

/// Persistent memo of normalized text -> previously chosen key.
///
/// The file is read lazily on first use and rewritten in full after every
/// `record`. Entries never expire.
pub struct SuggestionCache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    loaded: Option<CacheLoad>,
}

impl SuggestionCache {
    /// Create a cache backed by `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted store, replacing the in-memory entries.
    ///
    /// Never fails: a missing, unreadable or malformed file leaves the cache
    /// empty.
    pub fn load(&mut self) -> CacheLoad {
        let status = match read_entries(&self.path) {
            Ok(Some(entries)) => {
                let count = entries.len();
                self.entries = entries;
                CacheLoad::Loaded(count)
            }
            Ok(None) => {
                self.entries.clear();
                CacheLoad::Missing
            }
            Err(e) => {
                tracing::debug!("ignoring unusable suggestion cache: {}", e);
                self.entries.clear();
                CacheLoad::Recovered(e.to_string())
            }
        };
        self.loaded = Some(status.clone());
        status
    }

    fn ensure_loaded(&mut self) {
        if self.loaded.is_none() {
            self.load();
        }
    }

    /// Result of the last load, if the store has been read
    pub fn load_status(&self) -> Option<&CacheLoad> {
        self.loaded.as_ref()
    }

    pub fn lookup(&mut self, text: &str) -> Option<String> {
        self.ensure_loaded();
        self.entries.get(text).cloned()
    }

    /// Overwrite the entry for `text` and persist the whole cache.
    ///
    /// The in-memory entry is kept even when persisting fails.
    pub fn record(&mut self, text: &str, key: &str) -> Result<()> {
        self.ensure_loaded();
        self.entries.insert(text.to_string(), key.to_string());
        self.flush()
    }

    /// Write every entry to the backing file
    pub fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| ExtractError::json_error(&self.path, e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_entries(path: &Path) -> Result<Option<BTreeMap<String, String>>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let entries = serde_json::from_str(&content)
        .map_err(|e| ExtractError::json_error(path, e.to_string()))?;
    Ok(Some(entries))
}
