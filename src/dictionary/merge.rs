use std::path::PathBuf;
use thiserror::Error;

use super::store::DictionaryStore;
use super::value::{Dictionary, Value};

/// Why a merge left the document untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("could not read {file}: {reason}")]
    Unreadable { file: PathBuf, reason: String },

    #[error("failed to parse {file}: {reason}")]
    Parse { file: PathBuf, reason: String },

    #[error("{file} has a {kind} at its root, expected a mapping")]
    NonMappingRoot { file: PathBuf, kind: &'static str },

    #[error("{file} holds {count} YAML documents, expected one")]
    MultipleDocuments { file: PathBuf, count: usize },

    #[error("'{path}' is a {kind}, cannot nest keys under it")]
    BranchConflict { path: String, kind: &'static str },
}

/// How the leaf ended up in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStatus {
    /// New key written
    Inserted,
    /// The key already held the same text; nothing new written
    Reused,
    /// Nothing written; the document on disk is unchanged
    Skipped(SkipReason),
    /// The merged document could not be saved
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Leaf key actually used, possibly with a numeric suffix
    pub key: String,
    pub status: MergeStatus,
}

impl MergeOutcome {
    /// Whether the value is in the document on disk
    pub fn is_persisted(&self) -> bool {
        matches!(self.status, MergeStatus::Inserted | MergeStatus::Reused)
    }
}

/// Inserts extracted text into the nested dictionary document without
/// disturbing anything off the written path.
pub struct DictionaryMerger {
    store: DictionaryStore,
    root_namespace: String,
}

impl DictionaryMerger {
    pub fn new(store: DictionaryStore, root_namespace: impl Into<String>) -> Self {
        Self {
            store,
            root_namespace: root_namespace.into(),
        }
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    /// Store `value` under `<root>.<namespace...>.<base_key>`.
    ///
    /// On any load problem or path conflict the file is left as it was and
    /// `base_key` comes back unchanged with a `Skipped` status.
    pub fn merge(&self, namespace: &[String], base_key: &str, value: &str) -> MergeOutcome {
        if let Err(e) = self.store.ensure_parent_dir() {
            tracing::warn!(
                "could not create directory for {}: {}",
                self.store.path().display(),
                e
            );
        }

        let mut doc = match self.store.load() {
            Ok(doc) => doc,
            Err(reason) => return self.skipped(base_key, reason),
        };

        let leaf = match descend(&mut doc, &self.root_namespace, namespace) {
            Ok(leaf) => leaf,
            Err(reason) => return self.skipped(base_key, reason),
        };

        let (key, reused) = resolve_key(leaf, base_key, value);
        if reused {
            tracing::debug!("key '{}' already holds this text", key);
            return MergeOutcome {
                key,
                status: MergeStatus::Reused,
            };
        }
        leaf.insert(&key, Value::Leaf(value.to_string()));

        let status = match self.store.save(doc) {
            Ok(()) => {
                tracing::info!("added '{}' to {}", key, self.store.path().display());
                MergeStatus::Inserted
            }
            Err(e) => {
                tracing::error!("failed to write {}: {}", self.store.path().display(), e);
                MergeStatus::WriteFailed(e.to_string())
            }
        };
        MergeOutcome { key, status }
    }

    fn skipped(&self, base_key: &str, reason: SkipReason) -> MergeOutcome {
        tracing::warn!("skipping write to avoid overwrite: {}", reason);
        MergeOutcome {
            key: base_key.to_string(),
            status: MergeStatus::Skipped(reason),
        }
    }
}

/// Walk (creating as needed) `root` then each namespace segment
fn descend<'a>(
    doc: &'a mut Dictionary,
    root: &str,
    namespace: &[String],
) -> Result<&'a mut Dictionary, SkipReason> {
    let mut path = root.to_string();
    let mut current = doc.node_mut(root).map_err(|v| conflict(&path, v))?;
    for segment in namespace {
        path.push('.');
        path.push_str(segment);
        current = current.node_mut(segment).map_err(|v| conflict(&path, v))?;
    }
    Ok(current)
}

fn conflict(path: &str, existing: &Value) -> SkipReason {
    SkipReason::BranchConflict {
        path: path.to_string(),
        kind: existing.kind(),
    }
}

/// Pick the leaf key: the base key when free or already holding `value`,
/// otherwise the first of `base_2`, `base_3`, ... that is free or holds
/// `value`. The flag is true when an existing entry is reused.
fn resolve_key(leaf: &Dictionary, base_key: &str, value: &str) -> (String, bool) {
    let mut key = base_key.to_string();
    let mut suffix = 1;
    loop {
        match leaf.get(&key) {
            None => return (key, false),
            Some(existing) if existing.as_leaf() == Some(value) => return (key, true),
            Some(_) => {
                suffix += 1;
                key = format!("{}_{}", base_key, suffix);
            }
        }
    }
}
