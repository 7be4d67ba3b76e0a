pub mod cache;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod extractor;
pub mod namespace;
pub mod output;
pub mod source;
pub mod text;

use std::path::{Path, PathBuf};

// Re-export commonly used types
pub use cache::{CacheLoad, SuggestionCache};
pub use config::ExtractConfig;
pub use dictionary::{
    Dictionary, DictionaryMerger, DictionaryStore, MergeOutcome, MergeStatus, SkipReason, Value,
};
pub use error::{ExtractError, Result};
pub use extractor::{
    AcceptSuggestion, CancelReason, ExtractOutcome, Extraction, Extractor, FullyQualifiedKey,
    KeyPrompt, Preview, SuggestionSource,
};
pub use namespace::NamespaceDeriver;
pub use output::Notifier;
pub use text::{normalize, suggest_key, KeySuggester, NormalizedText};

/// A selection to extract: the raw selected text and the file it came from
#[derive(Debug, Clone)]
pub struct ExtractQuery {
    pub text: String,
    pub file: PathBuf,
}

impl ExtractQuery {
    pub fn new(text: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            file: file.into(),
        }
    }
}

/// Main entry point: extract one selection in the project at `project_root`.
///
/// Loads the project configuration, asks `prompt` for the final key and
/// returns what happened. Only configuration errors are returned as `Err`;
/// cache and dictionary problems are reported inside the outcome.
#[must_use = "this function returns a Result that should be handled"]
pub fn run_extract(
    project_root: &Path,
    query: &ExtractQuery,
    prompt: &mut dyn KeyPrompt,
) -> Result<ExtractOutcome> {
    let mut extractor = Extractor::open(project_root)?;
    Ok(extractor.extract(query, prompt))
}
