use std::fmt;
use std::path::{Path, PathBuf};

use crate::cache::SuggestionCache;
use crate::config::ExtractConfig;
use crate::dictionary::{DictionaryMerger, DictionaryStore, MergeStatus};
use crate::error::Result;
use crate::namespace::NamespaceDeriver;
use crate::text::{normalize, KeySuggester, NormalizedText};
use crate::ExtractQuery;

/// Supplies the final key for an extraction, typically by asking the user
/// to confirm or edit the suggestion.
pub trait KeyPrompt {
    /// Return `None` to cancel the extraction
    fn confirm_key(&mut self, suggested: &str, text: &str) -> Option<String>;
}

impl<F> KeyPrompt for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn confirm_key(&mut self, suggested: &str, text: &str) -> Option<String> {
        self(suggested, text)
    }
}

/// Takes the suggested key as-is
pub struct AcceptSuggestion;

impl KeyPrompt for AcceptSuggestion {
    fn confirm_key(&mut self, suggested: &str, _text: &str) -> Option<String> {
        Some(suggested.to_string())
    }
}

/// Where a suggested key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    /// A key chosen earlier for the same text
    Cache,
    /// Derived from the words of the text
    Generated,
}

/// Everything known about an extraction before anything is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub text: NormalizedText,
    pub namespace: Vec<String>,
    pub suggested_key: String,
    pub source: SuggestionSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    EmptySelection,
    MissingFile,
    /// The prompt was dismissed or returned a blank key
    Declined,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CancelReason::EmptySelection => "nothing selected",
            CancelReason::MissingFile => "no source file",
            CancelReason::Declined => "no key supplied",
        };
        f.write_str(msg)
    }
}

/// Dotted key from the dictionary root down to the leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullyQualifiedKey {
    parts: Vec<String>,
}

impl FullyQualifiedKey {
    /// Empty parts are dropped so an empty namespace never yields `a..b`
    pub fn new(root: &str, namespace: &[String], leaf: &str) -> Self {
        let parts = std::iter::once(root)
            .chain(namespace.iter().map(String::as_str))
            .chain(std::iter::once(leaf))
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        Self { parts }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl fmt::Display for FullyQualifiedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

/// A completed extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: NormalizedText,
    pub namespace: Vec<String>,
    /// Leaf key actually used in the dictionary
    pub key: String,
    pub full_key: FullyQualifiedKey,
    /// Expression to substitute for the selection
    pub reference: String,
    pub merge: MergeStatus,
    /// Set when the suggestion cache could not be saved
    pub cache_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Cancelled(CancelReason),
    Extracted(Extraction),
}

/// Runs extractions for one project: normalize, derive the namespace,
/// suggest a key, let the caller confirm it, remember it, and merge it into
/// the dictionary.
pub struct Extractor {
    config: ExtractConfig,
    deriver: NamespaceDeriver,
    suggester: KeySuggester,
    cache: SuggestionCache,
    merger: DictionaryMerger,
}

impl Extractor {
    /// Load the project's configuration and open its cache and dictionary
    pub fn open(project_root: &Path) -> Result<Self> {
        let config = ExtractConfig::load(project_root)?;
        Ok(Self::new(project_root, config))
    }

    pub fn new(project_root: &Path, config: ExtractConfig) -> Self {
        let cache = SuggestionCache::new(config.cache_file(project_root));
        Self::with_cache(project_root, config, cache)
    }

    pub fn with_cache(project_root: &Path, config: ExtractConfig, cache: SuggestionCache) -> Self {
        let deriver = NamespaceDeriver::new(PathBuf::from(project_root), &config);
        let suggester = KeySuggester::new()
            .with_max_words(config.max_key_words)
            .with_strict(config.strict_keys);
        let merger = DictionaryMerger::new(
            DictionaryStore::new(config.dictionary_file(project_root)),
            config.root_namespace.clone(),
        );
        Self {
            config,
            deriver,
            suggester,
            cache,
            merger,
        }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    pub fn dictionary_path(&self) -> &Path {
        self.merger.store().path()
    }

    /// Compute the suggestion for a selection without writing anything
    pub fn preview(&mut self, query: &ExtractQuery) -> std::result::Result<Preview, CancelReason> {
        if query.text.is_empty() {
            return Err(CancelReason::EmptySelection);
        }
        if query.file.as_os_str().is_empty() {
            return Err(CancelReason::MissingFile);
        }

        let text = normalize(&query.text);
        let namespace = self.deriver.derive(&query.file);
        let (suggested_key, source) = match self.cache.lookup(&text.text) {
            Some(key) => (key, SuggestionSource::Cache),
            None => (self.suggester.suggest(&text.text), SuggestionSource::Generated),
        };

        Ok(Preview {
            text,
            namespace,
            suggested_key,
            source,
        })
    }

    /// Run one extraction.
    ///
    /// Nothing is written when the prompt declines. Once a key is chosen the
    /// cache is updated before the dictionary merge, and is not rolled back
    /// if the merge is skipped.
    pub fn extract(&mut self, query: &ExtractQuery, prompt: &mut dyn KeyPrompt) -> ExtractOutcome {
        let preview = match self.preview(query) {
            Ok(preview) => preview,
            Err(reason) => return ExtractOutcome::Cancelled(reason),
        };

        let chosen = prompt
            .confirm_key(&preview.suggested_key, &preview.text.text)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let Some(chosen) = chosen else {
            return ExtractOutcome::Cancelled(CancelReason::Declined);
        };

        let base_key = self.apply_markup_suffix(chosen, preview.text.has_markup);

        let cache_error = match self.cache.record(&preview.text.text, &base_key) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("failed to save suggestion cache: {}", e);
                Some(e.to_string())
            }
        };

        let merged = self
            .merger
            .merge(&preview.namespace, &base_key, &preview.text.text);

        let full_key =
            FullyQualifiedKey::new(&self.config.root_namespace, &preview.namespace, &merged.key);
        let reference = self.config.render_reference(&full_key.to_string());

        ExtractOutcome::Extracted(Extraction {
            text: preview.text,
            namespace: preview.namespace,
            key: merged.key,
            full_key,
            reference,
            merge: merged.status,
            cache_error,
        })
    }

    /// Markup text gets the configured suffix, once
    fn apply_markup_suffix(&self, key: String, has_markup: bool) -> String {
        let suffix = &self.config.markup_suffix;
        if has_markup && !suffix.is_empty() && !key.ends_with(suffix.as_str()) {
            format!("{}{}", key, suffix)
        } else {
            key
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_full_key_skips_empty_parts() {
        let key = FullyQualifiedKey::new("vendor_admin", &[], "greeting");
        assert_eq!(key.to_string(), "vendor_admin.greeting");

        let key = FullyQualifiedKey::new(
            "vendor_admin",
            &["admin".to_string(), "users".to_string()],
            "greeting",
        );
        assert_eq!(key.to_string(), "vendor_admin.admin.users.greeting");
        assert_eq!(key.parts().len(), 4);
    }

    #[test]
    fn test_markup_suffix_applied_once() {
        let dir = tempdir().unwrap();
        let extractor = Extractor::new(dir.path(), ExtractConfig::default());
        assert_eq!(extractor.apply_markup_suffix("bold".into(), true), "bold_html");
        assert_eq!(extractor.apply_markup_suffix("bold_html".into(), true), "bold_html");
        assert_eq!(extractor.apply_markup_suffix("bold".into(), false), "bold");
    }

    #[test]
    fn test_preview_rejects_empty_input() {
        let dir = tempdir().unwrap();
        let mut extractor = Extractor::new(dir.path(), ExtractConfig::default());

        let query = ExtractQuery::new("", dir.path().join("app/views/a.slim"));
        assert_eq!(extractor.preview(&query), Err(CancelReason::EmptySelection));

        let query = ExtractQuery::new("Hello", "");
        assert_eq!(extractor.preview(&query), Err(CancelReason::MissingFile));
    }

    #[test]
    fn test_closure_prompt() {
        let mut prompt = |suggested: &str, _text: &str| Some(format!("{}_x", suggested));
        assert_eq!(prompt.confirm_key("a", "A"), Some("a_x".to_string()));
    }
}
