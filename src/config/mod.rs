pub mod conventions;

use crate::error::{ExtractError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub use conventions::{default_file_extensions, default_index_names, CONFIG_FILE_NAME};

/// Project configuration, read from `.i18n-extract.toml` in the project root.
///
/// Every field is optional in the file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Directory name that anchors namespace derivation (e.g. "views")
    pub marker_dir: String,
    /// File names (sans extension) that do not become a namespace segment
    pub index_names: Vec<String>,
    /// Fixed top-level key of the dictionary document
    pub root_namespace: String,
    /// Dictionary document, relative to the project root unless absolute
    pub dictionary_path: PathBuf,
    /// Suggestion cache file, relative to the project root unless absolute
    pub cache_path: PathBuf,
    /// Appended to the chosen key when the selection contains markup
    pub markup_suffix: String,
    /// Number of leading words used for a suggested key
    pub max_key_words: usize,
    /// Drop every character outside `[a-z0-9]` from suggested keys
    pub strict_keys: bool,
    /// Extensions the extraction is offered for; empty means any file
    pub file_extensions: Vec<String>,
    /// Replacement expression; `{key}` is substituted with the full key
    pub reference_template: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            marker_dir: conventions::DEFAULT_MARKER_DIR.to_string(),
            index_names: default_index_names(),
            root_namespace: conventions::DEFAULT_ROOT_NAMESPACE.to_string(),
            dictionary_path: PathBuf::from(conventions::DEFAULT_DICTIONARY_PATH),
            cache_path: PathBuf::from(conventions::DEFAULT_CACHE_PATH),
            markup_suffix: conventions::DEFAULT_MARKUP_SUFFIX.to_string(),
            max_key_words: conventions::DEFAULT_MAX_KEY_WORDS,
            strict_keys: false,
            file_extensions: default_file_extensions(),
            reference_template: conventions::DEFAULT_REFERENCE_TEMPLATE.to_string(),
        }
    }
}

impl ExtractConfig {
    /// Load the configuration for a project.
    ///
    /// Looks at `I18N_EXTRACT_CONFIG` first, then `<project_root>/.i18n-extract.toml`.
    /// A missing file yields the defaults.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = match std::env::var_os(conventions::CONFIG_ENV_VAR) {
            Some(p) => PathBuf::from(p),
            None => project_root.join(CONFIG_FILE_NAME),
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Load the configuration from an explicit file, which must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|reason| ExtractError::config_error(path, reason))
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Absolute location of the dictionary document
    pub fn dictionary_file(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.dictionary_path)
    }

    /// Absolute location of the suggestion cache
    pub fn cache_file(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.cache_path)
    }

    /// Whether extraction is offered for this source file
    pub fn accepts_file(&self, file: &Path) -> bool {
        if self.file_extensions.is_empty() {
            return true;
        }
        let Some(ext) = file.extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();
        self.file_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.') == ext)
    }

    /// Build the expression substituted for the selected text
    pub fn render_reference(&self, full_key: &str) -> String {
        self.reference_template
            .replace(conventions::KEY_PLACEHOLDER, full_key)
    }
}
