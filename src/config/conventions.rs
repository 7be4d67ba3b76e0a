//! Default project conventions, matching a Rails app with Slim views and a
//! single vendor namespace in `config/locales`.

pub const CONFIG_FILE_NAME: &str = ".i18n-extract.toml";
pub const CONFIG_ENV_VAR: &str = "I18N_EXTRACT_CONFIG";

pub const DEFAULT_MARKER_DIR: &str = "views";
pub const DEFAULT_ROOT_NAMESPACE: &str = "vendor_admin";
pub const DEFAULT_DICTIONARY_PATH: &str = "config/locales/vendor_admin.en.yml";
pub const DEFAULT_CACHE_PATH: &str = ".i18n_suggestions.json";
pub const DEFAULT_MARKUP_SUFFIX: &str = "_html";
pub const DEFAULT_MAX_KEY_WORDS: usize = 3;
pub const DEFAULT_REFERENCE_TEMPLATE: &str = "t('{key}')";

/// Placeholder replaced by the fully qualified key in the reference template
pub const KEY_PLACEHOLDER: &str = "{key}";

/// File names (without extension) that add no namespace segment of their own
pub fn default_index_names() -> Vec<String> {
    vec!["home".to_string(), "index".to_string()]
}

/// Source file extensions the extraction is offered for
pub fn default_file_extensions() -> Vec<String> {
    vec!["slim".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_index_names() {
        let names = default_index_names();
        assert_eq!(names, vec!["home", "index"]);
    }

    #[test]
    fn test_reference_template_has_placeholder() {
        assert!(DEFAULT_REFERENCE_TEMPLATE.contains(KEY_PLACEHOLDER));
    }
}
