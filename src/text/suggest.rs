use crate::config::conventions::DEFAULT_MAX_KEY_WORDS;

/// Derives a default key from normalized text: the first few words,
/// lowercased and joined with underscores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySuggester {
    max_words: usize,
    strict: bool,
}

impl Default for KeySuggester {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySuggester {
    pub fn new() -> Self {
        Self {
            max_words: DEFAULT_MAX_KEY_WORDS,
            strict: false,
        }
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Strict keys keep only `[a-z0-9]` in each word
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn suggest(&self, text: &str) -> String {
        text.split_whitespace()
            .take(self.max_words)
            .map(|word| self.clean_word(word))
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }

    fn clean_word(&self, word: &str) -> String {
        let lowered = word.trim_matches(|c| c == '\'' || c == '"').to_lowercase();
        if self.strict {
            lowered
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                .collect()
        } else {
            lowered
        }
    }
}

/// Suggest a key with the default settings
pub fn suggest_key(text: &str) -> String {
    KeySuggester::new().suggest(text)
}
