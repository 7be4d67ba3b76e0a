use once_cell::sync::Lazy;
use regex::Regex;

/// Opening tag `<word ...>` or closing tag `</word>`
static MARKUP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(\w+)([^>]*)>|</(\w+)>").unwrap());

/// Selected text after quote stripping, plus whether the raw selection
/// carried HTML-like markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    pub has_markup: bool,
}

/// Strip quote characters and surrounding whitespace from a raw selection.
///
/// Markup detection runs on the raw input, before any stripping. An empty
/// result is passed through unchanged.
pub fn normalize(raw: &str) -> NormalizedText {
    let text = raw
        .chars()
        .filter(|c| *c != '\'' && *c != '"')
        .collect::<String>()
        .trim()
        .to_string();

    NormalizedText {
        text,
        has_markup: contains_markup(raw),
    }
}

pub fn contains_markup(raw: &str) -> bool {
    MARKUP_PATTERN.is_match(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_quotes_and_whitespace() {
        let n = normalize("  \"Save changes\"  ");
        assert_eq!(n.text, "Save changes");
        assert!(!n.has_markup);
    }

    #[test]
    fn test_strips_inner_quotes() {
        assert_eq!(normalize("'Don't stop'").text, "Dont stop");
    }

    #[test]
    fn test_quoting_variants_normalize_identically() {
        assert_eq!(normalize("'hello'").text, normalize(" \"hello\" ").text);
    }

    #[test]
    fn test_markup_detection() {
        assert!(normalize("<b>hi</b>").has_markup);
        assert!(normalize("Click <a href=\"/x\">here</a>").has_markup);
        assert!(normalize("line</br>").has_markup);
        assert!(!normalize("hi there").has_markup);
        assert!(!normalize("a < b > c").has_markup);
    }

    #[test]
    fn test_markup_flag_uses_raw_text() {
        let n = normalize("<b>bold</b>");
        assert_eq!(n.text, "<b>bold</b>");
        assert!(n.has_markup);
    }

    #[test]
    fn test_only_quotes_yields_empty() {
        let n = normalize(" '\"' ");
        assert_eq!(n.text, "");
        assert!(!n.has_markup);
    }
}
