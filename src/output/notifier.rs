use colored::Colorize;

use crate::dictionary::MergeStatus;
use crate::extractor::{ExtractOutcome, Extraction, Preview, SuggestionSource};

/// Renders extraction results for a terminal
pub struct Notifier {
    simple: bool,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self { simple: false }
    }

    /// Simple mode prints only the reference expression, for scripts
    pub fn simple() -> Self {
        Self { simple: true }
    }

    pub fn format(&self, outcome: &ExtractOutcome) -> String {
        match outcome {
            ExtractOutcome::Cancelled(_) if self.simple => String::new(),
            ExtractOutcome::Cancelled(reason) => {
                format!("{} {}\n", "Extraction cancelled:".dimmed(), reason)
            }
            ExtractOutcome::Extracted(extraction) if self.simple => {
                format!("{}\n", extraction.reference)
            }
            ExtractOutcome::Extracted(extraction) => self.format_extraction(extraction),
        }
    }

    fn format_extraction(&self, extraction: &Extraction) -> String {
        let mut output = String::new();
        let full_key = extraction.full_key.to_string();

        match &extraction.merge {
            MergeStatus::Inserted => {
                output.push_str(&format!("{} {}\n", "Added i18n key:".green().bold(), full_key));
            }
            MergeStatus::Reused => {
                output.push_str(&format!("{} {}\n", "Reused i18n key:".green().bold(), full_key));
            }
            MergeStatus::Skipped(reason) => {
                output.push_str(&format!(
                    "{} {} was not saved: {}\n",
                    "Warning:".yellow().bold(),
                    full_key,
                    reason
                ));
            }
            MergeStatus::WriteFailed(reason) => {
                output.push_str(&format!(
                    "{} failed to write {}: {}\n",
                    "Error:".red().bold(),
                    full_key,
                    reason
                ));
            }
        }

        if let Some(err) = &extraction.cache_error {
            output.push_str(&format!(
                "{} suggestion cache not saved: {}\n",
                "Warning:".yellow().bold(),
                err
            ));
        }

        output.push_str(&format!("  {} {}\n", "reference:".dimmed(), extraction.reference));
        output
    }

    pub fn format_preview(&self, preview: &Preview) -> String {
        if self.simple {
            return format!("{}\n", preview.suggested_key);
        }
        let source = match preview.source {
            SuggestionSource::Cache => "cached",
            SuggestionSource::Generated => "generated",
        };
        let namespace = if preview.namespace.is_empty() {
            "(none)".to_string()
        } else {
            preview.namespace.join(".")
        };
        let mut output = String::new();
        output.push_str(&format!("{} {:?}\n", "text:".dimmed(), preview.text.text));
        output.push_str(&format!("{} {}\n", "namespace:".dimmed(), namespace));
        output.push_str(&format!(
            "{} {} ({})\n",
            "suggested key:".dimmed(),
            preview.suggested_key.bold(),
            source
        ));
        if preview.text.has_markup {
            output.push_str(&format!("{} yes\n", "markup:".dimmed()));
        }
        output
    }
}
