use super::{normalize, FieldRecord};
use crate::error::{Result, ScraperError};
use regex::Regex;

// Amount text after a label: digits, separators, euro sign, spaces, minus.
const AMOUNT_CAPTURE: &str = r"\s*([\d,.€\s-]+)";
const COUNT_CAPTURE: &str = r"\s*(\d+)";

/// A literal label paired with the rule capturing the amount that follows it.
#[derive(Debug, Clone)]
pub struct ExtractionPattern {
    field: &'static str,
    label: &'static str,
    regex: Regex,
}

impl ExtractionPattern {
    pub fn new(field: &'static str, label: &'static str) -> Result<Self> {
        Self::with_capture(field, label, AMOUNT_CAPTURE)
    }

    fn with_capture(field: &'static str, label: &'static str, capture: &str) -> Result<Self> {
        let regex = Regex::new(&format!("{}{}", regex::escape(label), capture))
            .map_err(ScraperError::Pattern)?;
        Ok(Self {
            field,
            label,
            regex,
        })
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }

    /// Cleaned value from the first block that matches.
    pub fn find<S: AsRef<str>>(&self, blocks: &[S]) -> Option<String> {
        blocks
            .iter()
            .find_map(|block| self.capture(block.as_ref()))
            .map(normalize)
    }
}

/// Headline counter such as `Gidenler: 12`, captured as a bare integer.
#[derive(Debug, Clone)]
pub struct CountPattern(ExtractionPattern);

impl CountPattern {
    pub fn new(field: &'static str, label: &'static str) -> Result<Self> {
        ExtractionPattern::with_capture(field, label, COUNT_CAPTURE).map(Self)
    }

    pub fn field(&self) -> &'static str {
        self.0.field
    }

    pub fn find<S: AsRef<str>>(&self, headlines: &[S]) -> Option<String> {
        headlines
            .iter()
            .find_map(|text| self.0.capture(text.as_ref()))
            .map(str::to_string)
    }
}

/// Runs every pattern over `blocks`, first matching block wins per field.
///
/// Patterns that never match leave their field out of the record.
pub fn extract<S: AsRef<str>>(blocks: &[S], patterns: &[ExtractionPattern]) -> FieldRecord {
    let mut record = FieldRecord::new();
    for pattern in patterns {
        if let Some(value) = pattern.find(blocks) {
            record.insert(pattern.field, value);
        }
    }
    record
}
