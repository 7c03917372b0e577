//! Batch result rendering for copy/share/download
//!
//! The clipboard and download surfaces only ever see the strings built here.

use serde::{Deserialize, Serialize};

use crate::engine::Side;

/// Custom labels and separator for exported batches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLabels {
    pub heads: String,
    pub tails: String,
    /// Raw separator as typed; a literal `\n` means newline
    pub separator: String,
}

impl Default for BatchLabels {
    fn default() -> Self {
        Self {
            heads: "Heads".to_string(),
            tails: "Tails".to_string(),
            separator: ", ".to_string(),
        }
    }
}

impl BatchLabels {
    pub fn new(heads: impl Into<String>, tails: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            heads: heads.into(),
            tails: tails.into(),
            separator: separator.into(),
        }
    }

    pub fn label(&self, side: Side) -> &str {
        match side {
            Side::Heads => &self.heads,
            Side::Tails => &self.tails,
        }
    }

    /// Separator with the two-character `\n` escape expanded
    pub fn effective_separator(&self) -> String {
        self.separator.replace("\\n", "\n")
    }
}

/// Export flavours offered by the batch panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Text,
    Csv,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Text => "coin-flip-results.txt",
            ExportFormat::Csv => "coin-flip-results.csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Csv => "text/csv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ExportFormat::Text),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    pub fn render(&self, sides: &[Side], labels: &BatchLabels) -> String {
        match self {
            ExportFormat::Text => to_text(sides, labels),
            ExportFormat::Csv => to_csv(sides, labels),
        }
    }
}

/// Labels joined by the (escape-expanded) separator
pub fn to_text(sides: &[Side], labels: &BatchLabels) -> String {
    let separator = labels.effective_separator();
    sides
        .iter()
        .map(|s| labels.label(*s))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// `Flip Number,Result` header then one 1-indexed row per flip
pub fn to_csv(sides: &[Side], labels: &BatchLabels) -> String {
    let mut out = String::from("Flip Number,Result");
    for (i, side) in sides.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{},{}", i + 1, labels.label(*side)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Side::{Heads as H, Tails as T};

    #[test]
    fn test_csv_default_labels() {
        let csv = to_csv(&[H, T, H], &BatchLabels::default());
        assert_eq!(csv, "Flip Number,Result\n1,Heads\n2,Tails\n3,Heads");
    }

    #[test]
    fn test_text_custom_labels() {
        let labels = BatchLabels::new("Yes", "No", " | ");
        assert_eq!(to_text(&[H, T], &labels), "Yes | No");
    }

    #[test]
    fn test_text_default_separator() {
        assert_eq!(to_text(&[T, T, H], &BatchLabels::default()), "Tails, Tails, Heads");
    }

    #[test]
    fn test_text_newline_escape() {
        let labels = BatchLabels::new("1", "0", "\\n");
        assert_eq!(to_text(&[H, T, H], &labels), "1\n0\n1");
    }

    #[test]
    fn test_csv_ignores_separator() {
        let labels = BatchLabels::new("Up", "Down", " | ");
        assert_eq!(to_csv(&[T], &labels), "Flip Number,Result\n1,Down");
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(to_text(&[], &BatchLabels::default()), "");
        assert_eq!(to_csv(&[], &BatchLabels::default()), "Flip Number,Result");
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Csv.file_name(), "coin-flip-results.csv");
        assert_eq!(ExportFormat::Text.mime_type(), "text/plain");
        assert_eq!(ExportFormat::from_str("TXT"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::from_str("xml"), None);
        assert_eq!(
            ExportFormat::Csv.render(&[H], &BatchLabels::default()),
            "Flip Number,Result\n1,Heads"
        );
    }
}
