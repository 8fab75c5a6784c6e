//! Resource text model: the paragraphs a card has to show

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Stable identifier for a resource (item, spell, equipment entry)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ResourceId(pub u64);

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered paragraphs belonging to one resource.
///
/// Immutable for the duration of a pagination run; a different value
/// fully resets the paginator that consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceText {
    paragraphs: Vec<String>,
}

impl ResourceText {
    /// Create from raw text, one paragraph per line
    pub fn from_raw(text: &str) -> Self {
        Self {
            paragraphs: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Create from already separated paragraphs
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// The text the paginator flows, paragraphs joined by line breaks
    pub fn full_text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// Length in grapheme clusters, including paragraph breaks
    pub fn len(&self) -> usize {
        let breaks = self.paragraphs.len().saturating_sub(1);
        self.paragraphs
            .iter()
            .map(|p| p.graphemes(true).count())
            .sum::<usize>()
            + breaks
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(String::is_empty)
    }
}

impl From<&str> for ResourceText {
    fn from(text: &str) -> Self {
        Self::from_raw(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_round_trips() {
        let text = ResourceText::from_raw("Flame Tongue\n\nWhile ablaze, deals 2d6 fire.");
        assert_eq!(text.paragraphs().len(), 3);
        assert_eq!(text.full_text(), "Flame Tongue\n\nWhile ablaze, deals 2d6 fire.");
    }

    #[test]
    fn test_len_counts_graphemes_and_breaks() {
        let text = ResourceText::from_paragraphs(["ab", "e\u{301}"]);
        // "ab" + "\n" + one grapheme
        assert_eq!(text.len(), 4);
    }

    #[test]
    fn test_empty() {
        assert!(ResourceText::from_raw("").is_empty());
        assert!(ResourceText::from_raw("\n").is_empty());
        assert!(!ResourceText::from_raw("x").is_empty());
    }
}
