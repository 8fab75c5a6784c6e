//! Font metrics for text-box measurement

use unicode_segmentation::UnicodeSegmentation;

/// Metrics needed to wrap and stack lines, in points
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    /// Distance between consecutive baselines
    pub line_height: f32,
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Width for everything outside the ASCII table
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // 9pt monospace, typical card body text
        Self::monospace(9.0)
    }
}

impl FontMetrics {
    pub fn new(line_height: f32, char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
        }
    }

    /// Uniform-width font at `size` points with 1.2 line spacing
    pub fn monospace(size: f32) -> Self {
        let advance = size * 3.0 / 5.0;
        Self::new(size * 6.0 / 5.0, vec![advance; 128], advance)
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }

    /// Advance of one grapheme cluster; tabs span four default widths
    pub fn grapheme_width(&self, grapheme: &str) -> f32 {
        if grapheme == "\t" {
            return self.default_width * 4.0;
        }
        if grapheme.chars().all(char::is_control) {
            return 0.0;
        }
        // Combining marks ride on their base character
        match grapheme.chars().next() {
            Some(base) => self.width(base),
            None => 0.0,
        }
    }

    /// Unwrapped width of a run of text
    pub fn text_width(&self, text: &str) -> f32 {
        text.graphemes(true).map(|g| self.grapheme_width(g)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_widths() {
        let metrics = FontMetrics::monospace(10.0);
        assert_eq!(metrics.width('a'), 6.0);
        assert_eq!(metrics.width('é'), 6.0);
        assert_eq!(metrics.line_height, 12.0);
    }

    #[test]
    fn test_grapheme_width() {
        let metrics = FontMetrics::monospace(10.0);
        assert_eq!(metrics.grapheme_width("e\u{301}"), 6.0);
        assert_eq!(metrics.grapheme_width("\t"), 24.0);
        assert_eq!(metrics.grapheme_width("\u{7}"), 0.0);
        assert_eq!(metrics.text_width("abc"), 18.0);
    }

    #[test]
    fn test_custom_ascii_table() {
        let mut widths = vec![5.0; 128];
        widths['W' as usize] = 9.0;
        let metrics = FontMetrics::new(12.0, widths, 7.0);
        assert_eq!(metrics.width('W'), 9.0);
        assert_eq!(metrics.width('i'), 5.0);
        assert_eq!(metrics.width('Ж'), 7.0);
    }
}
