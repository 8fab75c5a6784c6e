//! Line breaking algorithm

use crate::layout::font::FontMetrics;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// One wrapped line of a text run
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpan {
    /// Byte range within the text this line covers
    pub byte_range: Range<usize>,
    /// Width of the line's content up to its break point
    pub width: f32,
}

fn is_break_opportunity(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// Greedy line breaker
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Wrap text into lines no wider than `max_width` where possible.
    ///
    /// Line breaks in the text always end a line. Lines wrap after the last
    /// whitespace that fits; a word wider than the line is broken where it
    /// hits the edge. Trailing whitespace may hang past the edge.
    pub fn wrap(&self, text: &str, max_width: f32, metrics: &FontMetrics) -> Vec<LineSpan> {
        let mut lines = Vec::new();
        let mut line_start: usize = 0;
        let mut x: f32 = 0.0;
        let mut last_break: Option<(usize, f32)> = None;

        for (byte_idx, grapheme) in text.grapheme_indices(true) {
            // Check for explicit line break
            if grapheme == "\n" || grapheme == "\r\n" {
                lines.push(LineSpan {
                    byte_range: line_start..byte_idx,
                    width: x,
                });
                line_start = byte_idx + grapheme.len();
                x = 0.0;
                last_break = None;
                continue;
            }

            let width = metrics.grapheme_width(grapheme);
            let breakable = is_break_opportunity(grapheme);

            // Check for soft wrap
            if x + width > max_width && byte_idx > line_start && !breakable {
                let (break_offset, break_x) = last_break.unwrap_or((byte_idx, x));
                lines.push(LineSpan {
                    byte_range: line_start..break_offset,
                    width: break_x,
                });
                line_start = break_offset;
                x -= break_x;
                last_break = None;
            }

            if breakable {
                last_break = Some((byte_idx + grapheme.len(), x + width));
            }
            x += width;
        }

        // Final line
        lines.push(LineSpan {
            byte_range: line_start..text.len(),
            width: x,
        });

        lines
    }

    /// Number of lines `text` occupies; empty text occupies none
    pub fn line_count(&self, text: &str, max_width: f32, metrics: &FontMetrics) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.wrap(text, max_width, metrics).len()
    }
}
