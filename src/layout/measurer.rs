//! Native measurement port: wraps text into a fixed card content box

use crate::layout::font::FontMetrics;
use crate::layout::line_break::LineBreaker;
use crate::pagination::MeasurementPort;
use crate::print::CardDimensions;

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Lines may overshoot the box by this much before counting as overflow
const OVERFLOW_TOLERANCE: f32 = 0.01;

/// Visible text area of a card face, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBox {
    pub width: f32,
    pub height: f32,
}

impl ContentBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Content area of a card with an equal inset (inches) on every side
    pub fn for_card(card: &CardDimensions, inset: f64) -> Self {
        let width = (card.width - 2.0 * inset).max(0.0) as f32 * POINTS_PER_INCH;
        let height = (card.height - 2.0 * inset).max(0.0) as f32 * POINTS_PER_INCH;
        Self { width, height }
    }
}

/// Measures by line-wrapping with known font metrics
#[derive(Debug, Clone)]
pub struct TextBoxMeasurer {
    content_box: ContentBox,
    metrics: FontMetrics,
    breaker: LineBreaker,
}

impl TextBoxMeasurer {
    pub fn new(content_box: ContentBox, metrics: FontMetrics) -> Self {
        Self {
            content_box,
            metrics,
            breaker: LineBreaker::new(),
        }
    }

    pub fn content_box(&self) -> &ContentBox {
        &self.content_box
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn line_count(&self, content: &str) -> usize {
        self.breaker
            .line_count(content, self.content_box.width, &self.metrics)
    }

    /// Whole lines that fit in the box
    pub fn lines_per_box(&self) -> usize {
        if self.metrics.line_height <= 0.0 {
            return usize::MAX;
        }
        ((self.content_box.height + OVERFLOW_TOLERANCE) / self.metrics.line_height).floor() as usize
    }
}

impl MeasurementPort for TextBoxMeasurer {
    fn overflows(&mut self, content: &str) -> bool {
        self.line_count(content) > self.lines_per_box()
    }
}
