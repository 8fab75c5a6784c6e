//! Native text measurement for card content boxes

pub mod font;
mod line_break;
mod measurer;

pub use font::FontMetrics;
pub use line_break::{LineBreaker, LineSpan};
pub use measurer::{ContentBox, TextBoxMeasurer, POINTS_PER_INCH};
