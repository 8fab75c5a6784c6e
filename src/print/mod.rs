//! Print sheet layout and sheet-count aggregation

mod aggregate;
mod paper;
mod sheet;

pub use aggregate::{CardMargins, CardSlot, PageCountAggregator, Sheet};
pub use paper::{in_to_mm, mm_to_in, Orientation, PaperSpec, PaperType, MM_PER_INCH};
pub use sheet::{crop_marks, CardDimensions, CropMark, MarkEdge, PrintLayout};
