//! Print sheet layout: grid fitting, centering padding and crop marks

use crate::error::{CardPagerError, Result};
use crate::print::paper::{mm_to_in, PaperSpec};
use crate::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Slack for float division so exact fits (10 / 2.5) keep their last column
const FIT_EPSILON: f64 = 1e-9;

/// Physical card size in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for CardDimensions {
    fn default() -> Self {
        // Poker-size card
        Self {
            width: 2.5,
            height: 3.5,
        }
    }
}

impl CardDimensions {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let card = Self { width, height };
        card.validate()?;
        Ok(card)
    }

    pub fn from_mm(width_mm: f64, height_mm: f64) -> Result<Self> {
        Self::new(mm_to_in(width_mm), mm_to_in(height_mm))
    }

    /// Both edges must be finite and positive
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("card width", self.width), ("card height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CardPagerError::InvalidDimension { name, value });
            }
        }
        Ok(())
    }
}

/// Parses `WIDTHxHEIGHT` in inches, e.g. `2.5x3.5`
impl std::str::FromStr for CardDimensions {
    type Err = CardPagerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CardPagerError::InvalidCardSize(s.to_string());
        let (width, height) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width = width.trim().parse::<f64>().map_err(|_| invalid())?;
        let height = height.trim().parse::<f64>().map_err(|_| invalid())?;
        Self::new(width, height)
    }
}

/// How many whole cards of `size` fit along `extent`
fn fit_count(extent: f64, size: f64) -> usize {
    if size <= 0.0 || !size.is_finite() {
        return 0;
    }
    (extent / size + FIT_EPSILON).floor().max(0.0) as usize
}

/// Card grid on one sheet of paper
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintLayout {
    pub columns: usize,
    pub rows: usize,
    pub cards_per_sheet: usize,
    /// Left and right margin that centers the grid
    pub padding_x: f64,
    /// Top and bottom margin that centers the grid
    pub padding_y: f64,
    pub paper_width: f64,
    pub paper_height: f64,
    pub card: CardDimensions,
}

impl PrintLayout {
    /// Fit as many cards as possible onto the sheet, centered.
    ///
    /// A card that does not fit along either edge yields an empty grid
    /// (`cards_per_sheet == 0`) rather than an error.
    pub fn compute(paper: PaperSpec, card: CardDimensions) -> Self {
        let (paper_width, paper_height) = paper.dimensions();

        let mut columns = fit_count(paper_width, card.width);
        let mut rows = fit_count(paper_height, card.height);
        if columns == 0 || rows == 0 {
            columns = 0;
            rows = 0;
        }

        let padding_x = (paper_width - columns as f64 * card.width) / 2.0;
        let padding_y = (paper_height - rows as f64 * card.height) / 2.0;

        log::debug!(
            "{} {:?}: {}x{} grid of {}x{}in cards",
            paper.paper_type,
            paper.orientation,
            columns,
            rows,
            card.width,
            card.height
        );

        Self {
            columns,
            rows,
            cards_per_sheet: columns * rows,
            padding_x,
            padding_y,
            paper_width,
            paper_height,
            card,
        }
    }

    /// Nothing fits on the sheet
    pub fn is_degenerate(&self) -> bool {
        self.cards_per_sheet == 0
    }

    pub fn grid_width(&self) -> f64 {
        self.columns as f64 * self.card.width
    }

    pub fn grid_height(&self) -> f64 {
        self.rows as f64 * self.card.height
    }

    /// Top-left corner of a grid cell on the sheet
    pub fn card_origin(&self, column: usize, row: usize) -> Point {
        Point {
            x: self.padding_x + column as f64 * self.card.width,
            y: self.padding_y + row as f64 * self.card.height,
        }
    }

    pub fn card_rect(&self, column: usize, row: usize) -> Rect {
        let origin = self.card_origin(column, row);
        Rect::new(origin.x, origin.y, self.card.width, self.card.height)
    }

    /// (sheet, column, row) for a position in the flattened card stream
    pub fn slot_of(&self, position: usize) -> Option<(usize, usize, usize)> {
        if self.is_degenerate() {
            return None;
        }
        let within = position % self.cards_per_sheet;
        Some((
            position / self.cards_per_sheet,
            within % self.columns,
            within / self.columns,
        ))
    }
}

/// Which outer margin a crop mark sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// A cutting guide line in sheet coordinates (inches from the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropMark {
    pub edge: MarkEdge,
    pub start: Point,
    pub end: Point,
}

impl CropMark {
    pub fn length(&self) -> f64 {
        ((self.end.x - self.start.x).powi(2) + (self.end.y - self.start.y).powi(2)).sqrt()
    }
}

/// Tick marks at every grid line, drawn in the margins around the grid.
///
/// `rows + 1` horizontal ticks go on both the left and right margin and
/// `columns + 1` vertical ticks on the top and bottom margin. Each tick runs
/// from the grid edge outward by `tick_length`, clipped to the paper.
pub fn crop_marks(layout: &PrintLayout, tick_length: f64) -> Vec<CropMark> {
    if layout.is_degenerate() || tick_length <= 0.0 {
        return Vec::new();
    }

    let left = layout.padding_x;
    let right = layout.padding_x + layout.grid_width();
    let top = layout.padding_y;
    let bottom = layout.padding_y + layout.grid_height();

    let mut marks = Vec::with_capacity(2 * (layout.rows + 1) + 2 * (layout.columns + 1));

    for row in 0..=layout.rows {
        let y = top + row as f64 * layout.card.height;
        marks.push(CropMark {
            edge: MarkEdge::Left,
            start: Point::new((left - tick_length).max(0.0), y),
            end: Point::new(left, y),
        });
        marks.push(CropMark {
            edge: MarkEdge::Right,
            start: Point::new(right, y),
            end: Point::new((right + tick_length).min(layout.paper_width), y),
        });
    }

    for column in 0..=layout.columns {
        let x = left + column as f64 * layout.card.width;
        marks.push(CropMark {
            edge: MarkEdge::Top,
            start: Point::new(x, (top - tick_length).max(0.0)),
            end: Point::new(x, top),
        });
        marks.push(CropMark {
            edge: MarkEdge::Bottom,
            start: Point::new(x, bottom),
            end: Point::new(x, (bottom + tick_length).min(layout.paper_height)),
        });
    }

    marks
}
