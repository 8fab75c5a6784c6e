//! Paper catalogue and orientation

use crate::error::CardPagerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Convert millimetres to inches
#[inline]
pub fn mm_to_in(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Convert inches to millimetres
#[inline]
pub fn in_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Named physical sheet sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperType {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl PaperType {
    pub const ALL: [PaperType; 6] = [
        PaperType::A3,
        PaperType::A4,
        PaperType::A5,
        PaperType::Letter,
        PaperType::Legal,
        PaperType::Tabloid,
    ];

    /// (short edge, long edge) in inches
    pub fn edges(self) -> (f64, f64) {
        match self {
            PaperType::A3 => (11.69, 16.54),
            PaperType::A4 => (8.27, 11.69),
            PaperType::A5 => (5.83, 8.27),
            PaperType::Letter => (8.5, 11.0),
            PaperType::Legal => (8.5, 14.0),
            PaperType::Tabloid => (11.0, 17.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperType::A3 => "a3",
            PaperType::A4 => "a4",
            PaperType::A5 => "a5",
            PaperType::Letter => "letter",
            PaperType::Legal => "legal",
            PaperType::Tabloid => "tabloid",
        }
    }
}

impl FromStr for PaperType {
    type Err = CardPagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PaperType::ALL
            .into_iter()
            .find(|paper| paper.name() == wanted)
            .ok_or_else(|| CardPagerError::UnknownPaper(s.to_string()))
    }
}

impl std::fmt::Display for PaperType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    /// Edges swapped: the long edge runs horizontally
    Landscape,
}

impl FromStr for Orientation {
    type Err = CardPagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(CardPagerError::UnknownOrientation(s.to_string())),
        }
    }
}

/// Paper type plus orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PaperSpec {
    #[serde(rename = "type")]
    pub paper_type: PaperType,
    #[serde(default)]
    pub orientation: Orientation,
}

impl PaperSpec {
    pub fn new(paper_type: PaperType, orientation: Orientation) -> Self {
        Self {
            paper_type,
            orientation,
        }
    }

    /// Sheet (width, height) in inches after applying the orientation
    pub fn dimensions(&self) -> (f64, f64) {
        let (short, long) = self.paper_type.edges();
        match self.orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}
