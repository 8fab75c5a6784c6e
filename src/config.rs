//! Print and pagination settings

use crate::error::Result;
use crate::print::{CardDimensions, PaperSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning for the convergence loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Cycles allowed before the paginator yields once to its host.
    ///
    /// An empirical safety valve; it bounds synchronous work per rendering
    /// opportunity and says nothing about how much text fits.
    pub max_attempts: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { max_attempts: 50 }
    }
}

/// Everything needed to lay cards out for print
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintConfig {
    pub paper: PaperSpec,
    pub card: CardDimensions,
    /// Crop mark tick length in inches
    pub crop_mark_length: f64,
    pub pagination: PaginationConfig,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            paper: PaperSpec::default(),
            card: CardDimensions::default(),
            crop_mark_length: 0.125,
            pagination: PaginationConfig::default(),
        }
    }
}

impl PrintConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.card.validate()?;
        if !self.crop_mark_length.is_finite() || self.crop_mark_length < 0.0 {
            return Err(crate::error::CardPagerError::InvalidDimension {
                name: "crop mark length",
                value: self.crop_mark_length,
            });
        }
        Ok(())
    }
}
