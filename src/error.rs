//! Error types for configuration boundaries
//!
//! Pagination and sheet layout never fail; degenerate inputs degrade to
//! zero-sized grids or overflowing pages instead. Errors only surface where
//! outside input is parsed or validated.

use thiserror::Error;

/// Unified error type for the crate's fallible entry points
#[derive(Debug, Error)]
pub enum CardPagerError {
    /// A card or paper edge was zero, negative, or not a finite number.
    #[error("invalid {name}: {value} (must be a finite, positive length)")]
    InvalidDimension { name: &'static str, value: f64 },

    /// Paper name not present in the catalogue.
    #[error("unknown paper type '{0}' (expected one of: a3, a4, a5, letter, legal, tabloid)")]
    UnknownPaper(String),

    /// Orientation other than portrait or landscape.
    #[error("unknown orientation '{0}' (expected 'portrait' or 'landscape')")]
    UnknownOrientation(String),

    /// Card size given in an unreadable `WxH` form.
    #[error("invalid card size '{0}' (expected WIDTHxHEIGHT, e.g. 2.5x3.5)")]
    InvalidCardSize(String),

    /// Configuration or resource JSON failed to parse.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CardPagerError>;
