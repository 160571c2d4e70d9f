//! Core error type.
//!
//! Sub-crates keep their own error enums and wrap `CoreError` as one variant
//! via `#[from]`.

use thiserror::Error;

use crate::LonLat;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("coordinate {0} is not finite")]
    InvalidCoordinate(LonLat),

    #[error("precision {0} must be finite and >= 0")]
    InvalidPrecision(f64),

    #[error("edge length {0} must be finite and >= 0")]
    InvalidLength(f64),
}

/// Shorthand result type for `gp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
