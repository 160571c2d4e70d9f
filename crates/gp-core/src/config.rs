//! Routing configuration.

use crate::geo::validate_precision;
use crate::CoreResult;

/// Knobs shared by graph construction and queries.
///
/// Typically filled from command-line flags by the application and handed to
/// the graph builder.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteConfig {
    /// Grid size, in degrees, that segment endpoints and query points are
    /// snapped to before comparison.  `0.0` (the default) disables snapping;
    /// `0.00001` is roughly one metre at mid latitudes.
    pub precision: f64,
}

impl RouteConfig {
    /// Validated constructor.
    pub fn new(precision: f64) -> CoreResult<Self> {
        Ok(Self { precision: validate_precision(precision)? })
    }

    /// Re-check a config that may have been built field by field or
    /// deserialized.
    pub fn validate(&self) -> CoreResult<()> {
        validate_precision(self.precision).map(|_| ())
    }

    #[inline]
    pub fn quantization_enabled(&self) -> bool {
        self.precision != 0.0
    }
}
