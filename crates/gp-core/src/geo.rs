//! Geographic coordinate types, the haversine metric, and grid quantization.
//!
//! Coordinates follow EPSG:4326 axis order as it appears in GeoJSON:
//! `x` is longitude and `y` is latitude, both in degrees.  Unlike a
//! simulation-grade point type these are kept in `f64`, since distances are
//! compared at sub-metre resolution.

use std::cmp::Ordering;
use std::f64::consts::PI;
use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

// ── LonLat ────────────────────────────────────────────────────────────────────

/// A WGS-84 coordinate in `(longitude, latitude)` order.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `true` when both components are finite (no NaN, no infinities).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Reject non-finite coordinates.
    pub fn validate(self) -> CoreResult<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(CoreError::InvalidCoordinate(self))
        }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// The operation order is fixed (degrees → radians as `x * PI / 180`,
    /// longitude term multiplied after the squared sine) so results are
    /// reproducible to the last bit across builds.
    pub fn distance_m(self, other: LonLat) -> f64 {
        #[inline(always)]
        fn radian(x: f64) -> f64 {
            x * PI / 180.0
        }

        let d_lon = radian(other.lon - self.lon);
        let d_lat = radian(other.lat - self.lat);
        let lat1 = radian(self.lat);
        let lat2 = radian(other.lat);

        let a = (d_lat / 2.0).sin().powi(2);
        let b = (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let h = a + b;

        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        c * EARTH_RADIUS_M
    }

    /// Snap onto a grid of cell size `precision`.  `0.0` returns `self`.
    #[inline]
    pub fn quantize(self, precision: f64) -> LonLat {
        quantize(precision, self)
    }

    /// Total lexicographic order on `(lon, lat)` via `f64::total_cmp`.
    #[inline]
    pub fn total_cmp(&self, other: &LonLat) -> Ordering {
        self.lon
            .total_cmp(&other.lon)
            .then_with(|| self.lat.total_cmp(&other.lat))
    }

    /// Hashable identity.  `-0.0` is folded into `0.0` so the key agrees with
    /// `==` for every finite coordinate.
    #[inline]
    pub fn key(self) -> CoordKey {
        CoordKey((self.lon + 0.0).to_bits(), (self.lat + 0.0).to_bits())
    }
}

impl From<[f64; 2]> for LonLat {
    #[inline]
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<LonLat> for [f64; 2] {
    #[inline]
    fn from(p: LonLat) -> Self {
        [p.lon, p.lat]
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// Bit-level hash key of a [`LonLat`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CoordKey(u64, u64);

// ── Segment ───────────────────────────────────────────────────────────────────

/// One traversable line between two endpoints.  Direction carries no meaning
/// for routing.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub a: LonLat,
    pub b: LonLat,
}

impl Segment {
    #[inline]
    pub fn new(a: LonLat, b: LonLat) -> Self {
        Self { a, b }
    }

    /// Great-circle length of the segment in metres.
    #[inline]
    pub fn length_m(&self) -> f64 {
        self.a.distance_m(self.b)
    }

    /// Same segment with the smaller endpoint (by [`LonLat::total_cmp`]) first.
    pub fn canonical(self) -> Segment {
        if self.b.total_cmp(&self.a) == Ordering::Less {
            Segment { a: self.b, b: self.a }
        } else {
            self
        }
    }

    /// Lexicographic order on `(a.lon, a.lat, b.lon, b.lat)`.
    pub fn total_cmp(&self, other: &Segment) -> Ordering {
        self.a
            .total_cmp(&other.a)
            .then_with(|| self.b.total_cmp(&other.b))
    }

    /// `true` if both endpoints are the same coordinate (a self-loop).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    #[inline]
    pub fn quantize(self, precision: f64) -> Segment {
        Segment {
            a: quantize(precision, self.a),
            b: quantize(precision, self.b),
        }
    }

    /// Both endpoints through [`try_quantize`].
    pub fn try_quantize(self, precision: f64) -> CoreResult<Segment> {
        Ok(Segment {
            a: try_quantize(precision, self.a)?,
            b: try_quantize(precision, self.b)?,
        })
    }
}

impl From<[[f64; 2]; 2]> for Segment {
    #[inline]
    fn from([a, b]: [[f64; 2]; 2]) -> Self {
        Self { a: a.into(), b: b.into() }
    }
}

// ── Quantization ──────────────────────────────────────────────────────────────

/// Snap `p` to the nearest multiple of `precision` on each axis.
///
/// `precision == 0.0` disables snapping: the input comes back untouched and
/// endpoints must then match bit for bit to join.
#[inline]
pub fn quantize(precision: f64, p: LonLat) -> LonLat {
    if precision == 0.0 {
        return p;
    }
    LonLat {
        lon: (p.lon / precision).round() * precision,
        lat: (p.lat / precision).round() * precision,
    }
}

/// Checked [`quantize`].
///
/// A non-finite `p` is [`CoreError::InvalidCoordinate`].  A finite `p` that
/// snaps to a non-finite point means the grid is too fine to represent (e.g.
/// a subnormal precision overflowing `p / precision`), which is reported as
/// [`CoreError::InvalidPrecision`].
pub fn try_quantize(precision: f64, p: LonLat) -> CoreResult<LonLat> {
    let snapped = quantize(precision, p.validate()?);
    if snapped.is_finite() {
        Ok(snapped)
    } else {
        Err(CoreError::InvalidPrecision(precision))
    }
}

/// Quantize every segment endpoint, returning a new collection.  The input is
/// left as it was.
pub fn quantize_segments(segments: &[Segment], precision: f64) -> Vec<Segment> {
    segments.iter().map(|s| s.quantize(precision)).collect()
}

/// Check that `precision` is a usable grid size (finite and `>= 0`).
pub fn validate_precision(precision: f64) -> CoreResult<f64> {
    if precision.is_finite() && precision >= 0.0 {
        Ok(precision)
    } else {
        Err(CoreError::InvalidPrecision(precision))
    }
}
