//! Unit tests for gp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_is_inner_value() {
        assert_eq!(NodeId(42).index(), 42);
        assert_eq!(EdgeId(u32::MAX).index(), u32::MAX as usize);
    }

    #[test]
    fn ids_order_by_value() {
        assert!(NodeId(1) < NodeId(2));
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(EdgeId(3).to_string(), "EdgeId(3)");
    }
}

#[cfg(test)]
mod geo {
    use std::f64::consts::PI;

    use crate::{EARTH_RADIUS_M, LonLat, Segment};

    #[test]
    fn zero_distance() {
        let p = LonLat::new(-84.396863, 33.792908);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = LonLat::new(0.0, 0.0);
        let b = LonLat::new(0.0, 1.0);
        let expected = EARTH_RADIUS_M * PI / 180.0; // ≈ 111 195.08 m
        let d = a.distance_m(b);
        assert!((d - expected).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = LonLat::new(-84.397252, 33.792997);
        let b = LonLat::new(-84.395111, 33.791666);
        assert_eq!(a.distance_m(b), b.distance_m(a));
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let equator = LonLat::new(0.0, 0.0).distance_m(LonLat::new(1.0, 0.0));
        let north = LonLat::new(0.0, 60.0).distance_m(LonLat::new(1.0, 60.0));
        // cos(60°) = 0.5
        assert!((north / equator - 0.5).abs() < 1e-3, "ratio {}", north / equator);
    }

    #[test]
    fn known_city_block() {
        // Two points ~200 m apart in Atlanta.
        let a = LonLat::new(-84.397252, 33.792997);
        let b = LonLat::new(-84.395111, 33.791666);
        let d = a.distance_m(b);
        assert!((240.0..250.0).contains(&d), "got {d}");
    }

    #[test]
    fn non_finite_rejected() {
        assert!(LonLat::new(f64::NAN, 0.0).validate().is_err());
        assert!(LonLat::new(0.0, f64::INFINITY).validate().is_err());
        assert!(LonLat::new(1.0, 2.0).validate().is_ok());
    }

    #[test]
    fn negative_zero_shares_key() {
        assert_eq!(LonLat::new(-0.0, 0.0).key(), LonLat::new(0.0, -0.0).key());
        assert_ne!(LonLat::new(0.0, 1.0).key(), LonLat::new(1.0, 0.0).key());
    }

    #[test]
    fn canonical_orders_endpoints() {
        let fwd = Segment::from([[0.0, 0.0], [1.0, 0.0]]);
        let rev = Segment::from([[1.0, 0.0], [0.0, 0.0]]);
        assert_eq!(fwd.canonical(), fwd);
        assert_eq!(rev.canonical(), fwd);
    }

    #[test]
    fn canonical_breaks_lon_ties_on_lat() {
        let s = Segment::from([[5.0, 2.0], [5.0, 1.0]]);
        let c = s.canonical();
        assert_eq!(c.a, LonLat::new(5.0, 1.0));
        assert_eq!(c.b, LonLat::new(5.0, 2.0));
    }

    #[test]
    fn degenerate_segment() {
        let s = Segment::from([[3.0, 4.0], [3.0, 4.0]]);
        assert!(s.is_degenerate());
        assert_eq!(s.length_m(), 0.0);
    }
}

#[cfg(test)]
mod quantize {
    use crate::{CoreError, LonLat, Segment, quantize, quantize_segments, try_quantize, validate_precision};

    #[test]
    fn zero_precision_is_identity() {
        let p = LonLat::new(-84.3968631234, 33.7929087654);
        assert_eq!(quantize(0.0, p), p);
    }

    #[test]
    fn snaps_to_grid() {
        let q = quantize(0.5, LonLat::new(1.3, -1.3));
        assert_eq!(q, LonLat::new(1.5, -1.5));
    }

    #[test]
    fn half_rounds_away_from_zero() {
        assert_eq!(quantize(0.5, LonLat::new(0.25, -0.25)), LonLat::new(0.5, -0.5));
    }

    #[test]
    fn nearby_points_collapse() {
        let a = LonLat::new(-84.3968631, 33.7929081);
        let b = LonLat::new(-84.3968629, 33.7929079);
        assert_ne!(a, b);
        assert_eq!(a.quantize(0.00001), b.quantize(0.00001));
    }

    #[test]
    fn quantize_segments_leaves_input_alone() {
        let input = vec![Segment::from([[0.12, 0.34], [0.56, 0.78]])];
        let snapped = quantize_segments(&input, 0.5);
        assert_eq!(input[0], Segment::from([[0.12, 0.34], [0.56, 0.78]]));
        assert_eq!(snapped[0], Segment::from([[0.0, 0.5], [0.5, 1.0]]));
    }

    #[test]
    fn checked_quantize_passes_normal_points() {
        let p = LonLat::new(1.3, -1.3);
        assert_eq!(try_quantize(0.5, p), Ok(LonLat::new(1.5, -1.5)));
        assert_eq!(try_quantize(0.0, p), Ok(p));
    }

    #[test]
    fn checked_quantize_blames_non_finite_input() {
        let p = LonLat::new(f64::INFINITY, 0.0);
        assert_eq!(try_quantize(0.5, p), Err(CoreError::InvalidCoordinate(p)));
    }

    #[test]
    fn overflowing_grid_blames_precision() {
        // 1.0 / 1e-310 overflows to infinity.
        let p = LonLat::new(1.0, 1.0);
        assert_eq!(try_quantize(1e-310, p), Err(CoreError::InvalidPrecision(1e-310)));
        let s = Segment::new(LonLat::new(0.0, 0.0), p);
        assert_eq!(s.try_quantize(1e-310), Err(CoreError::InvalidPrecision(1e-310)));
    }

    #[test]
    fn precision_validation() {
        assert_eq!(validate_precision(0.0), Ok(0.0));
        assert_eq!(validate_precision(0.00001), Ok(0.00001));
        assert!(validate_precision(-1.0).is_err());
        assert!(validate_precision(f64::NAN).is_err());
        assert!(validate_precision(f64::INFINITY).is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::RouteConfig;

    #[test]
    fn default_disables_quantization() {
        let c = RouteConfig::default();
        assert_eq!(c.precision, 0.0);
        assert!(!c.quantization_enabled());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn new_validates() {
        assert!(RouteConfig::new(0.00001).unwrap().quantization_enabled());
        assert!(RouteConfig::new(-0.1).is_err());
    }

    #[test]
    fn field_built_config_rechecked() {
        let c = RouteConfig { precision: f64::NAN };
        assert!(c.validate().is_err());
    }
}
