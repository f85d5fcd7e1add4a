//! Great-circle distance via the Haversine formula.

use nearaid_core::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometers.
///
/// Ignores ellipsoidal correction; accurate to ~0.5% which is fine for
/// ranking resources within a few kilometers. Pure and symmetric.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sf_downtown() -> Coordinate {
        Coordinate::new(37.774_9, -122.419_4)
    }

    #[test]
    fn distance_is_zero_for_identical_points() {
        let a = sf_downtown();
        assert!(distance_km(a, a).abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = sf_downtown();
        let b = Coordinate::new(40.712_8, -74.006_0);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn distance_is_non_negative() {
        let pairs = [
            (Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0)),
            (Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0)),
            (Coordinate::new(-33.86, 151.21), Coordinate::new(51.5, -0.12)),
        ];
        for (a, b) in pairs {
            assert!(distance_km(a, b) >= 0.0);
        }
    }

    #[test]
    fn known_fixture_one_point_three_six_km() {
        let a = sf_downtown();
        let b = Coordinate::new(37.784_9, -122.409_4);
        let d = distance_km(a, b);
        assert!(
            (d - 1.36).abs() < 0.05,
            "expected ~1.36 km, got {d:.3} km"
        );
    }

    #[test]
    fn antipodal_distance_is_near_half_circumference() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = distance_km(a, b);
        // Half the Earth's circumference at the equator, with Haversine's
        // spherical radius: pi * 6371.
        assert!((d - std::f64::consts::PI * 6371.0).abs() < 1.0);
    }
}
