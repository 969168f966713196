use crate::types::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let d_lat = (to.lat() - from.lat()).to_radians();
    let d_lng = (to.lng() - from.lng()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat().to_radians().cos() * to.lat().to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rounds a distance to two decimals for display.
pub fn round_km(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = point(45.5017, -73.5673);
        assert_eq!(haversine_km(&p, &p), 0.0);
    }

    #[test]
    fn test_montreal_fixture() {
        let pickup = point(45.5017, -73.5673);
        let drop = point(45.5088, -73.5878);
        let distance = haversine_km(&pickup, &drop);
        assert!((distance - 1.78).abs() < 0.05, "distance = {}", distance);
    }

    #[test]
    fn test_berlin_paris() {
        let berlin = point(52.5200, 13.4050);
        let paris = point(48.8566, 2.3522);
        let distance = haversine_km(&berlin, &paris);
        assert!((distance - 877.46).abs() < 0.1, "distance = {}", distance);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let north = point(90.0, 0.0);
        let south = point(-90.0, 0.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((haversine_km(&north, &south) - half).abs() < 1e-6);

        let east = point(0.0, 180.0);
        let west = point(0.0, 0.0);
        assert!((haversine_km(&east, &west) - half).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = point(18.0735, -15.9582);
        let b = point(18.0894, -15.9785);
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(1.781998), 1.78);
        assert_eq!(round_km(2.786), 2.79);
        assert_eq!(round_km(0.0), 0.0);
    }
}
