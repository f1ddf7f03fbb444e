//! Travel-time estimation from straight-line distance.

use crate::domain::Coordinate;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Ratio of rail path length to great-circle distance.
pub const DETOUR_FACTOR: f64 = 1.3;

/// Average end-to-end rail speed including dwell time, in km/h.
pub const AVERAGE_SPEED_KMH: f64 = 40.0;

/// Great-circle distance between two points (haversine formula).
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Clamp guards against h drifting just past 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Estimated rail travel time between two points, in whole minutes.
///
/// # Examples
///
/// ```
/// use station_lottery::domain::Coordinate;
/// use station_lottery::lottery::estimate_minutes;
///
/// let shinjuku = Coordinate::new(35.6895, 139.6917);
/// assert_eq!(estimate_minutes(shinjuku, shinjuku), 0);
/// ```
pub fn estimate_minutes(a: Coordinate, b: Coordinate) -> u32 {
    let path_km = haversine_km(a, b) * DETOUR_FACTOR;
    let minutes = path_km / AVERAGE_SPEED_KMH * 60.0;
    minutes.round() as u32
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
    }

    proptest! {
        /// Estimating from a point to itself is always zero
        #[test]
        fn identity_is_zero(a in coordinate()) {
            prop_assert_eq!(estimate_minutes(a, a), 0);
        }

        /// Direction does not matter
        #[test]
        fn symmetric(a in coordinate(), b in coordinate()) {
            prop_assert_eq!(estimate_minutes(a, b), estimate_minutes(b, a));
        }

        /// Distance never exceeds half the circumference
        #[test]
        fn bounded(a in coordinate(), b in coordinate()) {
            let km = haversine_km(a, b);
            prop_assert!(km >= 0.0);
            prop_assert!(km <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
