use geo::{GeodesicDistance, Point};

use crate::error::RankError;

/// Geodesic distance between two points in kilometers
///
/// Uses Karney's algorithm on the WGS84 ellipsoid (via `geo`), which is
/// accurate to well under a meter at the ranges the scoring tiers care about.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Errors
/// `InvalidInput` if any coordinate is NaN or infinite.
pub fn geodesic_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, RankError> {
    if ![lat1, lon1, lat2, lon2].iter().all(|c| c.is_finite()) {
        return Err(RankError::InvalidInput(format!(
            "non-finite coordinates: ({}, {}) -> ({}, {})",
            lat1, lon1, lat2, lon2
        )));
    }

    let from = Point::new(lon1, lat1);
    let to = Point::new(lon2, lat2);

    Ok(from.geodesic_distance(&to) / 1000.0)
}
