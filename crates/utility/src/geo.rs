pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Axis aligned box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}

/// Approximates the box enclosing a circle of `radius_km` around the given
/// point. Not meaningful close to the poles or across the antimeridian.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_rad = to_radians(lat);
    let lon_rad = to_radians(lon);

    let lat_delta = radius_km / EARTH_RADIUS_KM;
    // longitude degrees shrink with latitude
    let lon_delta = radius_km / (EARTH_RADIUS_KM * lat_rad.cos());

    BoundingBox {
        min_latitude: to_degrees(lat_rad - lat_delta),
        max_latitude: to_degrees(lat_rad + lat_delta),
        min_longitude: to_degrees(lon_rad - lon_delta),
        max_longitude: to_degrees(lon_rad + lon_delta),
    }
}

/// Great circle distance in kilometers.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);

    let dlat = to_radians(latitude_2 - latitude_1);
    let dlon = to_radians(longitude_2 - longitude_1);

    let h = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEATTLE: (f64, f64) = (47.6062, -122.3321);
    const PORTLAND: (f64, f64) = (45.5152, -122.6784);

    #[test]
    fn distance_to_itself_is_zero() {
        let (lat, lon) = SEATTLE;
        assert_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = haversine_distance(SEATTLE.0, SEATTLE.1, PORTLAND.0, PORTLAND.1);
        let backward =
            haversine_distance(PORTLAND.0, PORTLAND.1, SEATTLE.0, SEATTLE.1);
        assert!((forward - backward).abs() < 1e-9);
        // roughly 234 km as the crow flies
        assert!((forward - 234.0).abs() < 2.0);
    }

    #[test]
    fn meridian_offset_matches_arc_length() {
        let offset_km = 0.1;
        let north = SEATTLE.0 + to_degrees(offset_km / EARTH_RADIUS_KM);
        let distance = haversine_distance(SEATTLE.0, SEATTLE.1, north, SEATTLE.1);
        assert!((distance - offset_km).abs() < 1e-6);
    }

    #[test]
    fn bounding_box_encloses_radius() {
        let bbox = calculate_bounding_box(SEATTLE.0, SEATTLE.1, 1.0);
        assert!(bbox.contains(SEATTLE.0, SEATTLE.1));
        assert!(bbox.min_latitude < SEATTLE.0 && SEATTLE.0 < bbox.max_latitude);
        assert!(bbox.min_longitude < SEATTLE.1 && SEATTLE.1 < bbox.max_longitude);

        // edges lie one radius away from the center
        let north = haversine_distance(SEATTLE.0, SEATTLE.1, bbox.max_latitude, SEATTLE.1);
        assert!((north - 1.0).abs() < 1e-6);
        assert!(!bbox.contains(PORTLAND.0, PORTLAND.1));
    }
}
