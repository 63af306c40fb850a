///! Great-circle math over decimal-degree coordinates
///!
///! All distances are in statute miles, all angles in degrees.

/// Mean Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two points, haversine formula.
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Initial bearing from point 1 to point 2, forward azimuth in (-180, 180].
pub fn initial_bearing_degrees(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlon = (lon2 - lon1).to_radians();
    let y = dlon.sin() * lat2.to_radians().cos();
    let x = lat1.to_radians().cos() * lat2.to_radians().sin()
        - lat1.to_radians().sin() * lat2.to_radians().cos() * dlon.cos();
    y.atan2(x).to_degrees()
}

/// Map a bearing to one of the 8 compass points.
///
/// Total over all real bearings: the input is normalized into [0, 360)
/// first. Sectors are 45 degrees wide, centered on the compass points,
/// with exclusive upper bounds (exactly 22.5 is "northeast").
pub fn cardinal_direction(bearing_degrees: f64) -> &'static str {
    let bearing = bearing_degrees.rem_euclid(360.0);
    if bearing < 22.5 {
        "north"
    } else if bearing < 67.5 {
        "northeast"
    } else if bearing < 112.5 {
        "east"
    } else if bearing < 157.5 {
        "southeast"
    } else if bearing < 202.5 {
        "south"
    } else if bearing < 247.5 {
        "southwest"
    } else if bearing < 292.5 {
        "west"
    } else if bearing < 337.5 {
        "northwest"
    } else {
        "north"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_for_identical_points() {
        assert_eq!(haversine_miles(34.05, -118.24, 34.05, -118.24), 0.0);
        assert_eq!(haversine_miles(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(haversine_miles(-90.0, 45.0, -90.0, 45.0), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Los Angeles to New York, roughly 2445 statute miles.
        let d = haversine_miles(34.0522, -118.2437, 40.7128, -74.0060);
        assert!((d - 2445.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn test_haversine_quarter_circumference() {
        // Equator to pole along a meridian.
        let d = haversine_miles(0.0, 0.0, 90.0, 0.0);
        let quarter = 3958.8 * std::f64::consts::PI / 2.0;
        assert!((d - quarter).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_cardinal_axes() {
        // Due north and due east from the origin.
        assert!((initial_bearing_degrees(0.0, 0.0, 10.0, 0.0) - 0.0).abs() < 1e-9);
        assert!((initial_bearing_degrees(0.0, 0.0, 0.0, 10.0) - 90.0).abs() < 1e-9);
        assert!((initial_bearing_degrees(0.0, 0.0, 0.0, -10.0) + 90.0).abs() < 1e-9);
        assert!((initial_bearing_degrees(10.0, 0.0, 0.0, 0.0).abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_cardinal_direction_compass_points() {
        assert_eq!(cardinal_direction(0.0), "north");
        assert_eq!(cardinal_direction(45.0), "northeast");
        assert_eq!(cardinal_direction(90.0), "east");
        assert_eq!(cardinal_direction(135.0), "southeast");
        assert_eq!(cardinal_direction(180.0), "south");
        assert_eq!(cardinal_direction(225.0), "southwest");
        assert_eq!(cardinal_direction(270.0), "west");
        assert_eq!(cardinal_direction(315.0), "northwest");
        assert_eq!(cardinal_direction(359.9), "north");
    }

    #[test]
    fn test_cardinal_direction_sector_boundaries() {
        // Upper bounds are exclusive.
        assert_eq!(cardinal_direction(22.5), "northeast");
        assert_eq!(cardinal_direction(22.4999), "north");
        assert_eq!(cardinal_direction(337.5), "north");
        assert_eq!(cardinal_direction(337.4999), "northwest");
    }

    #[test]
    fn test_cardinal_direction_periodic() {
        assert_eq!(cardinal_direction(-90.0), "west");
        assert_eq!(cardinal_direction(-45.0), "northwest");
        assert_eq!(cardinal_direction(360.0), "north");
        assert_eq!(cardinal_direction(360.0 + 45.0), "northeast");
        assert_eq!(cardinal_direction(720.0 + 180.0), "south");
    }
}
