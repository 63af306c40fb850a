///! Report rendering
///!
///! Turns one nearest-object result into a human-readable sentence.

use super::finder::NearestResult;
use super::geodesy;

/// Round to at most `n` significant digits and render as a decimal string.
///
/// Large magnitudes come out as whole numbers, small ones keep trailing
/// zeros up to the significant-digit count: (1801.4, 3) -> "1800",
/// (1.8, 3) -> "1.80".
pub fn with_sig_digs(x: f64, n: u32) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    let order = x.abs().log10().floor() as i32;
    let decimals = n as i32 - 1 - order;
    let power = 10f64.powi(decimals);
    let rounded = (x * power).round() / power;
    format!("{:.*}", decimals.max(0) as usize, rounded)
}

/// Render one nearest-object result as a sentence.
///
/// The orbit clause is omitted entirely when the catalog has no usable
/// classification for the object.
pub fn format_report(result: &NearestResult, orbit_description: Option<&str>) -> String {
    let state = &result.state;
    let cardinal = geodesy::cardinal_direction(result.bearing_degrees);
    let orbit_clause = match orbit_description {
        Some(desc) => format!(" in {desc}"),
        None => String::new(),
    };
    format!(
        "{} ({}) is {:.0} miles {}, {:.0} miles up{}, and moving at {} mph.",
        state.name,
        state.catalog_number,
        result.range_miles,
        cardinal,
        state.altitude_miles,
        orbit_clause,
        with_sig_digs(state.radial_velocity_mph, 3),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::finder::NearestResult;
    use crate::module::orbit::OrbitBand;
    use crate::module::propagator::PropagatedState;

    #[test]
    fn test_sig_digs_large_magnitude() {
        assert_eq!(with_sig_digs(1801.4, 3), "1800");
        assert_eq!(with_sig_digs(17242.0, 3), "17200");
        assert_eq!(with_sig_digs(999.9, 3), "1000");
    }

    #[test]
    fn test_sig_digs_small_magnitude() {
        assert_eq!(with_sig_digs(1.8, 3), "1.80");
        assert_eq!(with_sig_digs(0.012345, 3), "0.0123");
        assert_eq!(with_sig_digs(3.14159, 3), "3.14");
    }

    #[test]
    fn test_sig_digs_zero_and_negative() {
        assert_eq!(with_sig_digs(0.0, 3), "0");
        assert_eq!(with_sig_digs(-1801.4, 3), "-1800");
        assert_eq!(with_sig_digs(-1.8, 3), "-1.80");
    }

    #[test]
    fn test_sig_digs_rounding_error_bound() {
        // Rounding at the third significant digit keeps the relative
        // error under half a unit in that digit.
        for &x in &[9.87654, 123.456, 0.00123456, 98765.4] {
            let s = with_sig_digs(x, 3);
            let parsed: f64 = s.parse().unwrap();
            let rel = ((parsed - x) / x).abs();
            assert!(rel < 0.005, "{x} rendered as {s}, relative error {rel}");
        }
    }

    fn sample_result() -> NearestResult {
        NearestResult {
            band: OrbitBand::Low,
            state: PropagatedState {
                name: "ISS (ZARYA)".to_string(),
                catalog_number: 25544,
                sub_lat_degrees: 40.0,
                sub_lon_degrees: -100.0,
                altitude_miles: 254.3,
                radial_velocity_mph: 1731.2,
            },
            range_miles: 1204.6,
            bearing_degrees: 80.0,
        }
    }

    #[test]
    fn test_format_with_orbit_clause() {
        let sentence = format_report(&sample_result(), Some("sun-synchronous upper LEO"));
        assert_eq!(
            sentence,
            "ISS (ZARYA) (25544) is 1205 miles east, 254 miles up in sun-synchronous upper LEO, and moving at 1730 mph."
        );
    }

    #[test]
    fn test_format_without_orbit_clause() {
        let sentence = format_report(&sample_result(), None);
        assert!(sentence.contains("254 miles up, and moving at"));
        assert!(!sentence.contains(" in "));
    }
}
