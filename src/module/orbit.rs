///! Orbit classification
///!
///! Maps GCAT operational-orbit codes to human descriptions, and altitudes
///! to the three coarse bands used for nearest-object grouping.

use std::fmt;

/// Coarse altitude band of an orbiting object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitBand {
    Low,
    Medium,
    Geostationary,
}

impl OrbitBand {
    /// Bands in the fixed order they appear in a report.
    pub const ALL: [OrbitBand; 3] = [OrbitBand::Low, OrbitBand::Medium, OrbitBand::Geostationary];

    /// Classify an altitude in miles. Below 621 miles is low, above
    /// 22000 miles is geostationary, everything in between is medium.
    pub fn of_altitude(altitude_miles: f64) -> Self {
        if altitude_miles < 621.0 {
            OrbitBand::Low
        } else if altitude_miles > 22000.0 {
            OrbitBand::Geostationary
        } else {
            OrbitBand::Medium
        }
    }
}

impl fmt::Display for OrbitBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrbitBand::Low => write!(f, "LEO"),
            OrbitBand::Medium => write!(f, "MEO"),
            OrbitBand::Geostationary => write!(f, "GEO"),
        }
    }
}

/// Fallback description for codes outside the known vocabulary.
pub const UNKNOWN_ORBIT: &str = "unknown orbit";

/// Human-readable description of a GCAT operational-orbit code.
///
/// The vocabulary is closed; anything unrecognized degrades to
/// "unknown orbit" rather than failing.
pub fn describe(code: &str) -> &'static str {
    match code {
        "ATM" => "atmospheric orbit",
        "SO" => "suborbital",
        "TA" => "trans-atmospheric orbit",
        "LLEO/E" => "equatorial lower LEO",
        "LLEO/I" => "intermediate lower LEO",
        "LLEO/P" => "polar lower LEO",
        "LLEO/S" => "sun-synchronous lower LEO",
        "LLEO/R" => "retrograde lower LEO",
        "LEO/E" => "equatorial upper LEO",
        "LEO/I" => "intermediate upper LEO",
        "LEO/P" => "polar upper LEO",
        "LEO/S" => "sun-synchronous upper LEO",
        "LEO/R" => "retrograde upper LEO",
        "MEO" => "medium Earth orbit",
        "HEO" => "highly elliptical orbit",
        "HEO/M" => "Molniya orbit",
        "GTO" => "geotransfer orbit",
        "GEO/S" => "stationary GEO",
        "GEO/I" => "inclined GEO",
        "GEO/T" => "synchronous GEO",
        "GEO/D" => "drift GEO",
        "GEO/SI" => "inclined GEO",
        "GEO/ID" => "inclined drift GEO",
        "GEO/NS" => "near-sync GEO",
        "VHEO" => "very high Earth orbit",
        "DSO" => "deep space orbit",
        "CLO" => "cislunar/translunar orbit",
        "EEO" => "Earth escape orbit",
        "HCO" => "heliocentric orbit",
        "PCO" => "planetocentric orbit",
        "SSE" => "solar system escape orbit",
        _ => UNKNOWN_ORBIT,
    }
}
