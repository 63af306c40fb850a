///! Orbit propagation boundary
///!
///! Everything frame- and unit-specific lives behind this seam: TLE text
///! goes in, and what comes out is already geodetic degrees, statute
///! miles, and miles per hour. Callers never see radians or kilometers.

use super::elements::ElementSetRecord;
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use std::f64::consts::PI;

/// WGS flattening factor.
const FLATTENING: f64 = 1.0 / 298.26;
/// Earth rotations per sidereal day.
const OMEGA_E: f64 = 1.00273790934;
const SECONDS_PER_DAY: f64 = 86400.0;
/// Earth rotation rate in radians per second.
const ROTATION_RATE: f64 = 2.0 * PI * OMEGA_E / SECONDS_PER_DAY;

const KM_TO_MILES: f64 = 0.621_371_192;
const KM_PER_SEC_TO_MPH: f64 = 2236.936_292;

/// Observation point on the ground, geodetic degrees and meters.
#[derive(Debug, Clone, Copy)]
pub struct Observer {
    pub lat_degrees: f64,
    pub lon_degrees: f64,
    pub elevation_meters: f64,
}

impl Observer {
    pub fn new(lat_degrees: f64, lon_degrees: f64) -> Self {
        Self {
            lat_degrees,
            lon_degrees,
            elevation_meters: 0.0,
        }
    }
}

/// Where an object is right now, in report units. Ephemeral; computed
/// fresh for every record on every request.
#[derive(Debug, Clone)]
pub struct PropagatedState {
    pub name: String,
    pub catalog_number: u64,
    pub sub_lat_degrees: f64,
    pub sub_lon_degrees: f64,
    pub altitude_miles: f64,
    /// Range rate relative to the observer. Positive means receding.
    pub radial_velocity_mph: f64,
}

/// Propagation capability consumed by the nearest-object search.
pub trait Propagator: Send + Sync {
    fn propagate(
        &self,
        record: &ElementSetRecord,
        observer: &Observer,
        time: DateTime<Utc>,
    ) -> Result<PropagatedState>;
}

/// SGP4-based propagator.
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    fn propagate(
        &self,
        record: &ElementSetRecord,
        observer: &Observer,
        time: DateTime<Utc>,
    ) -> Result<PropagatedState> {
        let fail = |reason: String| Error::Propagation {
            name: record.name.clone(),
            reason,
        };

        let elements = sgp4::Elements::from_tle(
            Some(record.name.clone()),
            record.line1.as_bytes(),
            record.line2.as_bytes(),
        )
        .map_err(|e| fail(e.to_string()))?;
        let constants = sgp4::Constants::from_elements(&elements).map_err(|e| fail(e.to_string()))?;

        let naive = time.naive_utc();
        let minutes = elements
            .datetime_to_minutes_since_epoch(&naive)
            .map_err(|e| fail(e.to_string()))?;
        let prediction = constants.propagate(minutes).map_err(|e| fail(e.to_string()))?;

        let gmst = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&naive));

        let (sub_lat_rad, sub_lon_rad, altitude_km) = teme_to_geodetic(&prediction.position, gmst);
        let observer_state = observer_teme_state(observer, gmst);
        let range_rate_km_s = range_rate(
            &prediction.position,
            &prediction.velocity,
            &observer_state.position,
            &observer_state.velocity,
        );

        Ok(PropagatedState {
            name: record.name.clone(),
            catalog_number: elements.norad_id,
            sub_lat_degrees: sub_lat_rad.to_degrees(),
            sub_lon_degrees: sub_lon_rad.to_degrees(),
            altitude_miles: altitude_km * KM_TO_MILES,
            radial_velocity_mph: range_rate_km_s * KM_PER_SEC_TO_MPH,
        })
    }
}

struct TemeState {
    position: [f64; 3],
    velocity: [f64; 3],
}

/// Convert a TEME position (km) to geodetic latitude, longitude (radians)
/// and altitude (km), iterating the latitude to convergence.
fn teme_to_geodetic(position: &[f64; 3], gmst: f64) -> (f64, f64, f64) {
    let ae = sgp4::WGS84.ae;
    let e2 = FLATTENING * (2.0 - FLATTENING);

    let theta = position[1].atan2(position[0]);
    let lon = wrap_pi(theta - gmst);
    let r = (position[0] * position[0] + position[1] * position[1]).sqrt();

    let mut lat = position[2].atan2(r);
    let mut c = 1.0;
    for _ in 0..10 {
        let phi = lat;
        c = 1.0 / (1.0 - e2 * phi.sin() * phi.sin()).sqrt();
        lat = (position[2] + ae * c * e2 * phi.sin()).atan2(r);
        if (lat - phi).abs() < 1e-10 {
            break;
        }
    }

    let altitude_km = r / lat.cos() - ae * c;
    (lat, lon, altitude_km)
}

/// TEME position and velocity (km, km/s) of a point fixed to the rotating
/// Earth, at the instant described by `gmst`.
fn observer_teme_state(observer: &Observer, gmst: f64) -> TemeState {
    let ae = sgp4::WGS84.ae;
    let lat = observer.lat_degrees.to_radians();
    let lon = observer.lon_degrees.to_radians();
    let alt_km = observer.elevation_meters / 1000.0;

    // Local sidereal time at the observer's longitude.
    let theta = gmst + lon;

    let c = 1.0 / (1.0 + FLATTENING * (FLATTENING - 2.0) * lat.sin() * lat.sin()).sqrt();
    let s = (1.0 - FLATTENING) * (1.0 - FLATTENING) * c;
    let achcp = (ae * c + alt_km) * lat.cos();

    let position = [
        achcp * theta.cos(),
        achcp * theta.sin(),
        (ae * s + alt_km) * lat.sin(),
    ];
    let velocity = [
        -ROTATION_RATE * position[1],
        ROTATION_RATE * position[0],
        0.0,
    ];

    TemeState { position, velocity }
}

/// Rate of change of the observer-to-object range: the relative velocity
/// projected on the line of sight. km/s, positive when receding.
fn range_rate(
    sat_pos: &[f64; 3],
    sat_vel: &[f64; 3],
    obs_pos: &[f64; 3],
    obs_vel: &[f64; 3],
) -> f64 {
    let rel_pos = [
        sat_pos[0] - obs_pos[0],
        sat_pos[1] - obs_pos[1],
        sat_pos[2] - obs_pos[2],
    ];
    let rel_vel = [
        sat_vel[0] - obs_vel[0],
        sat_vel[1] - obs_vel[1],
        sat_vel[2] - obs_vel[2],
    ];
    let range = (rel_pos[0] * rel_pos[0] + rel_pos[1] * rel_pos[1] + rel_pos[2] * rel_pos[2]).sqrt();
    if range == 0.0 {
        return 0.0;
    }
    (rel_pos[0] * rel_vel[0] + rel_pos[1] * rel_vel[1] + rel_pos[2] * rel_vel[2]) / range
}

/// Wrap an angle into (-pi, pi].
fn wrap_pi(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI { PI } else { wrapped }
}
