///! Nearest-object search
///!
///! Propagates every catalog record to the request instant, groups the
///! states by altitude band, and keeps the one closest to the observer
///! in each band.

use super::elements::ElementSetRecord;
use super::geodesy;
use super::orbit::OrbitBand;
use super::propagator::{Observer, PropagatedState, Propagator};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::warn;

/// The closest object in one altitude band.
#[derive(Debug, Clone)]
pub struct NearestResult {
    pub band: OrbitBand,
    pub state: PropagatedState,
    pub range_miles: f64,
    pub bearing_degrees: f64,
}

/// Find the nearest object per altitude band.
///
/// Ties resolve to the record encountered first (strict less-than when
/// comparing ranges). Records the propagator rejects are logged and
/// skipped. A band with no members at all fails the whole request.
pub fn find_nearest(
    propagator: &dyn Propagator,
    observer: &Observer,
    time: DateTime<Utc>,
    records: &[ElementSetRecord],
) -> Result<HashMap<OrbitBand, NearestResult>> {
    let mut nearest: HashMap<OrbitBand, NearestResult> = HashMap::new();

    for record in records {
        let state = match propagator.propagate(record, observer, time) {
            Ok(state) => state,
            Err(e) => {
                warn!("Skipping record: {}", e);
                continue;
            }
        };

        let band = OrbitBand::of_altitude(state.altitude_miles);
        let range_miles = geodesy::haversine_miles(
            state.sub_lat_degrees,
            state.sub_lon_degrees,
            observer.lat_degrees,
            observer.lon_degrees,
        );

        let is_nearer = nearest
            .get(&band)
            .map_or(true, |best| range_miles < best.range_miles);
        if is_nearer {
            let bearing_degrees = geodesy::initial_bearing_degrees(
                observer.lat_degrees,
                observer.lon_degrees,
                state.sub_lat_degrees,
                state.sub_lon_degrees,
            );
            nearest.insert(
                band,
                NearestResult {
                    band,
                    state,
                    range_miles,
                    bearing_degrees,
                },
            );
        }
    }

    for band in OrbitBand::ALL {
        if !nearest.contains_key(&band) {
            return Err(Error::EmptyBand(band));
        }
    }

    Ok(nearest)
}
