///! HTTP boundary
///!
///! One report endpoint taking "?loc=lat,lon", plus a health check.
///! Everything below this file is plain functions over the injected
///! catalog manager and propagator.

use crate::errors::{Error, Result};
use crate::module::finder;
use crate::module::manager::CatalogManager;
use crate::module::orbit::{self, OrbitBand};
use crate::module::propagator::{Observer, Propagator};
use crate::module::report;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub catalogs: Arc<CatalogManager>,
    pub propagator: Arc<dyn Propagator>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(nearest_report))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[derive(Debug, Deserialize)]
struct LocQuery {
    loc: Option<String>,
}

async fn nearest_report(
    State(state): State<AppState>,
    Query(query): Query<LocQuery>,
) -> impl IntoResponse {
    match build_report(&state, query.loc.as_deref()).await {
        Ok(body) => (StatusCode::OK, body),
        Err(Error::InvalidLocation(reason)) => (StatusCode::BAD_REQUEST, reason),
        Err(e) => {
            error!("Request failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}"))
        }
    }
}

/// Run the whole pipeline for one observer and render the per-band
/// sentences, in fixed LOW, MEDIUM, GEO order.
async fn build_report(state: &AppState, loc: Option<&str>) -> Result<String> {
    let observer = parse_location(loc)?;
    let time = Utc::now();

    let records = state.catalogs.element_sets().await?;
    let satcat = state.catalogs.satcat().await?;

    let nearest = finder::find_nearest(state.propagator.as_ref(), &observer, time, &records)?;

    let sentences: Vec<String> = OrbitBand::ALL
        .iter()
        .map(|band| {
            let result = &nearest[band];
            let orbit_description = satcat
                .orbit_code(result.state.catalog_number)
                .map(orbit::describe)
                .filter(|desc| *desc != orbit::UNKNOWN_ORBIT);
            report::format_report(result, orbit_description)
        })
        .collect();

    Ok(sentences.join("\n"))
}

/// Parse a "lat,lon" pair in decimal degrees.
fn parse_location(loc: Option<&str>) -> Result<Observer> {
    let loc = loc.ok_or_else(|| Error::InvalidLocation("Location not specified".to_string()))?;

    let mut parts = loc.splitn(2, ',');
    let lat = parts.next().unwrap_or_default().trim();
    let lon = parts
        .next()
        .ok_or_else(|| Error::InvalidLocation(format!("expected lat,lon: {loc}")))?
        .trim();

    let lat: f64 = lat
        .parse()
        .map_err(|_| Error::InvalidLocation(format!("bad latitude: {lat}")))?;
    let lon: f64 = lon
        .parse()
        .map_err(|_| Error::InvalidLocation(format!("bad longitude: {lon}")))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidLocation(format!("latitude out of range: {lat}")));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(Error::InvalidLocation(format!("longitude out of range: {lon}")));
    }

    Ok(Observer::new(lat, lon))
}
