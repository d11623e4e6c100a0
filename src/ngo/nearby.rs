//! The nearby-NGO lookup endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    Error, MatcherState,
    ngo::{NearbyNgo, NgoCache},
};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;
/// NGOs further than this from the query point are not matched.
const NEARBY_RADIUS_KM: f64 = 10.0;
/// The maximum number of matches returned.
const NEARBY_RESULT_CAP: usize = 20;

/// The state needed for the nearby lookup.
#[derive(Debug, Clone)]
pub struct NearbyNgosState {
    /// The database connection, used only to refill a cold cache.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The registry snapshot the lookup runs against.
    pub ngo_cache: Arc<NgoCache>,
}

impl FromRef<MatcherState> for NearbyNgosState {
    fn from_ref(state: &MatcherState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            ngo_cache: state.ngo_cache.clone(),
        }
    }
}

/// The query coordinate of a nearby lookup.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NearbyQuery {
    /// Latitude of the query point, in degrees.
    pub lat: Option<f64>,
    /// Longitude of the query point, in degrees.
    pub lon: Option<f64>,
}

/// Return the NGOs within 10 km of the query point, closest first, capped at
/// 20 results, each with its distance in kilometres appended.
pub async fn nearby_ngos_endpoint(
    State(state): State<NearbyNgosState>,
    Query(query): Query<NearbyQuery>,
) -> Response {
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Error::MissingCoordinates.into_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let ngos = match state.ngo_cache.read(&connection) {
        Ok(ngos) => ngos,
        Err(error) => return error.into_response(),
    };
    drop(connection);

    let mut nearby: Vec<NearbyNgo> = ngos
        .into_iter()
        .map(|ngo| {
            let distance = haversine_distance_km(lat, lon, ngo.lat, ngo.lon);
            NearbyNgo { ngo, distance }
        })
        .filter(|nearby_ngo| nearby_ngo.distance < NEARBY_RADIUS_KM)
        .collect();

    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    nearby.truncate(NEARBY_RESULT_CAP);

    Json(nearby).into_response()
}

/// Great-circle distance between two latitude/longitude points, in
/// kilometres.
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[cfg(test)]
mod haversine_tests {
    use super::haversine_distance_km;

    #[test]
    fn identical_points_have_zero_distance() {
        assert_eq!(haversine_distance_km(12.97, 77.59, 12.97, 77.59), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let distance = haversine_distance_km(0.0, 0.0, 1.0, 0.0);

        assert!((distance - 111.19).abs() < 0.5, "got {distance}");
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = haversine_distance_km(12.97, 77.59, 13.08, 80.27);
        let backward = haversine_distance_km(13.08, 80.27, 12.97, 77.59);

        assert!((forward - backward).abs() < 1e-9);
    }
}
