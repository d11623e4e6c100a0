//! The running-totals endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{Error, TrackerState, donation::donation_stats};

/// The state needed for computing donation totals.
#[derive(Debug, Clone)]
pub struct DonationStatsState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<TrackerState> for DonationStatsState {
    fn from_ref(state: &TrackerState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Return the running total amount and donation count.
///
/// An empty table yields zero totals, never an error.
pub async fn donation_stats_endpoint(State(state): State<DonationStatsState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match donation_stats(&connection) {
        Ok(stats) => Json(stats).into_response(),
        Err(error) => error.into_response(),
    }
}
