//! The top-contributor ranking endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{Error, TrackerState, donation::top_donors};

/// The state needed for computing the top-contributor ranking.
#[derive(Debug, Clone)]
pub struct TopDonorsState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<TrackerState> for TopDonorsState {
    fn from_ref(state: &TrackerState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Return up to 5 contributors ranked by summed donation amount.
pub async fn top_donors_endpoint(State(state): State<TopDonorsState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match top_donors(&connection) {
        Ok(ranking) => Json(ranking).into_response(),
        Err(error) => error.into_response(),
    }
}
