//! The NGO registration endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error, MatcherState,
    ngo::{NgoCache, NgoForm, NgoId, insert_ngo},
};

/// The state needed for registering an NGO.
#[derive(Debug, Clone)]
pub struct RegisterNgoState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The registry cache to rebuild after the insert.
    pub ngo_cache: Arc<NgoCache>,
}

impl FromRef<MatcherState> for RegisterNgoState {
    fn from_ref(state: &MatcherState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            ngo_cache: state.ngo_cache.clone(),
        }
    }
}

/// The acknowledgment returned for a successful registration.
#[derive(Debug, Serialize)]
struct NgoRegistered {
    success: bool,
    message: &'static str,
    id: NgoId,
}

/// Handle an NGO registration.
///
/// On success the registry cache is rebuilt wholesale from the table and the
/// new identifier is returned.
pub async fn register_ngo_endpoint(
    State(state): State<RegisterNgoState>,
    Json(form): Json<NgoForm>,
) -> Response {
    let new_ngo = match form.validate() {
        Ok(ngo) => ngo,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let ngo = match insert_ngo(&new_ngo, &connection) {
        Ok(ngo) => ngo,
        Err(error) => return error.into_response(),
    };

    if let Err(error) = state.ngo_cache.refresh(&connection) {
        return error.into_response();
    }

    tracing::info!("registered NGO {} ({})", ngo.id, ngo.name);

    (
        StatusCode::CREATED,
        Json(NgoRegistered {
            success: true,
            message: "NGO registered successfully!",
            id: ngo.id,
        }),
    )
        .into_response()
}
