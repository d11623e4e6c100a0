//! Donateur provides two small donation-tracking web services that share one
//! library: a crowdfunding donation tracker that pushes live updates to
//! connected viewers, and an NGO food-donation matching service with a
//! proximity lookup.
//!
//! Each service is a thin JSON API over a SQLite table. See the `tracker` and
//! `matcher` binaries for the entry points.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod db;
mod donation;
mod endpoints;
mod food_donation;
mod live;
mod logging;
mod ngo;
mod routing;
mod state;
#[cfg(test)]
mod test_utils;

pub use logging::{add_tracing_layer, setup_logging};
pub use routing::{build_matcher_router, build_tracker_router};
pub use state::{MatcherState, TrackerState};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more required fields were missing or empty.
    ///
    /// The string is the human-readable sentence listing the required fields
    /// for the endpoint, passed through to the client as-is.
    #[error("{0}")]
    MissingFields(&'static str),

    /// The donation amount was zero or negative.
    #[error("Amount must be a positive number.")]
    NonPositiveAmount,

    /// The nearby lookup was called without a query coordinate.
    #[error("Latitude and longitude are required.")]
    MissingCoordinates,

    /// The transaction reference already exists in the database.
    ///
    /// UTRs are a de-duplication key: the same payment confirmation must not
    /// be recorded twice, so the second submission is rejected rather than
    /// overwriting the first.
    #[error("This UTR has already been submitted.")]
    DuplicateUtr,

    /// A food donation referenced an NGO ID that is not in the registry.
    ///
    /// Surfaced to the client as a generic server error; the cause is only
    /// logged server-side.
    #[error("the NGO ID does not refer to a registered NGO")]
    UnknownNgo,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The NGO cache file mirror could not be read or written.
    #[error("could not read or write the NGO cache file: {0}")]
    CacheIo(String),

    /// An error occurred while serializing a struct as JSON.
    #[error("could not serialize as JSON: {0}")]
    JsonSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("donation.utr") =>
            {
                Error::DuplicateUtr
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 787 => {
                Error::UnknownNgo
            }
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            Error::MissingFields(message) => (StatusCode::BAD_REQUEST, (*message).to_owned()),
            Error::NonPositiveAmount | Error::MissingCoordinates => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::DuplicateUtr => (StatusCode::CONFLICT, self.to_string()),
            // Everything else is an internal failure the client cannot act
            // on. Log the cause and reply with a generic message.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_owned())
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
