//! The donation submission endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error, TrackerState,
    donation::{DonationForm, donation_stats, insert_donation, top_donors},
    live::{NewDonationMessage, ViewerRegistry},
};

/// The state needed for accepting a donation.
#[derive(Debug, Clone)]
pub struct SubmitDonationState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The viewers to notify once the donation is recorded.
    pub viewers: Arc<ViewerRegistry>,
}

impl FromRef<TrackerState> for SubmitDonationState {
    fn from_ref(state: &TrackerState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            viewers: state.viewers.clone(),
        }
    }
}

/// The acknowledgment returned to the submitter.
#[derive(Debug, Serialize)]
struct DonationAcknowledgement {
    success: bool,
    message: &'static str,
}

/// Handle a donation submission.
///
/// Validates the form, inserts the donation, recomputes the running totals
/// and top-contributor ranking, and pushes all three to every connected
/// viewer before acknowledging the submitter.
pub async fn submit_donation_endpoint(
    State(state): State<SubmitDonationState>,
    Json(form): Json<DonationForm>,
) -> Response {
    let new_donation = match form.validate() {
        Ok(donation) => donation,
        Err(error) => return error.into_response(),
    };

    let update = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        let donation = match insert_donation(&new_donation, &connection) {
            Ok(donation) => donation,
            Err(error) => return error.into_response(),
        };

        let stats = match donation_stats(&connection) {
            Ok(stats) => stats,
            Err(error) => return error.into_response(),
        };

        let ranking = match top_donors(&connection) {
            Ok(ranking) => ranking,
            Err(error) => return error.into_response(),
        };

        NewDonationMessage::new(&donation, stats, ranking)
    };

    // Fire-and-forget: a failed broadcast must not fail the submission.
    match state.viewers.broadcast(&update) {
        Ok(delivered) => tracing::debug!("pushed donation update to {delivered} viewers"),
        Err(error) => tracing::error!("could not broadcast donation update: {error}"),
    }

    Json(DonationAcknowledgement {
        success: true,
        message: "Donation acknowledged!",
    })
    .into_response()
}
