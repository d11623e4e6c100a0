//! The recent-donations listing endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{Error, TrackerState, donation::recent_donations};

/// The state needed for listing recent donations.
#[derive(Debug, Clone)]
pub struct ListDonationsState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<TrackerState> for ListDonationsState {
    fn from_ref(state: &TrackerState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Return the 10 most recent donations, newest first.
///
/// Recomputed from the full table on every call.
pub async fn list_donations_endpoint(State(state): State<ListDonationsState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match recent_donations(&connection) {
        Ok(donations) => Json(donations).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod list_donations_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        donation::{NewDonation, create_donation_table, insert_donation},
        test_utils::parse_json_body,
    };

    use super::{ListDonationsState, list_donations_endpoint};

    fn get_test_state() -> ListDonationsState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_donation_table(&connection).expect("Could not create donation table");

        ListDonationsState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn empty_table_yields_empty_list() {
        let response = list_donations_endpoint(State(get_test_state())).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = parse_json_body(response).await;
        assert_eq!(body.as_array().expect("body should be an array").len(), 0);
    }

    #[tokio::test]
    async fn donations_are_listed_newest_first() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for (n, name) in ["first", "second"].iter().enumerate() {
                insert_donation(
                    &NewDonation {
                        name: (*name).to_owned(),
                        amount: 10.0,
                        message: "hi".to_owned(),
                        utr: format!("UTR-{n}"),
                    },
                    &connection,
                )
                .unwrap();
            }
        }

        let response = list_donations_endpoint(State(state)).await;
        let body = parse_json_body(response).await;

        assert_eq!(body[0]["name"], "second");
        assert_eq!(body[1]["name"], "first");
        assert!(body[0]["timestamp"].is_string());
    }
}
