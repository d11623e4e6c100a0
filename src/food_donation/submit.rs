//! The food-donation submission endpoint.

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
    food_donation::{FoodDonationForm, insert_food_donation},
};

/// The state needed for recording a food donation.
#[derive(Debug, Clone)]
pub struct SubmitFoodDonationState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<MatcherState> for SubmitFoodDonationState {
    fn from_ref(state: &MatcherState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The acknowledgment returned for a recorded donation.
#[derive(Debug, Serialize)]
struct FoodDonationRecorded {
    success: bool,
    message: &'static str,
}

/// Handle a food-donation submission.
///
/// The matched NGO should be emailed about the offer, but dispatch is not
/// implemented; the intent is only logged.
pub async fn submit_food_donation_endpoint(
    State(state): State<SubmitFoodDonationState>,
    Json(form): Json<FoodDonationForm>,
) -> Response {
    let new_donation = match form.validate() {
        Ok(donation) => donation,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    if let Err(error) = insert_food_donation(&new_donation, &connection) {
        return error.into_response();
    }

    tracing::info!(
        "donation received for NGO {} from {}; an email notification should be sent",
        new_donation.ngo_id,
        new_donation.donor_email
    );

    (
        StatusCode::CREATED,
        Json(FoodDonationRecorded {
            success: true,
            message: "Donation details recorded successfully.",
        }),
    )
        .into_response()
}

#[cfg(test)]
mod submit_food_donation_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        db::initialize_matcher,
        food_donation::FoodDonationForm,
        ngo::{NewNgo, insert_ngo},
        test_utils::parse_json_body,
    };

    use super::{SubmitFoodDonationState, submit_food_donation_endpoint};

    fn get_test_state_with_ngo() -> (SubmitFoodDonationState, i64) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_matcher(&connection).expect("Could not initialize matcher database");

        let ngo = insert_ngo(
            &NewNgo {
                name: "Food Bank".to_owned(),
                contact_person: None,
                email: "contact@foodbank.org".to_owned(),
                phone: None,
                address: None,
                needs: None,
                lat: 12.97,
                lon: 77.59,
            },
            &connection,
        )
        .unwrap();

        (
            SubmitFoodDonationState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            ngo.id,
        )
    }

    fn food_donation_form(ngo_id: i64) -> FoodDonationForm {
        FoodDonationForm {
            ngo_id: Some(ngo_id),
            donor_name: Some("Ravi".to_owned()),
            donor_email: Some("ravi@example.org".to_owned()),
            donor_phone: None,
            donor_type: Some("restaurant".to_owned()),
            food_description: Some("cooked rice".to_owned()),
            quantity: Some("10 kg".to_owned()),
        }
    }

    #[tokio::test]
    async fn valid_donation_is_recorded() {
        let (state, ngo_id) = get_test_state_with_ngo();

        let response =
            submit_food_donation_endpoint(State(state), Json(food_donation_form(ngo_id))).await;

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = parse_json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Donation details recorded successfully.");
    }

    #[tokio::test]
    async fn missing_donor_email_is_rejected() {
        let (state, ngo_id) = get_test_state_with_ngo();
        let form = FoodDonationForm {
            donor_email: None,
            ..food_donation_form(ngo_id)
        };

        let response = submit_food_donation_endpoint(State(state), Json(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = parse_json_body(response).await;
        assert_eq!(
            body["error"],
            "NGO selection, donor name, and email are required."
        );
    }

    #[tokio::test]
    async fn unknown_ngo_surfaces_as_a_generic_server_error() {
        let (state, _) = get_test_state_with_ngo();

        let response =
            submit_food_donation_endpoint(State(state), Json(food_donation_form(999))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = parse_json_body(response).await;
        assert_eq!(body["error"], "Server error");
    }
}
