//! Router configuration for the two deployments.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    MatcherState, TrackerState,
    donation::{
        donation_stats_endpoint, list_donations_endpoint, submit_donation_endpoint,
        top_donors_endpoint,
    },
    endpoints,
    food_donation::submit_food_donation_endpoint,
    live::get_live_updates,
    ngo::{nearby_ngos_endpoint, register_ngo_endpoint},
};

/// Return a router with the donation tracker's routes.
pub fn build_tracker_router(state: TrackerState) -> Router {
    Router::new()
        .route(endpoints::DONATE, post(submit_donation_endpoint))
        .route(endpoints::DONATIONS, get(list_donations_endpoint))
        .route(endpoints::STATS, get(donation_stats_endpoint))
        .route(endpoints::TOP_DONORS, get(top_donors_endpoint))
        .route(endpoints::LIVE_UPDATES, get(get_live_updates))
        .with_state(state)
}

/// Return a router with the NGO matching service's routes.
pub fn build_matcher_router(state: MatcherState) -> Router {
    Router::new()
        .route(endpoints::NGOS, post(register_ngo_endpoint))
        .route(endpoints::NGOS_NEARBY, get(nearby_ngos_endpoint))
        .route(endpoints::FOOD_DONATIONS, post(submit_food_donation_endpoint))
        .with_state(state)
}
