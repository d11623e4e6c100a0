//! The API endpoint URIs for both deployments.

/// The route for submitting a crowdfunding donation.
pub const DONATE: &str = "/api/donate";
/// The route for listing the most recent donations.
pub const DONATIONS: &str = "/api/donations";
/// The route for the running donation totals.
pub const STATS: &str = "/api/stats";
/// The route for the top-5 contributor ranking.
pub const TOP_DONORS: &str = "/api/top-donors";
/// The WebSocket route for live donation updates.
pub const LIVE_UPDATES: &str = "/api/ws";

/// The route for registering an NGO.
pub const NGOS: &str = "/api/ngos";
/// The route for finding NGOs near a query coordinate.
pub const NGOS_NEARBY: &str = "/api/ngos/nearby";
/// The route for submitting a food donation to an NGO.
///
/// Shares its path with [DONATIONS] but belongs to the matcher deployment,
/// which serves a disjoint router.
pub const FOOD_DONATIONS: &str = "/api/donations";
