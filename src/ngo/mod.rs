//! NGO registration, registry caching, and proximity matching.

mod cache;
mod db;
mod domain;
mod nearby;
mod register;

pub use cache::NgoCache;
pub use db::{create_ngo_table, get_all_ngos, insert_ngo};
pub use domain::{NearbyNgo, NewNgo, Ngo, NgoForm, NgoId};
pub use nearby::{haversine_distance_km, nearby_ngos_endpoint};
pub use register::register_ngo_endpoint;
