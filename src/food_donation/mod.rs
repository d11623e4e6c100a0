//! Food-donation submission for the NGO matching service.

mod db;
mod domain;
mod submit;

pub use db::{create_food_donation_table, insert_food_donation};
pub use domain::{FoodDonationForm, FoodDonationId, NewFoodDonation};
pub use submit::submit_food_donation_endpoint;
