//! Donation ingestion and aggregate queries for the crowdfunding tracker.

mod db;
mod domain;
mod list;
mod stats;
mod submit;
mod top_donors;

pub use db::{
    create_donation_table, donation_stats, insert_donation, recent_donations, top_donors,
};
pub use domain::{
    Donation, DonationForm, DonationId, DonationStats, NewDonation, RecentDonation, TopDonor,
};
pub use list::list_donations_endpoint;
pub use stats::donation_stats_endpoint;
pub use submit::submit_donation_endpoint;
pub use top_donors::top_donors_endpoint;
