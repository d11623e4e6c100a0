//! Live-update fan-out for the donation tracker.
//!
//! Maintains the set of open viewer connections and pushes a snapshot to all
//! of them whenever a donation is accepted. Delivery is fire-and-forget: a
//! disconnected viewer misses updates until its next full reload.

mod domain;
mod registry;
mod socket;

pub use domain::{DonationAnnouncement, NewDonationMessage, NewDonationPayload};
pub use registry::{ViewerId, ViewerRegistry};
pub use socket::get_live_updates;
