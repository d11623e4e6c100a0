//! The wire format of live donation updates.

use serde::Serialize;

use crate::donation::{Donation, DonationStats, TopDonor};

/// The subset of a donation that is announced to viewers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationAnnouncement {
    /// The contributor's display name.
    pub name: String,
    /// The donated amount.
    pub amount: f64,
    /// The contributor's free-text message.
    pub message: String,
}

/// The payload pushed alongside a `NEW_DONATION` message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonationPayload {
    /// The donation that was just accepted.
    pub new_donation: DonationAnnouncement,
    /// The new running total across all donations.
    pub total: f64,
    /// The new donation row count.
    pub donor_count: i64,
    /// The refreshed top-contributor ranking.
    pub top_donors: Vec<TopDonor>,
}

/// A message broadcast to every connected viewer when a donation is accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDonationMessage {
    /// The message discriminator, always `"NEW_DONATION"`.
    #[serde(rename = "type")]
    pub message_type: &'static str,
    /// The donation and refreshed aggregates.
    pub payload: NewDonationPayload,
}

impl NewDonationMessage {
    /// Build the broadcast message for a freshly accepted `donation` and the
    /// aggregates recomputed after its insert.
    pub fn new(donation: &Donation, stats: DonationStats, top_donors: Vec<TopDonor>) -> Self {
        Self {
            message_type: "NEW_DONATION",
            payload: NewDonationPayload {
                new_donation: DonationAnnouncement {
                    name: donation.name.clone(),
                    amount: donation.amount,
                    message: donation.message.clone(),
                },
                total: stats.total,
                donor_count: stats.donor_count,
                top_donors,
            },
        }
    }
}
