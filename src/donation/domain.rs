//! Core donation domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Database identifier for a donation.
pub type DonationId = i64;

/// A confirmed donation as stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    /// The row ID of the donation.
    pub id: DonationId,
    /// The contributor's display name.
    pub name: String,
    /// The donated amount.
    pub amount: f64,
    /// The contributor's free-text message.
    pub message: String,
    /// The unique transaction reference supplied by the contributor.
    pub utr: String,
    /// When the donation was recorded, in UTC.
    pub timestamp: OffsetDateTime,
}

/// The JSON body of a donation submission.
///
/// All fields are optional at the serde level so that an incomplete body
/// reaches [DonationForm::validate] and produces the endpoint's missing-field
/// error instead of a bare deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct DonationForm {
    /// The contributor's display name.
    pub name: Option<String>,
    /// The donated amount.
    pub amount: Option<f64>,
    /// The contributor's free-text message.
    pub message: Option<String>,
    /// The transaction reference for the payment.
    pub utr: Option<String>,
}

/// A validated donation ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    /// The contributor's display name.
    pub name: String,
    /// The donated amount, guaranteed positive.
    pub amount: f64,
    /// The contributor's free-text message.
    pub message: String,
    /// The transaction reference for the payment.
    pub utr: String,
}

impl DonationForm {
    /// Validate the form into a [NewDonation].
    ///
    /// # Errors
    /// Returns [Error::MissingFields] if any field is absent or blank, or
    /// [Error::NonPositiveAmount] if the amount is zero or negative.
    pub fn validate(self) -> Result<NewDonation, Error> {
        const MISSING: &str = "All fields are required";

        let name = require_text(self.name).ok_or(Error::MissingFields(MISSING))?;
        let message = require_text(self.message).ok_or(Error::MissingFields(MISSING))?;
        let utr = require_text(self.utr).ok_or(Error::MissingFields(MISSING))?;
        let amount = self.amount.ok_or(Error::MissingFields(MISSING))?;

        if amount <= 0.0 {
            return Err(Error::NonPositiveAmount);
        }

        Ok(NewDonation {
            name,
            amount,
            message,
            utr,
        })
    }
}

fn require_text(field: Option<String>) -> Option<String> {
    field
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// One row of the recent-donations listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentDonation {
    /// The contributor's display name.
    pub name: String,
    /// The donated amount.
    pub amount: f64,
    /// The contributor's free-text message.
    pub message: String,
    /// When the donation was recorded, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Running totals over the whole donation table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    /// The sum of all donated amounts. Zero for an empty table.
    pub total: f64,
    /// The number of donation rows. Counts rows, not distinct names.
    pub donor_count: i64,
}

/// One entry of the top-contributor ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDonor {
    /// The contributor's display name.
    pub name: String,
    /// The sum of every donation made under this name.
    pub total_donated: f64,
}

#[cfg(test)]
mod donation_form_tests {
    use crate::Error;

    use super::DonationForm;

    fn complete_form() -> DonationForm {
        DonationForm {
            name: Some("Ada".to_owned()),
            amount: Some(25.0),
            message: Some("Good luck!".to_owned()),
            utr: Some("UTR-1".to_owned()),
        }
    }

    #[test]
    fn validate_accepts_a_complete_form() {
        let donation = complete_form().validate().expect("form should be valid");

        assert_eq!(donation.name, "Ada");
        assert_eq!(donation.amount, 25.0);
        assert_eq!(donation.utr, "UTR-1");
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let form = DonationForm {
            utr: None,
            ..complete_form()
        };

        assert_eq!(
            form.validate(),
            Err(Error::MissingFields("All fields are required"))
        );
    }

    #[test]
    fn validate_rejects_whitespace_only_fields() {
        let form = DonationForm {
            name: Some("  \t".to_owned()),
            ..complete_form()
        };

        assert_eq!(
            form.validate(),
            Err(Error::MissingFields("All fields are required"))
        );
    }

    #[test]
    fn validate_rejects_non_positive_amounts() {
        let form = DonationForm {
            amount: Some(0.0),
            ..complete_form()
        };

        assert_eq!(form.validate(), Err(Error::NonPositiveAmount));
    }
}
