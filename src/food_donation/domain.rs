//! Core food-donation domain types.

use serde::Deserialize;

use crate::{Error, ngo::NgoId};

/// Database identifier for a food donation.
pub type FoodDonationId = i64;

/// The JSON body of a food-donation submission.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodDonationForm {
    /// The NGO the donation is offered to.
    pub ngo_id: Option<NgoId>,
    /// The donor's name.
    pub donor_name: Option<String>,
    /// The donor's contact email.
    pub donor_email: Option<String>,
    /// The donor's phone number.
    pub donor_phone: Option<String>,
    /// The kind of donor (individual, restaurant, event, ...).
    pub donor_type: Option<String>,
    /// A free-text description of the food offered.
    pub food_description: Option<String>,
    /// How much food is offered, as free text.
    pub quantity: Option<String>,
}

/// A validated food donation ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodDonation {
    /// The NGO the donation is offered to.
    pub ngo_id: NgoId,
    /// The donor's name.
    pub donor_name: String,
    /// The donor's contact email.
    pub donor_email: String,
    /// The donor's phone number, if provided.
    pub donor_phone: Option<String>,
    /// The kind of donor, if provided.
    pub donor_type: Option<String>,
    /// A free-text description of the food offered, if provided.
    pub food_description: Option<String>,
    /// How much food is offered, if provided.
    pub quantity: Option<String>,
}

impl FoodDonationForm {
    /// Validate the form into a [NewFoodDonation].
    ///
    /// The NGO, donor name, and donor email are required; everything else is
    /// optional. Whether the NGO exists is left to the store's foreign key.
    ///
    /// # Errors
    /// Returns [Error::MissingFields] if a required field is absent or blank.
    pub fn validate(self) -> Result<NewFoodDonation, Error> {
        const MISSING: &str = "NGO selection, donor name, and email are required.";

        let ngo_id = self.ngo_id.ok_or(Error::MissingFields(MISSING))?;
        let donor_name = require_text(self.donor_name).ok_or(Error::MissingFields(MISSING))?;
        let donor_email = require_text(self.donor_email).ok_or(Error::MissingFields(MISSING))?;

        Ok(NewFoodDonation {
            ngo_id,
            donor_name,
            donor_email,
            donor_phone: self.donor_phone,
            donor_type: self.donor_type,
            food_description: self.food_description,
            quantity: self.quantity,
        })
    }
}

fn require_text(field: Option<String>) -> Option<String> {
    field
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
