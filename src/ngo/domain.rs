//! Core NGO domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Database identifier for an NGO.
pub type NgoId = i64;

/// A registered NGO.
///
/// Serialized both into API responses and into the cache file mirror, so it
/// carries `Deserialize` as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ngo {
    /// The row ID of the NGO.
    pub id: NgoId,
    /// The organization's name.
    pub name: String,
    /// The name of a contact person, if provided.
    pub contact_person: Option<String>,
    /// The organization's contact email.
    pub email: String,
    /// A contact phone number, if provided.
    pub phone: Option<String>,
    /// The organization's street address, if provided.
    pub address: Option<String>,
    /// A free-text description of what the organization needs, if provided.
    pub needs: Option<String>,
    /// Latitude of the organization's location, in degrees.
    pub lat: f64,
    /// Longitude of the organization's location, in degrees.
    pub lon: f64,
    /// When the NGO was registered, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The JSON body of an NGO registration.
#[derive(Debug, Clone, Deserialize)]
pub struct NgoForm {
    /// The organization's name.
    pub name: Option<String>,
    /// The name of a contact person.
    pub contact_person: Option<String>,
    /// The organization's contact email.
    pub email: Option<String>,
    /// A contact phone number.
    pub phone: Option<String>,
    /// The organization's street address.
    pub address: Option<String>,
    /// A free-text description of what the organization needs.
    pub needs: Option<String>,
    /// Latitude of the organization's location, in degrees.
    pub lat: Option<f64>,
    /// Longitude of the organization's location, in degrees.
    pub lon: Option<f64>,
}

/// A validated NGO registration ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNgo {
    /// The organization's name.
    pub name: String,
    /// The name of a contact person, if provided.
    pub contact_person: Option<String>,
    /// The organization's contact email.
    pub email: String,
    /// A contact phone number, if provided.
    pub phone: Option<String>,
    /// The organization's street address, if provided.
    pub address: Option<String>,
    /// A free-text description of what the organization needs, if provided.
    pub needs: Option<String>,
    /// Latitude of the organization's location, in degrees.
    pub lat: f64,
    /// Longitude of the organization's location, in degrees.
    pub lon: f64,
}

impl NgoForm {
    /// Validate the form into a [NewNgo].
    ///
    /// Name, email, and both coordinates are required; everything else is
    /// optional. A coordinate of zero is valid — "required" means present and
    /// numeric, not truthy.
    ///
    /// # Errors
    /// Returns [Error::MissingFields] if a required field is absent or blank.
    pub fn validate(self) -> Result<NewNgo, Error> {
        const MISSING: &str = "Name, email, and location are required fields.";

        let name = require_text(self.name).ok_or(Error::MissingFields(MISSING))?;
        let email = require_text(self.email).ok_or(Error::MissingFields(MISSING))?;
        let lat = self.lat.ok_or(Error::MissingFields(MISSING))?;
        let lon = self.lon.ok_or(Error::MissingFields(MISSING))?;

        Ok(NewNgo {
            name,
            contact_person: self.contact_person,
            email,
            phone: self.phone,
            address: self.address,
            needs: self.needs,
            lat,
            lon,
        })
    }
}

fn require_text(field: Option<String>) -> Option<String> {
    field
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// An NGO record with its distance from a query point appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyNgo {
    /// The NGO record.
    #[serde(flatten)]
    pub ngo: Ngo,
    /// Great-circle distance from the query point, in kilometres.
    pub distance: f64,
}
