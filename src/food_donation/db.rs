//! Database operations for food donations.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    food_donation::{FoodDonationId, NewFoodDonation},
};

/// Insert a food donation and return its generated ID.
///
/// # Errors
/// Returns [Error::UnknownNgo] if the referenced NGO does not exist, or
/// [Error::SqlError] for any other SQL error.
pub fn insert_food_donation(
    donation: &NewFoodDonation,
    connection: &Connection,
) -> Result<FoodDonationId, Error> {
    connection.execute(
        "INSERT INTO food_donation
            (ngo_id, donor_name, donor_email, donor_phone, donor_type, food_description, quantity, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        (
            donation.ngo_id,
            &donation.donor_name,
            &donation.donor_email,
            &donation.donor_phone,
            &donation.donor_type,
            &donation.food_description,
            &donation.quantity,
            OffsetDateTime::now_utc(),
        ),
    )?;

    Ok(connection.last_insert_rowid())
}

/// Initialize the food donation table.
///
/// The foreign key is only enforced when the connection has
/// `PRAGMA foreign_keys` on; see `initialize_matcher`.
pub fn create_food_donation_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS food_donation (
            id INTEGER PRIMARY KEY,
            ngo_id INTEGER NOT NULL REFERENCES ngo(id),
            donor_name TEXT NOT NULL,
            donor_email TEXT NOT NULL,
            donor_phone TEXT,
            donor_type TEXT,
            food_description TEXT,
            quantity TEXT,
            created_at TEXT NOT NULL
        );",
    )?;

    Ok(())
}
