//! Schema initialization for the two deployments.

use rusqlite::Connection;

use crate::{
    donation::create_donation_table, food_donation::create_food_donation_table,
    ngo::create_ngo_table,
};

/// Create the tables for the donation tracker.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize_tracker(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_donation_table(connection)
}

/// Create the tables for the NGO matching service and enable foreign key
/// enforcement.
///
/// SQLite only checks foreign keys when `PRAGMA foreign_keys` is on, and the
/// pragma is per-connection, so it must be set here rather than in the schema.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize_matcher(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", true)?;
    create_ngo_table(connection)?;
    create_food_donation_table(connection)
}
