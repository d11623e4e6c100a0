//! Database operations for donations.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    donation::{Donation, DonationStats, NewDonation, RecentDonation, TopDonor},
};

/// Insert a donation and return it with its generated ID and timestamp.
///
/// # Errors
/// Returns [Error::DuplicateUtr] if the transaction reference already exists,
/// or [Error::SqlError] for any other SQL error.
pub fn insert_donation(donation: &NewDonation, connection: &Connection) -> Result<Donation, Error> {
    let timestamp = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO donation (name, amount, message, utr, timestamp) VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            &donation.name,
            donation.amount,
            &donation.message,
            &donation.utr,
            timestamp,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Donation {
        id,
        name: donation.name.clone(),
        amount: donation.amount,
        message: donation.message.clone(),
        utr: donation.utr.clone(),
        timestamp,
    })
}

/// Retrieve the 10 most recent donations, newest first.
///
/// The row ID breaks ties between donations recorded in the same instant.
pub fn recent_donations(connection: &Connection) -> Result<Vec<RecentDonation>, Error> {
    connection
        .prepare(
            "SELECT name, amount, message, timestamp FROM donation
             ORDER BY timestamp DESC, id DESC LIMIT 10;",
        )?
        .query_map([], map_recent_row)?
        .map(|maybe_donation| maybe_donation.map_err(|error| error.into()))
        .collect()
}

/// Compute the running totals over the whole donation table.
///
/// An empty table yields zero totals, not an error.
pub fn donation_stats(connection: &Connection) -> Result<DonationStats, Error> {
    connection
        .prepare("SELECT COALESCE(SUM(amount), 0), COUNT(id) FROM donation;")?
        .query_row([], |row| {
            Ok(DonationStats {
                total: row.get(0)?,
                donor_count: row.get(1)?,
            })
        })
        .map_err(|error| error.into())
}

/// Retrieve the top 5 contributors by summed amount, grouped by name.
///
/// Ties are broken by earliest insertion so that the ranking is
/// deterministic.
pub fn top_donors(connection: &Connection) -> Result<Vec<TopDonor>, Error> {
    connection
        .prepare(
            "SELECT name, SUM(amount) AS total_donated FROM donation
             GROUP BY name ORDER BY total_donated DESC, MIN(id) ASC LIMIT 5;",
        )?
        .query_map([], |row| {
            Ok(TopDonor {
                name: row.get(0)?,
                total_donated: row.get(1)?,
            })
        })?
        .map(|maybe_donor| maybe_donor.map_err(|error| error.into()))
        .collect()
}

/// Initialize the donation table.
///
/// The unique index on `utr` is what turns a duplicate submission into a
/// constraint violation instead of a second row.
pub fn create_donation_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS donation (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            message TEXT NOT NULL,
            utr TEXT NOT NULL UNIQUE,
            timestamp TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_donation_name ON donation(name);",
    )?;

    Ok(())
}

fn map_recent_row(row: &Row) -> Result<RecentDonation, rusqlite::Error> {
    Ok(RecentDonation {
        name: row.get(0)?,
        amount: row.get(1)?,
        message: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

#[cfg(test)]
mod donation_query_tests {
    use rusqlite::Connection;

    use crate::{Error, donation::NewDonation};

    use super::{
        create_donation_table, donation_stats, insert_donation, recent_donations, top_donors,
    };

    fn get_test_connection() -> Connection {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_donation_table(&connection).expect("Could not create donation table");

        connection
    }

    fn new_donation(name: &str, amount: f64, utr: &str) -> NewDonation {
        NewDonation {
            name: name.to_owned(),
            amount,
            message: "keep going".to_owned(),
            utr: utr.to_owned(),
        }
    }

    #[test]
    fn insert_assigns_ids_and_counts_rows() {
        let connection = get_test_connection();

        let first = insert_donation(&new_donation("Ada", 30.0, "UTR-1"), &connection).unwrap();
        let second = insert_donation(&new_donation("Ada", 20.0, "UTR-2"), &connection).unwrap();

        assert_ne!(first.id, second.id);

        // The donor count counts rows, not distinct names.
        let stats = donation_stats(&connection).unwrap();
        assert_eq!(stats.donor_count, 2);
        assert_eq!(stats.total, 50.0);
    }

    #[test]
    fn duplicate_utr_is_rejected_and_keeps_one_row() {
        let connection = get_test_connection();

        insert_donation(&new_donation("Ada", 30.0, "UTR-1"), &connection).unwrap();
        let result = insert_donation(&new_donation("Bob", 10.0, "UTR-1"), &connection);

        assert_eq!(result, Err(Error::DuplicateUtr));
        assert_eq!(donation_stats(&connection).unwrap().donor_count, 1);
    }

    #[test]
    fn stats_on_empty_table_are_zero() {
        let connection = get_test_connection();

        let stats = donation_stats(&connection).unwrap();

        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.donor_count, 0);
    }

    #[test]
    fn top_donors_groups_by_name_and_sorts_by_total() {
        let connection = get_test_connection();

        insert_donation(&new_donation("A", 30.0, "UTR-1"), &connection).unwrap();
        insert_donation(&new_donation("B", 50.0, "UTR-2"), &connection).unwrap();
        insert_donation(&new_donation("B", 20.0, "UTR-3"), &connection).unwrap();

        let ranking = top_donors(&connection).unwrap();

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].name, "B");
        assert_eq!(ranking[0].total_donated, 70.0);
        assert_eq!(ranking[1].name, "A");
        assert_eq!(ranking[1].total_donated, 30.0);
    }

    #[test]
    fn top_donors_breaks_ties_by_insertion_order() {
        let connection = get_test_connection();

        insert_donation(&new_donation("Zoe", 40.0, "UTR-1"), &connection).unwrap();
        insert_donation(&new_donation("Amy", 40.0, "UTR-2"), &connection).unwrap();

        let ranking = top_donors(&connection).unwrap();

        assert_eq!(ranking[0].name, "Zoe");
        assert_eq!(ranking[1].name, "Amy");
    }

    #[test]
    fn top_donors_is_capped_at_five() {
        let connection = get_test_connection();

        for n in 0..7 {
            insert_donation(
                &new_donation(&format!("donor-{n}"), 10.0 + n as f64, &format!("UTR-{n}")),
                &connection,
            )
            .unwrap();
        }

        assert_eq!(top_donors(&connection).unwrap().len(), 5);
    }

    #[test]
    fn recent_donations_returns_newest_first_capped_at_ten() {
        let connection = get_test_connection();

        for n in 0..12 {
            insert_donation(
                &new_donation(&format!("donor-{n}"), 5.0, &format!("UTR-{n}")),
                &connection,
            )
            .unwrap();
        }

        let recent = recent_donations(&connection).unwrap();

        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].name, "donor-11");
        assert_eq!(recent[9].name, "donor-2");
    }
}
