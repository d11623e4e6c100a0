//! Database operations for NGOs.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    ngo::{NewNgo, Ngo},
};

/// Insert an NGO and return it with its generated ID and timestamp.
pub fn insert_ngo(ngo: &NewNgo, connection: &Connection) -> Result<Ngo, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO ngo (name, contact_person, email, phone, address, needs, lat, lon, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        (
            &ngo.name,
            &ngo.contact_person,
            &ngo.email,
            &ngo.phone,
            &ngo.address,
            &ngo.needs,
            ngo.lat,
            ngo.lon,
            created_at,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Ngo {
        id,
        name: ngo.name.clone(),
        contact_person: ngo.contact_person.clone(),
        email: ngo.email.clone(),
        phone: ngo.phone.clone(),
        address: ngo.address.clone(),
        needs: ngo.needs.clone(),
        lat: ngo.lat,
        lon: ngo.lon,
        created_at,
    })
}

/// Retrieve every registered NGO, newest first.
pub fn get_all_ngos(connection: &Connection) -> Result<Vec<Ngo>, Error> {
    connection
        .prepare(
            "SELECT id, name, contact_person, email, phone, address, needs, lat, lon, created_at
             FROM ngo ORDER BY created_at DESC, id DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_ngo| maybe_ngo.map_err(|error| error.into()))
        .collect()
}

/// Initialize the NGO table.
pub fn create_ngo_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS ngo (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            contact_person TEXT,
            email TEXT NOT NULL,
            phone TEXT,
            address TEXT,
            needs TEXT,
            lat REAL NOT NULL,
            lon REAL NOT NULL,
            created_at TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Ngo, rusqlite::Error> {
    Ok(Ngo {
        id: row.get(0)?,
        name: row.get(1)?,
        contact_person: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        address: row.get(5)?,
        needs: row.get(6)?,
        lat: row.get(7)?,
        lon: row.get(8)?,
        created_at: row.get(9)?,
    })
}
