//! The process-local snapshot of the NGO registry.

use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};

use rusqlite::Connection;

use crate::{
    Error,
    ngo::{Ngo, get_all_ngos},
};

/// A two-tier cache over the NGO table: an in-memory snapshot backed by a
/// JSON file mirror on disk.
///
/// Reads serve the snapshot when it is warm; a cold read falls back to the
/// file mirror and finally to the database. [NgoCache::refresh] rebuilds the
/// cache wholesale after each registration — the new snapshot is built fully
/// and then published in one swap, so concurrent readers never observe a
/// half-built list.
///
/// The snapshot is not kept consistent with writes from other processes; the
/// staleness window equals the time since the last registration or restart.
#[derive(Debug)]
pub struct NgoCache {
    path: PathBuf,
    snapshot: Mutex<Vec<Ngo>>,
}

impl NgoCache {
    /// Create a cold cache mirrored at `path`.
    ///
    /// The file is not read until the first lookup.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            snapshot: Mutex::new(Vec::new()),
        }
    }

    /// Lock the in-memory snapshot.
    ///
    /// The lock is only ever held for a whole-value read or swap, so a
    /// poisoned guard still holds a complete list and can be reused.
    fn snapshot(&self) -> MutexGuard<'_, Vec<Ngo>> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebuild the cache from the database and overwrite the file mirror.
    ///
    /// Returns the fresh list of NGOs.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if the table cannot be read or
    /// [Error::CacheIo] if the mirror cannot be written.
    pub fn refresh(&self, connection: &Connection) -> Result<Vec<Ngo>, Error> {
        let ngos = get_all_ngos(connection)?;

        let json = serde_json::to_string_pretty(&ngos)
            .map_err(|error| Error::JsonSerializationError(error.to_string()))?;
        fs::write(&self.path, json).map_err(|error| Error::CacheIo(error.to_string()))?;

        *self.snapshot() = ngos.clone();

        Ok(ngos)
    }

    /// Read the cached NGO list, refilling the cache if it is cold.
    ///
    /// Tier order: in-memory snapshot, then the file mirror, then a full
    /// rebuild from the database.
    ///
    /// # Errors
    /// Returns [Error::CacheIo] if the mirror exists but cannot be read or
    /// parsed, or [Error::SqlError] if the database fallback fails.
    pub fn read(&self, connection: &Connection) -> Result<Vec<Ngo>, Error> {
        {
            let snapshot = self.snapshot();
            if !snapshot.is_empty() {
                return Ok(snapshot.clone());
            }
        }

        let mirrored = self.read_mirror()?;
        if !mirrored.is_empty() {
            *self.snapshot() = mirrored.clone();
            return Ok(mirrored);
        }

        tracing::info!("NGO cache is cold, rebuilding from the database");
        self.refresh(connection)
    }

    /// Read the file mirror. A missing file is an empty cache, not an error.
    fn read_mirror(&self) -> Result<Vec<Ngo>, Error> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(Error::CacheIo(error.to_string())),
        };

        serde_json::from_str(&json).map_err(|error| Error::CacheIo(error.to_string()))
    }
}

#[cfg(test)]
mod ngo_cache_tests {
    use rusqlite::Connection;

    use crate::ngo::{NewNgo, create_ngo_table, insert_ngo};

    use super::NgoCache;

    fn get_test_connection() -> Connection {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_ngo_table(&connection).expect("Could not create ngo table");

        connection
    }

    fn new_ngo(name: &str) -> NewNgo {
        NewNgo {
            name: name.to_owned(),
            contact_person: None,
            email: format!("{name}@example.org"),
            phone: None,
            address: None,
            needs: None,
            lat: 12.97,
            lon: 77.59,
        }
    }

    #[test]
    fn cold_read_rebuilds_from_the_database() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = NgoCache::new(temp_dir.path().join("ngos.json"));
        let connection = get_test_connection();

        insert_ngo(&new_ngo("Food Bank"), &connection).unwrap();

        let ngos = cache.read(&connection).expect("cold read should refill");

        assert_eq!(ngos.len(), 1);
        assert_eq!(ngos[0].name, "Food Bank");
    }

    #[test]
    fn refresh_writes_the_file_mirror() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ngos.json");
        let cache = NgoCache::new(path.clone());
        let connection = get_test_connection();

        insert_ngo(&new_ngo("Food Bank"), &connection).unwrap();
        cache.refresh(&connection).unwrap();

        let mirrored = std::fs::read_to_string(path).expect("mirror file should exist");
        assert!(mirrored.contains("Food Bank"));
    }

    #[test]
    fn cold_cache_serves_from_an_existing_mirror_before_the_database() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ngos.json");
        let connection = get_test_connection();

        insert_ngo(&new_ngo("Food Bank"), &connection).unwrap();
        NgoCache::new(path.clone()).refresh(&connection).unwrap();

        // A fresh cache over the same mirror, with an empty database: entries
        // can only have come from the file tier.
        let empty_connection = get_test_connection();
        let cache = NgoCache::new(path);

        let ngos = cache.read(&empty_connection).unwrap();

        assert_eq!(ngos.len(), 1);
        assert_eq!(ngos[0].name, "Food Bank");
    }

    #[test]
    fn missing_mirror_file_is_an_empty_cache_not_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = NgoCache::new(temp_dir.path().join("does-not-exist.json"));
        let connection = get_test_connection();

        let ngos = cache.read(&connection).expect("missing mirror should not fail");

        assert!(ngos.is_empty());
    }

    #[test]
    fn refresh_replaces_the_snapshot_wholesale() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = NgoCache::new(temp_dir.path().join("ngos.json"));
        let connection = get_test_connection();

        insert_ngo(&new_ngo("Food Bank"), &connection).unwrap();
        cache.refresh(&connection).unwrap();

        insert_ngo(&new_ngo("Shelter"), &connection).unwrap();
        let ngos = cache.refresh(&connection).unwrap();

        assert_eq!(ngos.len(), 2);
        assert_eq!(cache.read(&connection).unwrap().len(), 2);
    }
}
