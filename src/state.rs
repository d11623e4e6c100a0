//! Implements the structs that hold the state of the two servers.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{
    Error,
    db::{initialize_matcher, initialize_tracker},
    live::ViewerRegistry,
    ngo::NgoCache,
};

/// The state of the donation tracker server.
#[derive(Debug, Clone)]
pub struct TrackerState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The set of currently-connected live-update viewers.
    ///
    /// Created once at startup and torn down with the process; mutated only
    /// through [ViewerRegistry::register] and [ViewerRegistry::deregister].
    pub viewers: Arc<ViewerRegistry>,
}

impl TrackerState {
    /// Create a new [TrackerState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize_tracker(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            viewers: Arc::new(ViewerRegistry::new()),
        })
    }
}

/// The state of the NGO matching server.
#[derive(Debug, Clone)]
pub struct MatcherState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The process-local snapshot of the NGO registry.
    ///
    /// Rebuilt wholesale after each registration and refilled lazily from
    /// the file mirror or the database when read cold.
    pub ngo_cache: Arc<NgoCache>,
}

impl MatcherState {
    /// Create a new [MatcherState] with a SQLite database connection and a
    /// path for the NGO cache file mirror.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, cache_path: PathBuf) -> Result<Self, Error> {
        initialize_matcher(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            ngo_cache: Arc::new(NgoCache::new(cache_path)),
        })
    }
}
