use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;

use donateur::{
    MatcherState, add_tracing_layer, build_matcher_router, graceful_shutdown, setup_logging,
};

/// The NGO food-donation matching API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the matcher SQLite database.
    #[arg(long, env = "DONATEUR_DB")]
    db_path: String,

    /// File path for the NGO registry cache mirror.
    #[arg(long, default_value = "ngos.json", env = "DONATEUR_CACHE")]
    cache_path: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 4000, env = "DONATEUR_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logging(Path::new("debug.log"));

    let args = Args::parse();

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let connection = Connection::open(&args.db_path).expect("Could not open the database file.");
    let state =
        MatcherState::new(connection, args.cache_path).expect("Could not initialize the database.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_matcher_router(state));

    tracing::info!("NGO matching API listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}
