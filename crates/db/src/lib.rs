//! MongoDB store layer: client construction, index bootstrap, and the
//! live-vs-kiosk profile store strategy.

pub mod models;
pub mod repositories;
pub mod store;

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};

pub use store::{KioskProfile, ProfileStore};

/// Connect a client with a bounded server-selection timeout so unreachable
/// hosts fail fast instead of hanging requests.
pub async fn connect(
    url: &str,
    server_selection_timeout: Duration,
) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(url).await?;
    options.server_selection_timeout = Some(server_selection_timeout);
    Client::with_options(options)
}

/// The database named in the connection URL, falling back to `mongovault`.
pub fn default_database(client: &Client) -> Database {
    client
        .default_database()
        .unwrap_or_else(|| client.database("mongovault"))
}

/// Create the unique index backing the profile-name invariant.
///
/// Concurrent creates with the same name race at the store, not in
/// application logic: exactly one wins, the other gets an E11000.
pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let index = IndexModel::builder()
        .keys(doc! { "name": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    db.collection::<models::connection::ConnectionRecord>(models::connection::COLLECTION)
        .create_index(index)
        .await?;
    Ok(())
}

/// Cheap reachability probe against the backing store.
pub async fn ping(db: &Database) -> Result<(), mongodb::error::Error> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
