//! Profile store strategy, resolved once at startup.
//!
//! `Live` is backed by the MongoDB repository. `Kiosk` serves an immutable
//! list from static configuration: reads blank out the connection URL so it
//! never leaves the server, dump/check resolve the real URL through
//! [`ProfileStore::find_by_id_unredacted`], and every mutation fails with
//! `Forbidden`.

use mongodb::Database;
use mongovault_core::error::CoreError;
use mongovault_core::profile::DbConnection;
use serde::Deserialize;

use crate::repositories::ConnectionRepo;

/// A kiosk profile as it appears in configuration: name plus real URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskProfile {
    pub name: String,
    pub connection_url: String,
}

pub enum ProfileStore {
    Live { db: Database },
    Kiosk { profiles: Vec<DbConnection> },
}

impl ProfileStore {
    pub fn live(db: Database) -> Self {
        Self::Live { db }
    }

    /// Build the kiosk store, assigning stable position-based ids so the
    /// dump route can still reference entries.
    pub fn kiosk(entries: Vec<KioskProfile>) -> Self {
        let profiles = entries
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| DbConnection {
                id: Some(format!("kiosk-{idx}")),
                name: entry.name,
                connection_url: entry.connection_url,
            })
            .collect();
        Self::Kiosk { profiles }
    }

    pub fn is_kiosk(&self) -> bool {
        matches!(self, Self::Kiosk { .. })
    }

    /// All profiles for display. Kiosk entries are redacted.
    pub async fn list(&self) -> Result<Vec<DbConnection>, CoreError> {
        match self {
            Self::Live { db } => ConnectionRepo::list(db).await,
            Self::Kiosk { profiles } => Ok(profiles.iter().map(DbConnection::redacted).collect()),
        }
    }

    /// Single profile for display. Kiosk entries are redacted.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<DbConnection>, CoreError> {
        match self {
            Self::Live { db } => ConnectionRepo::find_by_id(db, id).await,
            Self::Kiosk { profiles } => Ok(kiosk_lookup(profiles, id).map(DbConnection::redacted)),
        }
    }

    /// Single profile with the real connection URL, for dump and check.
    pub async fn find_by_id_unredacted(&self, id: &str) -> Result<Option<DbConnection>, CoreError> {
        match self {
            Self::Live { db } => ConnectionRepo::find_by_id(db, id).await,
            Self::Kiosk { profiles } => Ok(kiosk_lookup(profiles, id).cloned()),
        }
    }

    pub async fn create(&self, profile: &DbConnection) -> Result<DbConnection, CoreError> {
        match self {
            Self::Live { db } => ConnectionRepo::create(db, profile).await,
            Self::Kiosk { .. } => Err(read_only()),
        }
    }

    pub async fn update(
        &self,
        id: &str,
        profile: &DbConnection,
    ) -> Result<Option<DbConnection>, CoreError> {
        match self {
            Self::Live { db } => ConnectionRepo::update(db, id, profile).await,
            Self::Kiosk { .. } => Err(read_only()),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<bool, CoreError> {
        match self {
            Self::Live { db } => ConnectionRepo::delete(db, id).await,
            Self::Kiosk { .. } => Err(read_only()),
        }
    }

    /// Whether the backing store is reachable. Kiosk mode has no backing
    /// store and always reports healthy.
    pub async fn healthy(&self) -> bool {
        match self {
            Self::Live { db } => crate::ping(db).await.is_ok(),
            Self::Kiosk { .. } => true,
        }
    }
}

fn kiosk_lookup<'a>(profiles: &'a [DbConnection], id: &str) -> Option<&'a DbConnection> {
    profiles.iter().find(|p| p.id.as_deref() == Some(id))
}

fn read_only() -> CoreError {
    CoreError::Forbidden("kiosk mode is read-only".to_string())
}
