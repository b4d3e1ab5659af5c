//! Repository for the `connections` collection.

use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use mongovault_core::error::CoreError;
use mongovault_core::profile::DbConnection;

use crate::models::connection::{ConnectionRecord, COLLECTION};

/// CRUD operations for connection profiles.
///
/// Ids are ObjectId hex strings; a string that does not parse as an ObjectId
/// cannot reference a stored record and is treated as absent.
pub struct ConnectionRepo;

impl ConnectionRepo {
    fn collection(db: &Database) -> Collection<ConnectionRecord> {
        db.collection(COLLECTION)
    }

    /// Insert a new profile, returning it with the assigned id. Any caller
    /// supplied id is ignored. Duplicate names fail with `Conflict`.
    pub async fn create(db: &Database, profile: &DbConnection) -> Result<DbConnection, CoreError> {
        let record = ConnectionRecord {
            id: None,
            name: profile.name.clone(),
            connection_url: profile.connection_url.clone(),
        };
        let result = Self::collection(db)
            .insert_one(&record)
            .await
            .map_err(|err| classify_write_error(err, &profile.name))?;
        Ok(DbConnection {
            id: result.inserted_id.as_object_id().map(|oid| oid.to_hex()),
            name: record.name,
            connection_url: record.connection_url,
        })
    }

    /// All profiles in store order.
    pub async fn list(db: &Database) -> Result<Vec<DbConnection>, CoreError> {
        let mut cursor = Self::collection(db)
            .find(doc! {})
            .await
            .map_err(internal)?;
        let mut profiles = Vec::new();
        while let Some(record) = cursor.try_next().await.map_err(internal)? {
            profiles.push(record.into_profile());
        }
        Ok(profiles)
    }

    pub async fn find_by_id(db: &Database, id: &str) -> Result<Option<DbConnection>, CoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let found = Self::collection(db)
            .find_one(doc! { "_id": oid })
            .await
            .map_err(internal)?;
        Ok(found.map(ConnectionRecord::into_profile))
    }

    /// Full replace by id. Returns `None` when no record with the id exists.
    /// Renaming onto another record's name fails with `Conflict` via the
    /// unique index.
    pub async fn update(
        db: &Database,
        id: &str,
        profile: &DbConnection,
    ) -> Result<Option<DbConnection>, CoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let record = ConnectionRecord {
            id: Some(oid),
            name: profile.name.clone(),
            connection_url: profile.connection_url.clone(),
        };
        let result = Self::collection(db)
            .replace_one(doc! { "_id": oid }, &record)
            .await
            .map_err(|err| classify_write_error(err, &profile.name))?;
        if result.matched_count == 0 {
            Ok(None)
        } else {
            Ok(Some(record.into_profile()))
        }
    }

    /// Delete by id. Idempotent: deleting an absent id is a silent no-op.
    /// Returns whether a record was actually removed.
    pub async fn delete(db: &Database, id: &str) -> Result<bool, CoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let result = Self::collection(db)
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(internal)?;
        Ok(result.deleted_count > 0)
    }
}

fn internal(err: mongodb::error::Error) -> CoreError {
    CoreError::Internal(err.to_string())
}

fn classify_write_error(err: mongodb::error::Error, name: &str) -> CoreError {
    if is_duplicate_key(&err) {
        CoreError::Conflict(format!("a connection named '{name}' already exists"))
    } else {
        internal(err)
    }
}

/// E11000 duplicate-key violation on the unique name index.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}
