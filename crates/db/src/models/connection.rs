//! Persistence shape of a connection profile.

use mongodb::bson::oid::ObjectId;
use mongovault_core::profile::DbConnection;
use serde::{Deserialize, Serialize};

/// Collection holding the connection profiles.
pub const COLLECTION: &str = "connections";

/// BSON document layout for a stored profile. Field names are camelCase to
/// match the wire DTO, `_id` is the Mongo ObjectId.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub connection_url: String,
}

impl ConnectionRecord {
    pub fn into_profile(self) -> DbConnection {
        DbConnection {
            id: self.id.map(|oid| oid.to_hex()),
            name: self.name,
            connection_url: self.connection_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn record_round_trips_through_bson() {
        let oid = ObjectId::new();
        let record = ConnectionRecord {
            id: Some(oid),
            name: "staging".to_string(),
            connection_url: "mongodb://staging/db".to_string(),
        };
        let doc = bson::to_document(&record).unwrap();
        assert!(doc.get_object_id("_id").is_ok());
        assert_eq!(doc.get_str("connectionUrl").unwrap(), "mongodb://staging/db");

        let back: ConnectionRecord = bson::from_document(doc).unwrap();
        assert_eq!(back.into_profile().id, Some(oid.to_hex()));
    }

    #[test]
    fn unsaved_record_serializes_without_id() {
        let record = ConnectionRecord {
            id: None,
            name: "new".to_string(),
            connection_url: "mongodb://h/db".to_string(),
        };
        let doc = bson::to_document(&record).unwrap();
        assert!(!doc.contains_key("_id"));
    }
}
