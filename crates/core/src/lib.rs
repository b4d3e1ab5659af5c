//! Domain types, error taxonomy, and mongodump/mongorestore invocation
//! helpers shared by the store layer and the HTTP server.

pub mod error;
pub mod profile;
pub mod tools;
pub mod types;
