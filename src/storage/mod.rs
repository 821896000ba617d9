//! Storage layer for league history
//!
//! SQLite via rusqlite, organized into:
//! - `models`: Row structs
//! - `schema`: Connection and table management
//! - `queries`: Natural-key lookups, inserts, and read queries

pub mod models;
pub mod queries;
pub mod schema;


pub use models::*;
pub use schema::LedgerDatabase;
