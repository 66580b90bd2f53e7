//! # badgehub-database
//!
//! SQLite connection management, embedded migrations, and the badge
//! repository.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
