//! Persistence layer for Flightbook.
//!
//! Provides SQLite-backed storage for imported flight records. The
//! [`Database`] handle is created by the caller and passed explicitly to
//! every operation.

pub mod db;
pub mod flights;

pub use db::{clear_all, init_database, Database, MEMORY};
pub use flights::{delete_flight, insert_flight, load_flight, load_flights};
