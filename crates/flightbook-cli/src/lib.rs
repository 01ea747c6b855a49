//! Flightbook CLI - orchestration around the core algorithms.
//!
//! Reads the user's files, runs the core, and talks to the flight store.

pub mod config;
pub mod files;
pub mod globe;
pub mod import;
pub mod report;

pub use config::Config;
pub use files::LocalFiles;
pub use globe::load_globe_paths;
pub use import::{import_flight, ImportOutcome, ImportRequest};
