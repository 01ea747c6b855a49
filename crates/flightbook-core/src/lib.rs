//! Flightbook core - pure algorithms over flight-tracking exports.
//!
//! Turns a telemetry CSV into a [`Track`], a track into [`FlightMetrics`],
//! a KML annotation document into [`FlightMetadata`], and a telemetry CSV
//! into a down-sampled globe path. Nothing in here does I/O.

pub mod error;
pub mod geodesy;
pub mod metadata;
pub mod metrics;
pub mod models;
pub mod path;
pub mod rules;
pub mod summary;
pub mod telemetry;

pub use error::CoreError;
pub use geodesy::{distance_3d, haversine_distance, EARTH_RADIUS_M};
pub use metadata::{extract_metadata, AircraftLayout};
pub use metrics::{compute_metrics, compute_metrics_with_rules};
pub use models::{
    FlightMetadata, FlightMetrics, FlightRecord, GlobePath, NewFlight, PathCoordinate, Track,
    TrackPoint,
};
pub use path::{reduce_path, reduce_path_with_rules};
pub use rules::ProcessingRules;
pub use summary::LogbookTotals;
pub use telemetry::{parse, parse_bytes, TelemetryRow};
