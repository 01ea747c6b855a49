//! Flight import: files in, one stored flight record out.

use crate::files::{read_text, LocalFiles};
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use flightbook_core::{
    compute_metrics_with_rules, extract_metadata, parse, FlightMetadata, FlightMetrics,
    NewFlight, ProcessingRules,
};
use flightbook_store::{insert_flight, Database};
use std::path::{Path, PathBuf};

pub const DEFAULT_FLIGHT_NUMBER: &str = "Imported";
pub const DEFAULT_AIRLINE: &str = "Unknown Airline";
/// Shown for aircraft model and registration when the KML has neither.
pub const PLACEHOLDER: &str = "-";

/// What the user hands over for one flight.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub csv: PathBuf,
    pub kml: PathBuf,
    pub departed_code: String,
    pub arrived_code: String,
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub id: i64,
    pub flight: NewFlight,
}

/// Copy both files into local storage, derive metrics and metadata, and
/// store the merged record.
///
/// The telemetry must decode; an unreadable annotation only costs the
/// metadata. On failure the local copies are removed again.
pub async fn import_flight(
    db: &Database,
    files: &LocalFiles,
    rules: &ProcessingRules,
    request: &ImportRequest,
) -> Result<ImportOutcome> {
    let stem = files
        .unused_stem(Utc::now().timestamp_millis(), &["csv", "kml"])
        .await?;
    let csv_path = files.save(&request.csv, &format!("{stem}.csv")).await?;
    let kml_path = match files.save(&request.kml, &format!("{stem}.kml")).await {
        Ok(path) => path,
        Err(err) => {
            files.discard(&[csv_path.as_path()]).await;
            return Err(err);
        }
    };

    match store_saved(db, rules, request, &csv_path, &kml_path).await {
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            files.discard(&[csv_path.as_path(), kml_path.as_path()]).await;
            Err(err)
        }
    }
}

async fn store_saved(
    db: &Database,
    rules: &ProcessingRules,
    request: &ImportRequest,
    csv_path: &Path,
    kml_path: &Path,
) -> Result<ImportOutcome> {
    let telemetry = read_text(csv_path).await?;
    let track = parse(&telemetry);
    let metrics = compute_metrics_with_rules(&track, rules);

    let metadata = match read_text(kml_path).await {
        Ok(document) => extract_metadata(&document),
        Err(err) => {
            tracing::warn!("ignoring annotation: {:#}", err);
            FlightMetadata::default()
        }
    };

    let flight = merge_record(
        request,
        metrics,
        metadata,
        csv_path.to_string_lossy().into_owned(),
        kml_path.to_string_lossy().into_owned(),
    );

    let id = insert_flight(db.pool(), &flight).await?;
    tracing::info!(
        "Imported flight {} ({} -> {}) as #{}",
        flight.flight_number,
        flight.departed_code,
        flight.arrived_code,
        id
    );

    Ok(ImportOutcome { id, flight })
}

/// Merge metrics and metadata into a storable record, filling the
/// logbook's display defaults for anything not found.
pub fn merge_record(
    request: &ImportRequest,
    metrics: FlightMetrics,
    metadata: FlightMetadata,
    csv_path: String,
    kml_path: String,
) -> NewFlight {
    let date = if metrics.date.is_empty() {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    } else {
        metrics.date
    };

    NewFlight {
        date,
        departed_code: request.departed_code.clone(),
        arrived_code: request.arrived_code.clone(),
        airline: or_default(metadata.airline, DEFAULT_AIRLINE),
        flight_number: or_default(metadata.flight_number, DEFAULT_FLIGHT_NUMBER),
        aircraft_model: or_default(metadata.aircraft_model, PLACEHOLDER),
        registration: or_default(metadata.registration, PLACEHOLDER),
        direct_distance_m: metrics.direct_distance_m,
        flown_distance_m: metrics.flown_distance_m,
        duration_minutes: metrics.duration_minutes,
        csv_path,
        kml_path,
        external_link_url: metadata.external_link_url,
    }
}

fn or_default(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
