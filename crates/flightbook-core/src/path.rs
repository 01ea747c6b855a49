//! Globe path reduction.
//!
//! A fixed-rate downsample of the raw telemetry log for drawing many
//! flights at once. Independent of the metrics engine.

use crate::models::PathCoordinate;
use crate::rules::ProcessingRules;
use crate::telemetry::TelemetryRow;

/// Reduce a raw telemetry log with the default [`ProcessingRules`].
pub fn reduce_path(raw: &str) -> Vec<PathCoordinate> {
    reduce_path_with_rules(raw, &ProcessingRules::default())
}

/// Reduce a raw telemetry log using configured rules.
///
/// Samples raw line indices `1, 1 + stride, 1 + 2 * stride, ...`; the
/// stride counts lines, not accepted rows, so a rejected line is simply a
/// hole in the output. Altitude is mapped from feet onto a small rendering
/// offset and clamped at zero.
pub fn reduce_path_with_rules(raw: &str, rules: &ProcessingRules) -> Vec<PathCoordinate> {
    let coords: Vec<PathCoordinate> = raw
        .lines()
        .skip(1)
        .step_by(rules.stride())
        .filter_map(TelemetryRow::decode)
        .filter_map(|row| {
            let (lat, lon) = row.position()?;
            Some(PathCoordinate(
                lat,
                lon,
                rules.normalize_altitude(row.altitude_ft),
            ))
        })
        .collect();

    tracing::trace!(coords = coords.len(), "reduced telemetry path");
    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with_rows(rows: usize, alt_ft: f64) -> String {
        let mut raw = String::from("Timestamp,UTC,Callsign,Position,Altitude,Speed,Direction\n");
        for i in 0..rows {
            raw.push_str(&format!(
                "{},t{},X,\"{:.4},8.5\",{},0,0\n",
                1000 + i,
                i,
                50.0 + i as f64 * 0.001,
                alt_ft
            ));
        }
        raw
    }

    #[test]
    fn samples_every_twentieth_line() {
        let raw = log_with_rows(45, 10_000.0);
        let coords = reduce_path(&raw);
        // Data rows 0, 20, 40.
        assert_eq!(coords.len(), 3);
        assert!((coords[1].latitude() - 50.02).abs() < 1e-9);
        assert!((coords[2].latitude() - 50.04).abs() < 1e-9);
    }

    #[test]
    fn output_is_bounded_by_line_count() {
        for rows in [0, 1, 19, 20, 21, 99, 100, 101] {
            let raw = log_with_rows(rows, 30_000.0);
            let lines = raw.lines().count();
            assert!(reduce_path(&raw).len() <= lines.div_ceil(20));
        }
    }

    #[test]
    fn altitude_is_normalized_and_clamped() {
        let cruise = reduce_path(&log_with_rows(1, 45_000.0));
        assert!((cruise[0].altitude() - 0.07).abs() < 1e-12);

        let below = reduce_path(&log_with_rows(1, -500.0));
        assert_eq!(below[0].altitude(), 0.0);
    }

    #[test]
    fn unparseable_positions_leave_holes() {
        let mut raw = log_with_rows(41, 1000.0);
        raw = raw.replacen("\"50.0200,8.5\"", "\"n/a,8.5\"", 1);
        let coords = reduce_path(&raw);
        assert_eq!(coords.len(), 2);
        assert!((coords[1].latitude() - 50.04).abs() < 1e-9);
    }

    #[test]
    fn empty_log_yields_empty_path() {
        assert!(reduce_path("").is_empty());
        assert!(reduce_path("header only").is_empty());
    }

    #[test]
    fn reduce_is_idempotent() {
        let raw = log_with_rows(60, 12_000.0);
        assert_eq!(reduce_path(&raw), reduce_path(&raw));
    }
}
