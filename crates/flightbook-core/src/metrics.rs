//! Flight metrics derived from a parsed track.
//!
//! Flown distance and duration only consider *airborne pairs*: two
//! consecutive samples that both report positive altitude. This is a
//! ground/air discriminator, not a takeoff or landing detector.

use crate::geodesy::{distance_3d, surface_distance};
use crate::models::{FlightMetrics, Track};
use crate::rules::ProcessingRules;

/// Compute metrics with the default [`ProcessingRules`].
pub fn compute_metrics(track: &Track) -> FlightMetrics {
    compute_metrics_with_rules(track, &ProcessingRules::default())
}

/// Compute metrics using configured rules.
///
/// - `start_time` is the first sample of the first airborne pair and is
///   never reset by later ground gaps.
/// - `end_time` is the second sample of the last airborne pair seen.
/// - Segments no longer than `rules.min_segment_m` are not added to the
///   flown distance.
/// - Direct distance runs from the first to the last parsed sample,
///   airborne or not.
pub fn compute_metrics_with_rules(track: &Track, rules: &ProcessingRules) -> FlightMetrics {
    let (Some(first), Some(last)) = (track.first(), track.last()) else {
        return FlightMetrics::empty(track.date.clone());
    };
    if track.len() < 2 {
        return FlightMetrics::empty(track.date.clone());
    }

    let mut flown_m = 0.0;
    let mut start_time: i64 = 0;
    let mut end_time: i64 = 0;

    for pair in track.points.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        if !(rules.is_airborne(p1.altitude_m) && rules.is_airborne(p2.altitude_m)) {
            continue;
        }

        if start_time == 0 {
            start_time = p1.timestamp;
        }
        end_time = p2.timestamp;

        let segment_m = distance_3d(p1, p2);
        if segment_m > rules.min_segment_m {
            flown_m += segment_m;
        }
    }

    let duration_minutes = if start_time > 0 && end_time > start_time {
        ((end_time - start_time) as f64 / 60.0).round() as i64
    } else {
        0
    };

    let direct_m = surface_distance(first, last);

    tracing::debug!(
        points = track.len(),
        start_time,
        end_time,
        flown_m,
        direct_m,
        "computed flight metrics"
    );

    FlightMetrics {
        direct_distance_m: direct_m.round() as i64,
        flown_distance_m: flown_m.round() as i64,
        duration_minutes,
        date: track.date.clone(),
    }
}
