//! Logbook totals across all stored flights.

use crate::geodesy::meters_to_nautical_miles;
use crate::models::FlightRecord;
use serde::{Deserialize, Serialize};

/// Odometer figures for the whole logbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogbookTotals {
    pub flights: usize,
    /// Sum of flown distances, rounded to whole nautical miles
    pub flown_nm: i64,
    /// Sum of durations, rounded to whole hours
    pub hours: i64,
}

impl LogbookTotals {
    pub fn from_records(records: &[FlightRecord]) -> Self {
        let flown_m: i64 = records.iter().map(|r| r.flight.flown_distance_m.max(0)).sum();
        let minutes: i64 = records.iter().map(|r| r.flight.duration_minutes.max(0)).sum();

        Self {
            flights: records.len(),
            flown_nm: meters_to_nautical_miles(flown_m as f64).round() as i64,
            hours: (minutes as f64 / 60.0).round() as i64,
        }
    }
}
