//! Plain-text rendering of logbook listings.

use flightbook_core::geodesy::meters_to_nautical_miles;
use flightbook_core::{FlightRecord, LogbookTotals};

/// `8h 25min`, `45min`, or `-` for zero.
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return "-".to_string();
    }
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{h}h {m}min")
    } else {
        format!("{m}min")
    }
}

fn nautical_miles(meters: i64) -> i64 {
    meters_to_nautical_miles(meters as f64).round() as i64
}

/// One line per flight.
pub fn flight_line(record: &FlightRecord) -> String {
    let f = &record.flight;
    format!(
        "#{:<4} {:>4}  {:<24} {:<14} {:<9} {:<16} {:>6} NM  {:>6} NM direct  {:>+4}%  {}",
        record.id,
        record.chronological_id,
        f.date,
        record.route_label(),
        f.flight_number,
        f.airline,
        nautical_miles(f.flown_distance_m),
        nautical_miles(f.direct_distance_m),
        record.detour_percent(),
        format_duration(f.duration_minutes),
    )
}

pub fn totals_line(totals: &LogbookTotals) -> String {
    format!(
        "{} flights, {} NM flown, {} h in the air",
        totals.flights, totals.flown_nm, totals.hours
    )
}
