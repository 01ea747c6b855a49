//! Core data models for Flightbook.

use serde::{Deserialize, Serialize};

/// One telemetry sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters, converted from the feet in the source log.
    pub altitude_m: f64,
    /// Unix seconds.
    pub timestamp: i64,
}

/// Parsed telemetry log: the accepted samples in source order, plus the
/// display date of the first data row that carried one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub points: Vec<TrackPoint>,
    #[serde(default)]
    pub date: String,
}

impl Track {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TrackPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrackPoint> {
        self.points.last()
    }
}

/// Derived summary of one flight.
///
/// Distances are rounded to whole meters. A track with fewer than two
/// points yields zeros everywhere except `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightMetrics {
    pub direct_distance_m: i64,
    pub flown_distance_m: i64,
    pub duration_minutes: i64,
    #[serde(default)]
    pub date: String,
}

impl FlightMetrics {
    /// Degenerate result for tracks too short to measure.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// How much longer the flown track was than the great circle, in percent.
    pub fn detour_percent(&self) -> i64 {
        detour_percent(self.direct_distance_m, self.flown_distance_m)
    }
}

/// Ties round toward positive infinity, so a -12.5% detour shows as -12.
pub(crate) fn detour_percent(direct_m: i64, flown_m: i64) -> i64 {
    if direct_m <= 0 {
        return 0;
    }
    let percent = ((flown_m as f64 / direct_m as f64) - 1.0) * 100.0;
    (percent + 0.5).floor() as i64
}

/// Descriptive fields pulled out of a KML annotation document.
///
/// Empty string means "not found"; fields are never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightMetadata {
    pub airline: String,
    pub flight_number: String,
    pub aircraft_model: String,
    pub registration: String,
    pub external_link_url: String,
}

impl FlightMetadata {
    pub fn is_empty(&self) -> bool {
        self.airline.is_empty()
            && self.flight_number.is_empty()
            && self.aircraft_model.is_empty()
            && self.registration.is_empty()
            && self.external_link_url.is_empty()
    }
}

/// `(latitude, longitude, normalized_altitude)` triple for the globe view.
///
/// Serializes as a three element array, which is what globe renderers take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathCoordinate(pub f64, pub f64, pub f64);

impl PathCoordinate {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    pub fn altitude(&self) -> f64 {
        self.2
    }
}

/// Renderable polyline for one flight. Label and color belong to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobePath {
    pub coords: Vec<PathCoordinate>,
    pub label: String,
    pub color: String,
}

/// Flight record as handed to the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFlight {
    pub date: String,
    pub departed_code: String,
    pub arrived_code: String,
    pub airline: String,
    pub flight_number: String,
    pub aircraft_model: String,
    pub registration: String,
    pub direct_distance_m: i64,
    pub flown_distance_m: i64,
    pub duration_minutes: i64,
    pub csv_path: String,
    pub kml_path: String,
    #[serde(default)]
    pub external_link_url: String,
}

/// Flight record as read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub id: i64,
    /// 1-based position when all flights are ordered by date, oldest first.
    pub chronological_id: i64,
    #[serde(flatten)]
    pub flight: NewFlight,
}

impl FlightRecord {
    /// `"DEP -> ARR"`, as shown next to the globe path.
    pub fn route_label(&self) -> String {
        format!(
            "{} -> {}",
            self.flight.departed_code, self.flight.arrived_code
        )
    }

    pub fn detour_percent(&self) -> i64 {
        detour_percent(self.flight.direct_distance_m, self.flight.flown_distance_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detour_is_zero_without_direct_distance() {
        let metrics = FlightMetrics {
            direct_distance_m: 0,
            flown_distance_m: 1200,
            duration_minutes: 3,
            date: String::new(),
        };
        assert_eq!(metrics.detour_percent(), 0);
    }

    #[test]
    fn detour_rounds_to_whole_percent() {
        let metrics = FlightMetrics {
            direct_distance_m: 1000,
            flown_distance_m: 1126,
            duration_minutes: 0,
            date: String::new(),
        };
        assert_eq!(metrics.detour_percent(), 13);
    }

    #[test]
    fn negative_detour_ties_round_up() {
        let metrics = FlightMetrics {
            direct_distance_m: 8,
            flown_distance_m: 7,
            duration_minutes: 0,
            date: String::new(),
        };
        assert_eq!(metrics.detour_percent(), -12);

        let metrics = FlightMetrics {
            direct_distance_m: 8,
            flown_distance_m: 9,
            duration_minutes: 0,
            date: String::new(),
        };
        assert_eq!(metrics.detour_percent(), 13);
    }

    #[test]
    fn path_coordinate_serializes_as_array() {
        let json = serde_json::to_string(&PathCoordinate(50.0, 8.5, 0.07)).unwrap();
        assert_eq!(json, "[50.0,8.5,0.07]");
    }

    #[test]
    fn default_metadata_is_empty() {
        assert!(FlightMetadata::default().is_empty());
    }
}
