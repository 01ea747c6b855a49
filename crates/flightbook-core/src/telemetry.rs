//! Telemetry log parsing.
//!
//! The log is a comma separated export with one header line and positional
//! columns:
//!
//! ```text
//! [0] unix timestamp  [1] display timestamp  [2] unused
//! [3] latitude        [4] longitude          [5] altitude (feet)
//! ```
//!
//! Latitude and longitude usually arrive as a single quoted `"lat,lon"`
//! pair, which a naive comma split tears into two fields with a stray
//! quote on each. The column layout is only known to [`TelemetryRow`].

use crate::error::CoreError;
use crate::geodesy::FEET_TO_METERS;
use crate::models::{Track, TrackPoint};

/// Rows with fewer fields than this are ignored.
pub const MIN_FIELDS: usize = 6;

const COL_UNIX_TIME: usize = 0;
const COL_DISPLAY_TIME: usize = 1;
const COL_LATITUDE: usize = 3;
const COL_LONGITUDE: usize = 4;
const COL_ALTITUDE_FT: usize = 5;

/// One data line of the telemetry log, decoded into named fields.
///
/// Decoding is tolerant: only a missing line or too few fields make it
/// fail. Individual fields that don't parse are reported as `None` (or as
/// zero where the log has a natural fallback) and left to the caller to
/// judge.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRow<'a> {
    /// Unix seconds; 0 when the column does not parse.
    pub unix_time: i64,
    /// Human readable timestamp, passed through as-is.
    pub display_time: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Feet; 0 when the column does not parse.
    pub altitude_ft: f64,
}

impl<'a> TelemetryRow<'a> {
    /// Decode one raw line. `None` for blank lines and short rows.
    pub fn decode(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(Self {
            unix_time: parse_unix_time(fields[COL_UNIX_TIME]),
            display_time: fields[COL_DISPLAY_TIME],
            latitude: parse_coordinate(fields[COL_LATITUDE]),
            longitude: parse_coordinate(fields[COL_LONGITUDE]),
            altitude_ft: parse_finite(fields[COL_ALTITUDE_FT]).unwrap_or(0.0),
        })
    }

    /// Latitude and longitude, if both are finite numbers.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Convert to a track point, converting altitude to meters.
    pub fn to_track_point(&self) -> Option<TrackPoint> {
        let (latitude, longitude) = self.position()?;
        Some(TrackPoint {
            latitude,
            longitude,
            altitude_m: self.altitude_ft * FEET_TO_METERS,
            timestamp: self.unix_time,
        })
    }
}

/// Parse a telemetry log into a [`Track`].
///
/// The first line is always treated as the header. Malformed rows are
/// dropped silently; an empty or entirely malformed log yields an empty
/// track. Never fails.
pub fn parse(raw: &str) -> Track {
    let mut track = Track::default();
    let mut data_lines = 0usize;

    for (index, line) in raw.lines().enumerate().skip(1) {
        data_lines += 1;

        let Some(row) = TelemetryRow::decode(line) else {
            tracing::trace!(line = index, "skipping short or blank telemetry row");
            continue;
        };

        if track.date.is_empty() && !row.display_time.is_empty() {
            track.date = row.display_time.to_string();
        }

        match row.to_track_point() {
            Some(point) => track.points.push(point),
            None => tracing::trace!(line = index, "skipping telemetry row without a position"),
        }
    }

    tracing::debug!(
        accepted = track.points.len(),
        rejected = data_lines - track.points.len(),
        date = %track.date,
        "parsed telemetry log"
    );
    track
}

/// Parse raw telemetry bytes.
///
/// The one hard failure of the parser: bytes that are not UTF-8 text.
pub fn parse_bytes(raw: &[u8]) -> Result<Track, CoreError> {
    let text = std::str::from_utf8(raw)?;
    Ok(parse(text))
}

fn parse_coordinate(field: &str) -> Option<f64> {
    parse_finite(field.trim().trim_matches('"'))
}

fn parse_finite(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn parse_unix_time(field: &str) -> i64 {
    let field = field.trim().trim_matches('"');
    field
        .parse::<i64>()
        .ok()
        .or_else(|| parse_finite(field).map(|value| value.trunc() as i64))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Timestamp,UTC,Callsign,Position,Altitude,Speed,Direction";

    #[test]
    fn decode_splits_quoted_position() {
        let row = TelemetryRow::decode(
            "1700000000,2023-11-14T22:13:20Z,DLH400,\"50.0379,8.5622\",1200,160,250",
        )
        .unwrap();
        assert_eq!(row.unix_time, 1_700_000_000);
        assert_eq!(row.display_time, "2023-11-14T22:13:20Z");
        assert_eq!(row.position(), Some((50.0379, 8.5622)));
        assert_eq!(row.altitude_ft, 1200.0);
    }

    #[test]
    fn decode_rejects_blank_and_short_rows() {
        assert!(TelemetryRow::decode("").is_none());
        assert!(TelemetryRow::decode("   \r").is_none());
        assert!(TelemetryRow::decode("1,2,3,4,5").is_none());
    }

    #[test]
    fn decode_tolerates_bad_timestamp_and_altitude() {
        let row = TelemetryRow::decode("abc,x,y,1.5,2.5,zz").unwrap();
        assert_eq!(row.unix_time, 0);
        assert_eq!(row.altitude_ft, 0.0);
        assert!(row.to_track_point().is_some());
    }

    #[test]
    fn parse_skips_header_and_converts_feet() {
        let raw = format!("{HEADER}\n1000,d1,X,\"10.0,20.0\",1000,0,0\n");
        let track = parse(&raw);
        assert_eq!(track.len(), 1);
        let point = track.points[0];
        assert_eq!(point.timestamp, 1000);
        assert!((point.altitude_m - 304.8).abs() < 1e-9);
    }

    #[test]
    fn parse_never_reads_the_header_as_data() {
        let track = parse("1000,d1,X,10.0,20.0,1000");
        assert!(track.is_empty());
        assert_eq!(track.date, "");
    }

    #[test]
    fn parse_drops_rows_with_bad_positions() {
        let raw = format!(
            "{HEADER}\n1000,d1,X,\"north,20.0\",1000,0,0\n1060,d2,X,\"10.0,NaN\",1000,0,0\n1120,d3,X,\"10.0,inf\",0,0,0\n1180,d4,X,\"10.0,20.0\",0,0,0"
        );
        let track = parse(&raw);
        assert_eq!(track.len(), 1);
        assert_eq!(track.points[0].timestamp, 1180);
    }

    #[test]
    fn date_comes_from_first_row_with_display_time_even_if_rejected() {
        let raw = format!(
            "{HEADER}\n1000,,X,\"10.0,20.0\",0,0,0\n1060,first,X,\"bad,20.0\",0,0,0\n1120,second,X,\"10.0,20.0\",0,0,0"
        );
        let track = parse(&raw);
        assert_eq!(track.date, "first");
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn parse_preserves_row_order() {
        let raw = format!(
            "{HEADER}\n3000,a,X,1,1,0\n1000,b,X,2,2,0\n2000,c,X,3,3,0"
        );
        let stamps: Vec<i64> = parse(&raw).points.iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![3000, 1000, 2000]);
    }

    #[test]
    fn parse_handles_crlf_line_endings() {
        let raw = format!("{HEADER}\r\n1000,d1,X,\"10.0,20.0\",1000,0,0\r\n");
        let track = parse(&raw);
        assert_eq!(track.len(), 1);
        assert!((track.points[0].altitude_m - 304.8).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_track() {
        assert_eq!(parse(""), Track::default());
    }

    #[test]
    fn parse_bytes_rejects_invalid_utf8() {
        let err = parse_bytes(&[b'a', b'\n', 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidEncoding { offset: 2 }));
    }
}
