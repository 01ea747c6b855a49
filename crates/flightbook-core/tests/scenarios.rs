//! End-to-end scenarios over raw telemetry and annotation text.

use flightbook_core::{
    compute_metrics, extract_metadata, haversine_distance, parse, reduce_path, FlightMetadata,
};

const HEADER: &str = "Timestamp,UTC,Callsign,Position,Altitude,Speed,Direction";

#[test]
fn short_climb_produces_one_minute_flight() {
    let raw = format!(
        "{HEADER}\n\
         1000,2024-03-02T06:10:00Z,DLH9A,\"50.0000,8.5000\",1000,150,250\n\
         1060,2024-03-02T06:11:00Z,DLH9A,\"50.0100,8.5000\",2000,160,250\n"
    );

    let track = parse(&raw);
    assert_eq!(track.len(), 2);
    assert_eq!(track.date, "2024-03-02T06:10:00Z");

    let metrics = compute_metrics(&track);
    assert_eq!(metrics.duration_minutes, 1);
    assert!(metrics.flown_distance_m > 0);
    assert_eq!(
        metrics.direct_distance_m,
        haversine_distance(50.0, 8.5, 50.01, 8.5).round() as i64
    );
    // 3-D distance is at least the horizontal one.
    assert!(metrics.flown_distance_m >= metrics.direct_distance_m);
}

#[test]
fn ground_only_log_still_has_direct_distance() {
    let raw = format!(
        "{HEADER}\n\
         1000,2024-03-02T06:00:00Z,DLH9A,\"50.0300,8.5600\",0,10,90\n\
         1300,2024-03-02T06:05:00Z,DLH9A,\"50.0400,8.5800\",0,12,90\n"
    );

    let metrics = compute_metrics(&parse(&raw));
    assert_eq!(metrics.flown_distance_m, 0);
    assert_eq!(metrics.duration_minutes, 0);
    assert_eq!(
        metrics.direct_distance_m,
        haversine_distance(50.03, 8.56, 50.04, 8.58).round() as i64
    );
}

#[test]
fn garbage_log_degrades_to_zero_metrics() {
    let raw = "not,a,telemetry\nfile\n\n,,,,,\n";
    let track = parse(raw);
    assert!(track.is_empty());

    let metrics = compute_metrics(&track);
    assert_eq!(metrics.direct_distance_m, 0);
    assert_eq!(metrics.flown_distance_m, 0);
    assert_eq!(metrics.duration_minutes, 0);
}

#[test]
fn parsed_points_never_exceed_data_lines() {
    let raw = format!(
        "{HEADER}\n1,a,X,1,1,1\nbroken\n2,b,X,\"x\",1,1\n3,c,X,2,2,2\n"
    );
    let data_lines = raw.lines().count() - 1;
    assert!(parse(&raw).len() <= data_lines);
}

#[test]
fn inline_aircraft_annotation() {
    let doc = r#"<Placemark><description>Aircraft: Airbus A321-131 (D-AIRP)</description></Placemark>"#;
    let meta = extract_metadata(doc);
    assert_eq!(meta.aircraft_model, "Airbus A321-131");
    assert_eq!(meta.registration, "D-AIRP");
}

#[test]
fn annotation_without_patterns_is_empty() {
    let doc = "<kml><Document><Placemark><Point><coordinates>8.5,50.0</coordinates></Point></Placemark></Document></kml>";
    assert_eq!(extract_metadata(doc), FlightMetadata::default());
}

#[test]
fn globe_path_from_the_same_log() {
    let mut raw = String::from(HEADER);
    raw.push('\n');
    for i in 0..100 {
        raw.push_str(&format!(
            "{},t,X,\"{},{}\",{},0,0\n",
            1000 + i * 10,
            50.0 + i as f64 * 0.01,
            8.5,
            i * 400
        ));
    }

    let coords = reduce_path(&raw);
    assert_eq!(coords.len(), 5);
    assert!(coords.iter().all(|c| c.altitude() >= 0.0));
    assert_eq!(coords[0].altitude(), 0.0);
}
