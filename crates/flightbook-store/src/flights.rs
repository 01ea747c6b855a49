//! Flight record persistence operations.

use anyhow::Result;
use flightbook_core::models::{FlightRecord, NewFlight};
use sqlx::SqlitePool;

const SELECT_FLIGHTS: &str = r#"
    SELECT id, date, departed_code, arrived_code, airline, flight_number,
           plane_model, registration, distance_direct_meters, distance_flown_meters,
           duration_minutes, csv_path, kml_path, fr24_url,
           ROW_NUMBER() OVER (ORDER BY date ASC, id ASC) AS chronological_id
    FROM flights
"#;

/// Insert a new flight record, returning its id.
pub async fn insert_flight(pool: &SqlitePool, flight: &NewFlight) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO flights (
            date, departed_code, arrived_code, airline, flight_number,
            plane_model, registration,
            distance_direct_meters, distance_flown_meters, duration_minutes,
            csv_path, kml_path, fr24_url
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
    )
    .bind(&flight.date)
    .bind(&flight.departed_code)
    .bind(&flight.arrived_code)
    .bind(&flight.airline)
    .bind(&flight.flight_number)
    .bind(&flight.aircraft_model)
    .bind(&flight.registration)
    .bind(flight.direct_distance_m)
    .bind(flight.flown_distance_m)
    .bind(flight.duration_minutes)
    .bind(&flight.csv_path)
    .bind(&flight.kml_path)
    .bind(&flight.external_link_url)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(id, flight_number = %flight.flight_number, "Stored flight");
    Ok(id)
}

/// Load all flights, newest first.
pub async fn load_flights(pool: &SqlitePool) -> Result<Vec<FlightRecord>> {
    let query = format!("{SELECT_FLIGHTS} ORDER BY date DESC, id DESC");
    let rows = sqlx::query_as::<_, FlightRow>(&query)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Load one flight by id.
///
/// The chronological id is still ranked over the whole table.
pub async fn load_flight(pool: &SqlitePool, id: i64) -> Result<Option<FlightRecord>> {
    let query = format!("SELECT * FROM ({SELECT_FLIGHTS}) WHERE id = ?1");
    let row = sqlx::query_as::<_, FlightRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.into()))
}

/// Delete a flight. Returns false if no such flight existed.
pub async fn delete_flight(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM flights WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct FlightRow {
    id: i64,
    chronological_id: i64,
    date: String,
    departed_code: String,
    arrived_code: String,
    airline: String,
    flight_number: String,
    plane_model: String,
    registration: String,
    distance_direct_meters: i64,
    distance_flown_meters: i64,
    duration_minutes: i64,
    csv_path: String,
    kml_path: String,
    fr24_url: String,
}

impl From<FlightRow> for FlightRecord {
    fn from(row: FlightRow) -> Self {
        FlightRecord {
            id: row.id,
            chronological_id: row.chronological_id,
            flight: NewFlight {
                date: row.date,
                departed_code: row.departed_code,
                arrived_code: row.arrived_code,
                airline: row.airline,
                flight_number: row.flight_number,
                aircraft_model: row.plane_model,
                registration: row.registration,
                direct_distance_m: row.distance_direct_meters,
                flown_distance_m: row.distance_flown_meters,
                duration_minutes: row.duration_minutes,
                csv_path: row.csv_path,
                kml_path: row.kml_path,
                external_link_url: row.fr24_url,
            },
        }
    }
}
