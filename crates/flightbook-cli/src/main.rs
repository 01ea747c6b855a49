//! Flightbook - personal logbook for tracked flights.

use anyhow::Result;
use clap::{Parser, Subcommand};
use flightbook_cli::report::{flight_line, totals_line};
use flightbook_cli::{import_flight, load_globe_paths, Config, ImportRequest, LocalFiles};
use flightbook_core::geodesy::meters_to_nautical_miles;
use flightbook_core::LogbookTotals;
use flightbook_store::{clear_all, delete_flight, init_database, load_flight, load_flights};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database file (overrides FLIGHTBOOK_DB)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Directory imported files are copied to (overrides FLIGHTBOOK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a flight from a telemetry CSV and its KML annotation
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        kml: PathBuf,
        /// Departure airport code
        #[arg(long = "from")]
        departed: String,
        /// Arrival airport code
        #[arg(long = "to")]
        arrived: String,
    },
    /// List all flights, newest first
    List,
    /// Print one flight as JSON
    Show { id: i64 },
    /// Delete one flight
    Delete { id: i64 },
    /// Delete every flight
    Clear,
    /// Print logbook totals
    Summary,
    /// Emit globe paths for all flights as JSON
    Paths {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flightbook=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let db = init_database(&config.db_path, config.db_max_connections).await?;
    let result = run(args.command, &config, &db).await;
    db.close().await;
    result
}

async fn run(command: Command, config: &Config, db: &flightbook_store::Database) -> Result<()> {
    match command {
        Command::Import {
            csv,
            kml,
            departed,
            arrived,
        } => {
            let rules = config.load_rules()?;
            let files = LocalFiles::new(&config.data_dir);
            let request = ImportRequest {
                csv,
                kml,
                departed_code: departed,
                arrived_code: arrived,
            };
            let outcome = import_flight(db, &files, &rules, &request).await?;
            println!(
                "Flight {} saved as #{} ({} NM flown)",
                outcome.flight.flight_number,
                outcome.id,
                meters_to_nautical_miles(outcome.flight.flown_distance_m as f64).round()
            );
        }
        Command::List => {
            let flights = load_flights(db.pool()).await?;
            if flights.is_empty() {
                println!("No flights yet.");
            }
            for flight in &flights {
                println!("{}", flight_line(flight));
            }
        }
        Command::Show { id } => match load_flight(db.pool(), id).await? {
            Some(flight) => println!("{}", serde_json::to_string_pretty(&flight)?),
            None => anyhow::bail!("No flight with id {}", id),
        },
        Command::Delete { id } => {
            if !delete_flight(db.pool(), id).await? {
                anyhow::bail!("No flight with id {}", id);
            }
            println!("Deleted flight #{}", id);
        }
        Command::Clear => {
            let deleted = clear_all(db.pool()).await?;
            println!("Deleted {} flights", deleted);
        }
        Command::Summary => {
            let flights = load_flights(db.pool()).await?;
            println!("{}", totals_line(&LogbookTotals::from_records(&flights)));
        }
        Command::Paths { out } => {
            let rules = config.load_rules()?;
            let flights = load_flights(db.pool()).await?;
            let paths = load_globe_paths(&flights, &rules).await;
            let json = serde_json::to_string(&paths)?;
            match out {
                Some(path) => {
                    tokio::fs::write(&path, json).await?;
                    tracing::info!("Wrote {} paths to {}", paths.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
