//! CLI configuration from environment.

use anyhow::{Context, Result};
use flightbook_core::ProcessingRules;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub db_max_connections: u32,
    /// Where imported CSV and KML files are copied to
    pub data_dir: PathBuf,
    /// Optional JSON file overriding [`ProcessingRules`]
    pub rules_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("FLIGHTBOOK_DB").unwrap_or_else(|_| "./data/flights.db".to_string()),
            db_max_connections: env::var("FLIGHTBOOK_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
            data_dir: env::var("FLIGHTBOOK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/my_flight_logs")),
            rules_path: env::var("FLIGHTBOOK_RULES").ok().map(PathBuf::from),
        }
    }

    /// Load processing rules, falling back to the defaults when no rules
    /// file is configured. Fields missing from the file keep their defaults.
    pub fn load_rules(&self) -> Result<ProcessingRules> {
        match &self.rules_path {
            Some(path) => load_rules_file(path),
            None => Ok(ProcessingRules::default()),
        }
    }
}

fn load_rules_file(path: &Path) -> Result<ProcessingRules> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading rules file {}", path.display()))?;
    let rules = serde_json::from_str(&raw)
        .with_context(|| format!("parsing rules file {}", path.display()))?;
    tracing::info!("Loaded processing rules from {}", path.display());
    Ok(rules)
}
