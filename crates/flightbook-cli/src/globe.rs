//! Globe path batch for the visualization surface.
//!
//! Paths are recomputed from the stored telemetry files on every request;
//! nothing here is persisted.

use crate::files::read_text;
use flightbook_core::{reduce_path_with_rules, FlightRecord, GlobePath, ProcessingRules};
use std::path::PathBuf;
use tokio::task::JoinSet;

pub const PATH_COLOR: &str = "rgba(0, 255, 255, 0.8)";

/// Build one globe path per stored flight.
///
/// Flights are reduced concurrently. Flights without a telemetry file,
/// with an unreadable one, or whose reduced path is empty are skipped.
/// Output keeps the order of `records`.
pub async fn load_globe_paths(records: &[FlightRecord], rules: &ProcessingRules) -> Vec<GlobePath> {
    let mut tasks = JoinSet::new();

    for (index, record) in records.iter().enumerate() {
        if record.flight.csv_path.is_empty() {
            continue;
        }
        let path = PathBuf::from(&record.flight.csv_path);
        let label = record.route_label();
        let id = record.id;
        let rules = rules.clone();

        tasks.spawn(async move {
            let text = match read_text(&path).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!("Could not load path for flight {}: {:#}", id, err);
                    return None;
                }
            };
            let coords =
                tokio::task::spawn_blocking(move || reduce_path_with_rules(&text, &rules)).await;
            match coords {
                Ok(coords) if !coords.is_empty() => Some((
                    index,
                    GlobePath {
                        coords,
                        label,
                        color: PATH_COLOR.to_string(),
                    },
                )),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!("Path reduction for flight {} failed: {}", id, err);
                    None
                }
            }
        });
    }

    let mut paths = Vec::with_capacity(records.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(entry)) => paths.push(entry),
            Ok(None) => {}
            Err(err) => tracing::warn!("Globe path task failed: {}", err),
        }
    }

    paths.sort_by_key(|(index, _)| *index);
    tracing::debug!("Built {} globe paths for {} flights", paths.len(), records.len());
    paths.into_iter().map(|(_, path)| path).collect()
}
