// Player CSV ingestion.
//
// Lets a user swap the built-in demo roster or waiver pool for their own
// export. One row per player; positions are slash-separated; standardized
// scores are recomputed downstream, never read from the file.

use std::path::Path;

use serde::Deserialize;

use crate::league::player::{Player, PlayerStatus, StatLine};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("row {row}: unknown status `{status}`")]
    UnknownStatus { row: usize, status: String },
}

/// Raw CSV row. Column names match the header of a roster export.
#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    id: String,
    name: String,
    team: String,
    positions: String,
    pts: f64,
    reb: f64,
    ast: f64,
    stl: f64,
    blk: f64,
    fgp: f64,
    ftp: f64,
    tpm: f64,
    to: f64,
    status: String,
    #[serde(default)]
    protected: bool,
}

/// Load players from a CSV file at `path`.
///
/// Imported players carry no standardized scores; run the normalizer over
/// the combined pool afterwards.
pub fn load_players(path: &Path) -> Result<Vec<Player>, ImportError> {
    let display = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|e| match e.kind() {
        csv::ErrorKind::Io(_) => ImportError::Io {
            path: display.clone(),
            source: std::io::Error::other(e.to_string()),
        },
        _ => ImportError::Csv {
            path: display.clone(),
            source: e,
        },
    })?;

    let mut players = Vec::new();
    for (idx, record) in reader.deserialize::<RawPlayerRow>().enumerate() {
        let raw = record.map_err(|e| ImportError::Csv {
            path: display.clone(),
            source: e,
        })?;
        let status =
            PlayerStatus::from_label(&raw.status).ok_or_else(|| ImportError::UnknownStatus {
                row: idx + 2, // 1-based, plus header row
                status: raw.status.clone(),
            })?;
        players.push(Player {
            id: raw.id,
            name: raw.name,
            team: raw.team,
            positions: raw
                .positions
                .split('/')
                .filter(|p| !p.is_empty())
                .map(|p| p.trim().to_string())
                .collect(),
            avg_stats: StatLine {
                pts: raw.pts,
                reb: raw.reb,
                ast: raw.ast,
                stl: raw.stl,
                blk: raw.blk,
                fgp: raw.fgp,
                ftp: raw.ftp,
                tpm: raw.tpm,
                to: raw.to,
            },
            cat_values: None,
            status,
            protected: raw.protected,
        });
    }

    Ok(players)
}
