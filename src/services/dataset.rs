use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::GameRecord;

/// Errors that can occur while loading the game dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset contains no records with usable weight and rating")]
    NoUsableRecords,
}

/// Raw record as stored in the processed JSON file.
///
/// The file uses zero as a sentinel for unknown years, weights and playtimes;
/// those become explicit absences before a record reaches the engine.
#[derive(Debug, Deserialize)]
struct RawGameRecord {
    name: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    playtime: Option<u32>,
    #[serde(default)]
    mechanics: Vec<String>,
}

impl From<RawGameRecord> for GameRecord {
    fn from(raw: RawGameRecord) -> Self {
        GameRecord {
            name: raw.name,
            year: raw.year.filter(|y| *y != 0),
            weight: raw.weight.filter(|w| w.is_finite() && *w > 0.0),
            rating: raw.rating.filter(|r| r.is_finite()),
            playtime: raw.playtime.filter(|t| *t > 0),
            mechanics: raw.mechanics,
        }
    }
}

/// Immutable in-memory record store
///
/// Loaded once at startup and shared read-only behind an `Arc` for the
/// lifetime of the process; queries never mutate it.
pub struct DatasetStore {
    records: Vec<GameRecord>,
}

impl DatasetStore {
    /// Read and normalize the processed games file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let raw: Vec<RawGameRecord> = serde_json::from_str(&contents)?;
        let store = Self::from_records(raw.into_iter().map(GameRecord::from).collect())?;

        info!(
            "Loaded {} games ({} stat-eligible) from {}",
            store.records.len(),
            store.stat_eligible_count(),
            path.as_ref().display()
        );
        Ok(store)
    }

    /// Build a store from already-parsed records.
    pub fn from_records(records: Vec<GameRecord>) -> Result<Self, DatasetError> {
        if !records.iter().any(GameRecord::stat_eligible) {
            return Err(DatasetError::NoUsableRecords);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stat_eligible_count(&self) -> usize {
        self.records.iter().filter(|r| r.stat_eligible()).count()
    }
}
