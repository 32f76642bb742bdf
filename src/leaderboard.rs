//! Score submission and the local leaderboard
//!
//! At the end of a round the player may submit their name, company and final
//! score. Submission goes through [`ScoreSink`]; the bundled sink keeps the
//! top scores in LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::storage::{self, StorageError};

/// Maximum number of records to keep
pub const MAX_RECORDS: usize = 10;
/// Maximum length (in characters) of a name or company
pub const MAX_FIELD_CHARS: usize = 32;

/// Why a submission did not go through
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("please enter your name (up to 32 characters)")]
    InvalidName,

    #[error("company name must be at most 32 characters")]
    InvalidCompany,

    #[error("could not save score: {0}")]
    Storage(#[from] StorageError),

    #[error("score was not accepted: {0}")]
    Rejected(String),
}

/// One submitted score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    /// May be empty
    pub company: String,
    pub score: i64,
    /// Unix timestamp (ms) of submission
    pub timestamp: f64,
}

impl ScoreRecord {
    /// Build a record from raw form input, trimming and validating both fields
    pub fn new(name: &str, company: &str, score: i64, timestamp: f64) -> Result<Self, SubmitError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_FIELD_CHARS {
            return Err(SubmitError::InvalidName);
        }
        let company = company.trim();
        if company.chars().count() > MAX_FIELD_CHARS {
            return Err(SubmitError::InvalidCompany);
        }
        Ok(Self {
            name: name.to_string(),
            company: company.to_string(),
            score,
            timestamp,
        })
    }
}

/// Destination for final scores
pub trait ScoreSink {
    fn submit(&mut self, record: ScoreRecord) -> Result<(), SubmitError>;
}

/// Top scores kept on this device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalLeaderboard {
    pub records: Vec<ScoreRecord>,
}

impl LocalLeaderboard {
    const STORAGE_KEY: &'static str = "lifter_arcade_leaderboard";

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping descending score order; ties go after earlier records.
    /// Returns the 1-indexed rank, or None if the record fell off the end.
    pub fn insert(&mut self, record: ScoreRecord) -> Option<usize> {
        let pos = self
            .records
            .iter()
            .position(|r| record.score > r.score)
            .unwrap_or(self.records.len());
        if pos >= MAX_RECORDS {
            return None;
        }
        self.records.insert(pos, record);
        self.records.truncate(MAX_RECORDS);
        Some(pos + 1)
    }

    pub fn top_score(&self) -> Option<i64> {
        self.records.first().map(|r| r.score)
    }

    pub fn load() -> Self {
        match storage::load_json::<LocalLeaderboard>(Self::STORAGE_KEY) {
            Some(board) => {
                log::info!("Loaded {} leaderboard records", board.records.len());
                board
            }
            None => Self::new(),
        }
    }

    pub fn save(&self) -> Result<(), SubmitError> {
        Ok(storage::save_json(Self::STORAGE_KEY, self)?)
    }

    /// Insert and persist through `save`. The board only changes once the
    /// save succeeds, so a failed submission can be retried without
    /// duplicating the record.
    pub fn submit_with<F>(&mut self, record: ScoreRecord, save: F) -> Result<(), SubmitError>
    where
        F: FnOnce(&Self) -> Result<(), SubmitError>,
    {
        let (name, score) = (record.name.clone(), record.score);
        let mut next = self.clone();
        let rank = next.insert(record);
        if let Err(e) = save(&next) {
            log::warn!("Leaderboard save failed: {}", e);
            return Err(e);
        }
        *self = next;
        match rank {
            Some(rank) => log::info!("Score {} by {} ranked #{}", score, name, rank),
            None => log::info!("Score {} by {} did not make the board", score, name),
        }
        Ok(())
    }
}

impl ScoreSink for LocalLeaderboard {
    fn submit(&mut self, record: ScoreRecord) -> Result<(), SubmitError> {
        self.submit_with(record, Self::save)
    }
}
