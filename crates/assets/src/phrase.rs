use serde::{Deserialize, Serialize};
use std::path::Path;

/// One input record: a title and its vote count.
///
/// Votes arrive as a JSON number. Validation rejects anything the layout
/// math cannot handle instead of propagating it into geometry construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub title: String,
    pub votes: f64,
}

/// Errors from phrase ingestion.
#[derive(Debug, thiserror::Error)]
pub enum PhraseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record {index}: title is empty")]
    EmptyTitle { index: usize },
    #[error("record {index} ({title:?}): votes must be non-negative, got {votes}")]
    NegativeVotes {
        index: usize,
        title: String,
        votes: f64,
    },
    #[error("record {index} ({title:?}): votes must be finite")]
    NonFiniteVotes { index: usize, title: String },
}

impl PhraseEntry {
    pub fn new(title: impl Into<String>, votes: f64) -> Self {
        Self {
            title: title.into(),
            votes,
        }
    }

    /// The text rendered for the vote count. Integral values print without
    /// a fractional part ("5", not "5.0").
    pub fn vote_label(&self) -> String {
        if self.votes.fract() == 0.0 && self.votes.abs() < i64::MAX as f64 {
            format!("{}", self.votes as i64)
        } else {
            format!("{}", self.votes)
        }
    }

    fn validate(&self, index: usize) -> Result<(), PhraseError> {
        if self.title.is_empty() {
            return Err(PhraseError::EmptyTitle { index });
        }
        if !self.votes.is_finite() {
            return Err(PhraseError::NonFiniteVotes {
                index,
                title: self.title.clone(),
            });
        }
        if self.votes < 0.0 {
            return Err(PhraseError::NegativeVotes {
                index,
                title: self.title.clone(),
                votes: self.votes,
            });
        }
        Ok(())
    }
}

/// Validate every record in a batch. An empty batch is valid; the ring
/// builder treats it as "build nothing".
pub fn validate_phrases(entries: &[PhraseEntry]) -> Result<(), PhraseError> {
    for (index, entry) in entries.iter().enumerate() {
        entry.validate(index)?;
    }
    Ok(())
}

/// Parse and validate a JSON array of `{title, votes}` records.
pub fn parse_phrases(json: &str) -> Result<Vec<PhraseEntry>, PhraseError> {
    let entries: Vec<PhraseEntry> = serde_json::from_str(json)?;
    validate_phrases(&entries)?;
    Ok(entries)
}

/// Load phrase records from a JSON file.
pub fn load_phrases(path: impl AsRef<Path>) -> Result<Vec<PhraseEntry>, PhraseError> {
    let data = std::fs::read_to_string(path.as_ref())?;
    let entries = parse_phrases(&data)?;
    tracing::debug!(
        count = entries.len(),
        path = %path.as_ref().display(),
        "loaded phrase records"
    );
    Ok(entries)
}
