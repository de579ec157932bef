use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::loader::{RawRow, load_csv_rows, read_csv_rows};
use crate::error::ChartResult;

/// One trial of the accuracy experiment (`trial,accuracy[,difficulty]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial: f64,
    pub accuracy: f64,
    /// Legend category, when the dataset carries one.
    pub difficulty: Option<String>,
}

impl TrialRecord {
    #[must_use]
    pub fn new(trial: f64, accuracy: f64) -> Self {
        Self {
            trial,
            accuracy,
            difficulty: None,
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    fn from_row(row: &RawRow) -> Self {
        Self {
            trial: row.number("trial"),
            accuracy: row.number("accuracy"),
            difficulty: row
                .get("difficulty")
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
        }
    }
}

pub fn read_trials<R: Read>(reader: R) -> ChartResult<Vec<TrialRecord>> {
    Ok(read_csv_rows(reader)?
        .iter()
        .map(TrialRecord::from_row)
        .collect())
}

pub fn load_trials(path: impl AsRef<Path>) -> ChartResult<Vec<TrialRecord>> {
    Ok(load_csv_rows(path)?
        .iter()
        .map(TrialRecord::from_row)
        .collect())
}
