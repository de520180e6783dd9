use crate::errors::StoreError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed classification of a single test result. The recorder is the only
/// place raw report strings are checked against this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Passed,
    Failed,
    Timeout,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Passed => "Passed",
            Outcome::Failed => "Failed",
            Outcome::Timeout => "Timeout",
        }
    }
}

impl FromStr for Outcome {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Passed" => Ok(Outcome::Passed),
            "Failed" => Ok(Outcome::Failed),
            "Timeout" => Ok(Outcome::Timeout),
            other => Err(StoreError::InvalidOutcome(other.to_string())),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One result of a run, read back joined with its test name.
#[derive(Debug, Clone)]
pub struct RecordedOutcome {
    pub test_name: String,
    pub outcome: Outcome,
    pub error_message: Option<String>,
}

/// One denormalized row of a per-branch snapshot table.
#[derive(Debug, Clone)]
pub struct ArchivedResultRow {
    pub id: i64,
    pub version: String,
    pub recorded_at: NaiveDateTime,
    pub test_name: String,
    pub outcome: Outcome,
    pub error_message: Option<String>,
}
