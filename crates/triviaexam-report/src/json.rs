//! JSON export of graded results.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use triviaexam_core::GradingResult;

/// A graded result with the time it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub graded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: GradingResult,
}

impl ResultRecord {
    pub fn new(result: GradingResult) -> Self {
        Self {
            graded_at: Utc::now(),
            result,
        }
    }

    /// Save the record as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let record: ResultRecord =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(record)
    }
}
