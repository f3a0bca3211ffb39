use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::remote::RemoteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    /// Reused from the store; no remote call was made.
    Cached,
    /// Produced by the remote generator during this run.
    Generated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub source: SummarySource,
}

/// Outcome of one document's task.
pub type TaskResult = Result<Summary, RemoteError>;

/// What the rendering layer shows for a task: the summary, or the error
/// message in its place.
pub fn display_text(result: &TaskResult) -> String {
    match result {
        Ok(summary) => summary.text.clone(),
        Err(e) => e.to_string(),
    }
}

/// Counters for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub enabled: bool,
    pub started_at: DateTime<Utc>, // informational only
    pub finished_at: DateTime<Utc>, // informational only

    pub documents_considered: usize,
    pub documents_skipped: usize,

    pub cache_hits: usize,
    pub generated: usize,
    pub failed: usize,

    pub store_written: bool,
}

impl BatchReport {
    pub fn disabled(documents_considered: usize) -> Self {
        let now = Utc::now();
        Self {
            enabled: false,
            started_at: now,
            finished_at: now,
            documents_considered,
            documents_skipped: documents_considered,
            cache_hits: 0,
            generated: 0,
            failed: 0,
            store_written: false,
        }
    }

    pub fn remote_calls(&self) -> usize {
        self.generated + self.failed
    }
}
