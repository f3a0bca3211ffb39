use std::collections::BTreeSet;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::{ConfigError, SummaryConfig};
use crate::dispatch::Dispatcher;
use crate::document::Document;
use crate::remote::SummaryGenerator;
use crate::store::{StoreError, SummaryStore};
use crate::types::outcome::{display_text, BatchReport, SummarySource};

/// Errors that abort a batch. Per-document generation failures never show up
/// here; they become that document's displayed text.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Summary store error: {0}")]
    Store(#[from] StoreError),
    #[error("Duplicate document identity: {0}")]
    DuplicateIdentity(String),
}

/// Summarizes a site's documents, reusing stored summaries for unchanged
/// content.
pub struct SummaryBatch<G> {
    config: SummaryConfig,
    generator: G,
}

impl<G> SummaryBatch<G>
where
    G: SummaryGenerator,
{
    pub fn new(config: SummaryConfig, generator: G) -> Self {
        Self { config, generator }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Fills `summary` on every eligible document and persists new summaries.
    ///
    /// The store is saved once, after every task finished, whatever the
    /// individual outcomes were.
    pub async fn run(&self, documents: &mut [Document]) -> Result<BatchReport, BatchError> {
        if !self.config.enable {
            info!("summary generation disabled");
            return Ok(BatchReport::disabled(documents.len()));
        }

        self.config.validate()?;
        let started_at = Utc::now();

        // 1. Filter, reject duplicate identities before any I/O
        let mut seen = BTreeSet::new();
        let mut selected = Vec::new();
        for (idx, doc) in documents.iter().enumerate() {
            if !doc.is_summarizable() {
                continue;
            }
            if !seen.insert(doc.identity.as_str()) {
                return Err(BatchError::DuplicateIdentity(doc.identity.clone()));
            }
            selected.push(idx);
        }

        // 2. Load
        let store = Mutex::new(SummaryStore::load(&self.config.store_path)?);

        // 3. Dispatch
        let dispatcher = Dispatcher::new(&self.generator, self.config.effective_concurrency());
        let prompt = self.config.prompt();
        let mut outcomes = {
            let eligible: Vec<&Document> = selected.iter().map(|&i| &documents[i]).collect();
            dispatcher.dispatch(&eligible, &store, &prompt).await
        };

        // 4. Hand results to the rendering layer
        let mut cache_hits = 0;
        let mut generated = 0;
        let mut failed = 0;
        for &idx in &selected {
            let doc = &mut documents[idx];
            let Some(result) = outcomes.remove(&doc.identity) else {
                continue;
            };
            match &result {
                Ok(summary) if summary.source == SummarySource::Cached => cache_hits += 1,
                Ok(_) => generated += 1,
                Err(_) => failed += 1,
            }
            doc.summary = Some(display_text(&result));
        }

        // 5. Persist once
        let mut store = store.into_inner();
        let store_written = store.save()?;

        let report = BatchReport {
            enabled: true,
            started_at,
            finished_at: Utc::now(),
            documents_considered: documents.len(),
            documents_skipped: documents.len() - selected.len(),
            cache_hits,
            generated,
            failed,
            store_written,
        };

        info!(
            considered = report.documents_considered,
            skipped = report.documents_skipped,
            cache_hits = report.cache_hits,
            generated = report.generated,
            failed = report.failed,
            store_written = report.store_written,
            "all summaries processed"
        );

        Ok(report)
    }
}
