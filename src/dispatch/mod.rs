use std::collections::{BTreeMap, BTreeSet};

use futures::future::join_all;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, error, info};

use crate::config::PromptConfig;
use crate::document::Document;
use crate::remote::{RemoteError, SummaryGenerator};
use crate::store::SummaryStore;
use crate::types::outcome::{Summary, SummarySource, TaskResult};

/// Runs one lookup-or-generate task per document.
///
/// At most `limit` tasks are inside the remote call at any instant. Cache hits
/// never take a slot. All tasks are polled on the caller's task, so the batch
/// is a single logical thread of control interleaved at `.await` points.
pub struct Dispatcher<G> {
    generator: G,
    gate: Semaphore,
    limit: usize,
}

impl<G> Dispatcher<G>
where
    G: SummaryGenerator,
{
    pub fn new(generator: G, limit: usize) -> Self {
        let limit = limit.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            generator,
            gate: Semaphore::new(limit),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Waits for every task and returns each document's outcome keyed by
    /// identity. A failed task only affects its own entry.
    ///
    /// Identities must be unique: each store key is written by at most one
    /// task, and the outcomes are keyed by identity.
    pub async fn dispatch(
        &self,
        documents: &[&Document],
        store: &Mutex<SummaryStore>,
        prompt: &PromptConfig,
    ) -> BTreeMap<String, TaskResult> {
        debug_assert!(
            documents
                .iter()
                .map(|doc| doc.identity.as_str())
                .collect::<BTreeSet<_>>()
                .len()
                == documents.len(),
            "dispatch requires unique document identities"
        );

        let tasks = documents.iter().map(|doc| async move {
            let result = self.run_one(doc, store, prompt).await;
            (doc.identity.clone(), result)
        });

        join_all(tasks).await.into_iter().collect()
    }

    async fn run_one(
        &self,
        doc: &Document,
        store: &Mutex<SummaryStore>,
        prompt: &PromptConfig,
    ) -> TaskResult {
        debug!(identity = %doc.identity, "summary processing started");

        let identity = doc.identity_fingerprint();
        let content = doc.content_fingerprint();

        // 1. Lookup, released before any remote work
        let cached = store
            .lock()
            .await
            .lookup(&identity, &content)
            .map(str::to_string);
        if let Some(text) = cached {
            debug!(identity = %doc.identity, "summary cache hit");
            return Ok(Summary {
                text,
                source: SummarySource::Cached,
            });
        }

        // 2. Remote phase under one slot
        let generated = {
            let _permit = self.gate.acquire().await.map_err(|_| RemoteError::Cancelled)?;
            self.generator.generate(prompt, &doc.content).await
        };

        match generated {
            Ok(text) => {
                // 3. Record and fingerprint land together
                store.lock().await.put(identity, content, text.clone());
                info!(identity = %doc.identity, "summary generated");
                Ok(Summary {
                    text,
                    source: SummarySource::Generated,
                })
            }
            Err(e) => {
                error!(identity = %doc.identity, error = %e, "summary generation failed");
                Err(e)
            }
        }
    }
}
