#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use summary_cache::config::{PromptConfig, SummaryConfig};
use summary_cache::remote::{RemoteError, SummaryGenerator};

/// In-process generator: answers `summary of <content>` after `delay`,
/// fails for content listed in `failing`, and records how many calls were in
/// flight at once.
#[derive(Default)]
pub struct FakeGenerator {
    delay: Duration,
    failing: BTreeSet<String>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_on(mut self, content: &str) -> Self {
        self.failing.insert(content.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &PromptConfig, content: &str) -> Result<String, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(content.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(content) {
            return Err(RemoteError::Api(format!("rejected {content}")));
        }
        Ok(format!("summary of {content}"))
    }
}

pub fn test_prompt() -> PromptConfig {
    SummaryConfig {
        api_url: "http://summaries.invalid/v1/chat/completions".to_string(),
        model: "fake-model".to_string(),
        ..SummaryConfig::default()
    }
    .prompt()
}

pub fn test_config(store_path: std::path::PathBuf) -> SummaryConfig {
    SummaryConfig {
        enable: true,
        api_url: "http://summaries.invalid/v1/chat/completions".to_string(),
        model: "fake-model".to_string(),
        store_path,
        ..SummaryConfig::default()
    }
}
