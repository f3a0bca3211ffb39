//! Content-addressed summary cache with bounded-concurrency remote generation.
//!
//! `summary-cache` gives every eligible document of a site a short summary.
//! Summaries are stored keyed by a fingerprint of the document's identity and
//! validated against a fingerprint of its content, so a page is only sent to
//! the remote generator when it is new or has changed. Remote calls run under
//! a global concurrency cap, and one failing page never aborts the batch.
//!
//! ```no_run
//! use summary_cache::{ChatCompletionsGenerator, Document, SummaryBatch, SummaryConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SummaryConfig::from_path("summary.config.json".as_ref())?;
//! let batch = SummaryBatch::new(config, ChatCompletionsGenerator::new());
//!
//! let mut docs = vec![Document::new("posts/hello/", "Hello, world.", true)];
//! let report = batch.run(&mut docs).await?;
//! println!("{} generated, {} cached", report.generated, report.cache_hits);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod dispatch;
pub mod document;
pub mod remote;
pub mod store;
pub mod types;

pub use batch::{BatchError, SummaryBatch};
pub use config::{ConfigError, PromptConfig, SummaryConfig};
pub use dispatch::Dispatcher;
pub use document::Document;
pub use remote::{ChatCompletionsGenerator, RemoteError, SummaryGenerator};
pub use store::{StoreError, SummaryStore};
pub use types::{BatchReport, Fingerprint, Summary, SummarySource, TaskResult};
