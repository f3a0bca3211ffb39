pub mod identifiers;
pub mod outcome;

pub use identifiers::Fingerprint;
pub use outcome::{display_text, BatchReport, Summary, SummarySource, TaskResult};
