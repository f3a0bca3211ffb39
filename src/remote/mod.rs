pub mod chat;
pub mod generator;

pub use chat::ChatCompletionsGenerator;
pub use generator::{RemoteError, SummaryGenerator};
