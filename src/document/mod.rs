pub mod document;

pub use crate::types::identifiers::Fingerprint;
pub use document::Document;
