use serde::{Deserialize, Serialize};

use crate::types::identifiers::Fingerprint;

/// A page handed over by the site content provider.
///
/// `summary` is the rendering layer's slot: the batch fills it for every
/// document it processes, with either the summary or the error text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub identity: String,
    pub content: String,
    pub eligible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Document {
    pub fn new(identity: impl Into<String>, content: impl Into<String>, eligible: bool) -> Self {
        Self {
            identity: identity.into(),
            content: content.into(),
            eligible,
            summary: None,
        }
    }

    /// Unpublished pages, and pages with no identity or no content, are
    /// skipped rather than rejected.
    pub fn is_summarizable(&self) -> bool {
        self.eligible && !self.identity.is_empty() && !self.content.is_empty()
    }

    pub fn identity_fingerprint(&self) -> Fingerprint {
        Fingerprint::of_str(&self.identity)
    }

    pub fn content_fingerprint(&self) -> Fingerprint {
        Fingerprint::of_str(&self.content)
    }
}
