use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::identifiers::Fingerprint;

/// The only on-disk layout this crate reads or writes.
pub const STORE_FORMAT_VERSION: u32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFeatures {
    pub incremental: bool,
}

/// A summary together with the fingerprint of the content it was made from.
/// Always written as a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub summary: String,
    #[serde(rename = "sha256")]
    pub content_fingerprint: Fingerprint,
}

// Key point:
// keyed by identity fingerprint
// BTreeMap keeps the written file stable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFile {
    pub version: u32,
    #[serde(default)]
    pub features: StoreFeatures,
    #[serde(default)]
    pub summaries: BTreeMap<Fingerprint, StoreRecord>,
}

impl StoreFile {
    pub fn empty() -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            features: StoreFeatures::default(),
            summaries: BTreeMap::new(),
        }
    }
}

/// Reads just the version so an older layout is reported as incompatible
/// instead of as a schema error.
#[derive(Debug, Deserialize)]
pub(crate) struct VersionProbe {
    #[serde(default)]
    pub version: Option<serde_json::Value>,
}

impl VersionProbe {
    pub(crate) fn is_supported(&self) -> bool {
        self.version.as_ref().and_then(|v| v.as_u64()) == Some(STORE_FORMAT_VERSION as u64)
    }

    pub(crate) fn describe(&self) -> String {
        match &self.version {
            Some(v) => v.to_string(),
            None => "missing".to_string(),
        }
    }
}
