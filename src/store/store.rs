use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::store::versioning::{StoreFeatures, StoreFile, StoreRecord, VersionProbe};
use crate::types::identifiers::Fingerprint;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Incompatible version of summary database: {0}")]
    IncompatibleVersion(String),
}

/// Persisted summaries, keyed by identity fingerprint and validated by
/// content fingerprint.
///
/// The store is loaded once, mutated in memory, and written back at most once
/// per batch. Writes only happen when something changed.
#[derive(Debug)]
pub struct SummaryStore {
    path: PathBuf,
    data: StoreFile,
    dirty: bool,
}

impl SummaryStore {
    /// A fresh store that will be written to `path` on the first save after a
    /// change.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: StoreFile::empty(),
            dirty: false,
        }
    }

    /// Loads the store at `path`. A missing file is the empty store.
    ///
    /// A file that exists but does not parse is an error rather than an empty
    /// store, so a corrupted store is never silently overwritten.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no summary store yet, starting empty");
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(e.into()),
        };

        // 1. Version gate before the full schema
        let probe: VersionProbe = serde_json::from_slice(&bytes)?;
        if !probe.is_supported() {
            return Err(StoreError::IncompatibleVersion(probe.describe()));
        }

        // 2. Full parse
        let data: StoreFile = serde_json::from_slice(&bytes)?;

        info!(path = %path.display(), entries = data.summaries.len(), "loaded summary store");

        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    /// Returns the cached summary only when it was produced from content with
    /// the given fingerprint.
    pub fn lookup(&self, identity: &Fingerprint, content: &Fingerprint) -> Option<&str> {
        self.data
            .summaries
            .get(identity)
            .filter(|record| &record.content_fingerprint == content)
            .map(|record| record.summary.as_str())
    }

    pub fn put(&mut self, identity: Fingerprint, content: Fingerprint, summary: String) {
        self.data.summaries.insert(
            identity,
            StoreRecord {
                summary,
                content_fingerprint: content,
            },
        );
        self.dirty = true;
    }

    pub fn get(&self, identity: &Fingerprint) -> Option<&StoreRecord> {
        self.data.summaries.get(identity)
    }

    pub fn len(&self) -> usize {
        self.data.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.summaries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn features(&self) -> &StoreFeatures {
        &self.data.features
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the store if it changed since load. Returns whether a write
    /// happened.
    ///
    /// The file is replaced atomically: the new contents go to a sibling temp
    /// file which is synced and then renamed over the target, so an
    /// interrupted save leaves the previous store intact.
    pub fn save(&mut self) -> Result<bool, StoreError> {
        if !self.dirty {
            debug!(path = %self.path.display(), "summary store unchanged, skipping write");
            return Ok(false);
        }

        let bytes = serde_json::to_vec(&self.data)?;

        let temp_path = temp_path_for(&self.path);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Stale temp file from a crashed previous save
        if temp_path.exists() {
            fs::remove_file(&temp_path)?;
        }

        let replaced =
            write_synced(&temp_path, &bytes).and_then(|()| fs::rename(&temp_path, &self.path));
        if let Err(e) = replaced {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        self.dirty = false;
        info!(path = %self.path.display(), entries = self.len(), "saved summary store");
        Ok(true)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = fs::File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
