use super::StoreError;
use eamcet_core::{CutoffQuery, CutoffRow, Snapshot};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Read and decode a snapshot fixture file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
    let bytes = std::fs::read(path).map_err(|source| StoreError::FixtureIo {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = Snapshot::from_json_slice(&bytes)?;
    info!(
        path = %path.display(),
        records = snapshot.record_count(),
        "loaded cutoff fixture"
    );
    Ok(snapshot)
}

/// Read-only store over an in-memory snapshot.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    snapshot: Arc<Snapshot>,
}

impl FixtureStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        load_snapshot(path).map(Self::new)
    }

    pub(super) fn fetch(&self, query: &CutoffQuery) -> Vec<CutoffRow> {
        self.snapshot.evaluate(query)
    }
}
