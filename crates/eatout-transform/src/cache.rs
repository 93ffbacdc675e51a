//! Snapshot-keyed memoization of enriched listings.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use eatout_ingest::{SnapshotId, SourceFiles};

use crate::error::Result;
use crate::pipeline::{EnrichedListings, Pipeline};

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<SnapshotId, EnrichedListings>,
    hits: usize,
    misses: usize,
}

/// Enriched listings keyed by snapshot identity.
///
/// The cache owns the pipeline that fills it, so every entry was produced
/// under the same directories and options. Callers receive clones; polars
/// frames share their column buffers, so a clone is cheap and no caller can
/// mutate another's frame.
#[derive(Debug, Default)]
pub struct DatasetCache {
    pipeline: Pipeline,
    state: Mutex<CacheState>,
}

impl DatasetCache {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            state: Mutex::default(),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Return the enriched listings for `files`, running the pipeline only
    /// when this snapshot has not been seen. Failures are not cached.
    pub fn get_or_load(&self, files: &SourceFiles) -> Result<EnrichedListings> {
        let snapshot = files.snapshot();
        if let Some(hit) = self.lookup(snapshot) {
            tracing::debug!(snapshot = snapshot.short(), "dataset cache hit");
            return Ok(hit);
        }

        tracing::debug!(snapshot = snapshot.short(), "dataset cache miss");
        let source = files.parse()?;
        let listings = self.pipeline.run(&source)?;

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.misses += 1;
        state
            .entries
            .entry(snapshot.clone())
            .or_insert_with(|| listings.clone());
        Ok(listings)
    }

    fn lookup(&self, snapshot: &SnapshotId) -> Option<EnrichedListings> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let hit = state.entries.get(snapshot).cloned();
        if hit.is_some() {
            state.hits += 1;
        }
        hit
    }

    pub fn contains(&self, snapshot: &SnapshotId) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.contains_key(snapshot)
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
        }
    }

    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.clear();
    }
}
