//! Memoized cleaning keyed by input path and content digest.
//!
//! Every lookup re-reads and hashes the source so an edited file is cleaned
//! again, while unchanged bytes return the previously built dataset.

use std::{
    collections::HashMap,
    fmt::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use sha2::{Digest, Sha256};

use crate::{
    error::PipelineResult,
    loader,
    pipeline::{CleanedDataset, CleaningPipeline},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: PathBuf,
    pub digest: String,
}

impl CacheKey {
    pub fn new(path: &Path, bytes: &[u8]) -> Self {
        Self {
            path: path.to_path_buf(),
            digest: content_digest(bytes),
        }
    }
}

pub fn content_digest(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    let mut digest = String::with_capacity(hash.len() * 2);
    for byte in hash.iter() {
        let _ = write!(digest, "{byte:02x}");
    }
    digest
}

#[derive(Debug)]
pub struct CleanedTableCache {
    pipeline: CleaningPipeline,
    entries: HashMap<CacheKey, Arc<CleanedDataset>>,
}

impl CleanedTableCache {
    pub fn new(pipeline: CleaningPipeline) -> Self {
        Self {
            pipeline,
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Failed loads are not cached; the next call retries from scratch.
    pub fn get_or_load(&mut self, path: &Path) -> PipelineResult<Arc<CleanedDataset>> {
        let bytes = loader::read_source(path)?;
        let key = CacheKey::new(path, &bytes);
        if let Some(hit) = self.entries.get(&key) {
            debug!("Cache hit for {:?} ({})", path, &key.digest[..12]);
            return Ok(Arc::clone(hit));
        }
        let dataset = Arc::new(self.pipeline.clean_bytes(&bytes)?);
        debug!(
            "Cached {} record(s) for {:?} ({})",
            dataset.table.len(),
            path,
            &key.digest[..12]
        );
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }
}
