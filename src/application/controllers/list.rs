use std::{collections::HashMap, sync::Arc};

use tracing::{info, warn};

use crate::{
    application::{
        api::{BlobSink, FileApi},
        error::ApiError,
        signal::InvalidationSignal,
    },
    domain::models::{file::FileRecord, filter::FilterCriteria},
};

struct CachedQuery {
    generation: u64,
    records: Vec<FileRecord>,
}

/// Owns the filter state and the filter-keyed listing cache.
///
/// `pending` is what the user is editing, `applied` drives the active query;
/// the split keeps edits from triggering fetches. Cache entries are keyed by
/// the canonical serialization of the applied criteria, so criteria that
/// serialize identically share one entry.
pub struct ListController {
    api: Arc<dyn FileApi>,
    invalidation: InvalidationSignal,
    pending: FilterCriteria,
    applied: FilterCriteria,
    cache: HashMap<String, CachedQuery>,
    last_error: Option<ApiError>,
}

impl ListController {
    pub fn new(api: Arc<dyn FileApi>, invalidation: InvalidationSignal) -> Self {
        Self {
            api,
            invalidation,
            pending: FilterCriteria::default(),
            applied: FilterCriteria::default(),
            cache: HashMap::new(),
            last_error: None,
        }
    }

    /// Edits land on the pending copy only; nothing is fetched.
    pub fn pending_mut(&mut self) -> &mut FilterCriteria {
        &mut self.pending
    }

    pub fn pending(&self) -> &FilterCriteria {
        &self.pending
    }

    pub fn applied(&self) -> &FilterCriteria {
        &self.applied
    }

    /// Copies pending over applied and fetches under the new key.
    pub async fn apply_filters(&mut self) -> Vec<FileRecord> {
        self.applied = self.pending.clone();
        self.query().await
    }

    /// Returns the listing for the applied criteria, refetching when the
    /// cached entry predates the latest invalidation.
    ///
    /// The generation is sampled before the fetch goes out, so a bump that
    /// lands mid-flight leaves the stored entry stale and the next query
    /// refetches. A failed fetch degrades to an empty result set (kept out
    /// of the cache, so the next query retries) with the error on
    /// [`last_error`](Self::last_error).
    pub async fn query(&mut self) -> Vec<FileRecord> {
        let key = self.applied.cache_key();
        let generation = self.invalidation.current();

        if let Some(entry) = self.cache.get(&key) {
            if entry.generation == generation {
                return entry.records.clone();
            }
        }

        match self.api.list(&self.applied).await {
            Ok(records) => {
                self.last_error = None;
                self.cache.insert(
                    key,
                    CachedQuery {
                        generation,
                        records: records.clone(),
                    },
                );
                records
            }
            Err(e) => {
                warn!("List fetch failed, showing empty results: {}", e);
                self.last_error = Some(e);
                Vec::new()
            }
        }
    }

    /// Marks every cached listing stale. Upload success reaches this through
    /// the shared signal; delete success calls it directly.
    pub fn invalidate(&self) {
        self.invalidation.notify();
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Deletes a record. On success the listing is invalidated; on failure
    /// the record stays listed and the error goes back to the caller.
    pub async fn delete_file(&mut self, id: &str) -> Result<(), ApiError> {
        self.api.remove(id).await?;
        info!("Deleted file {}", id);
        self.invalidation.notify();
        Ok(())
    }

    /// Fetches the record's content and hands it to the sink under the
    /// record's original filename. Errors surface to the caller and leave
    /// the listing untouched.
    pub async fn download_file(
        &self,
        record: &FileRecord,
        sink: &dyn BlobSink,
    ) -> Result<(), ApiError> {
        let content = self.api.fetch_download_blob(&record.file).await?;
        sink.save(&record.original_filename, &content).await
    }
}
