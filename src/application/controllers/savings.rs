use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::{application::api::FileApi, domain::models::savings::SavingsSummary};

/// Read-only view over the aggregate dedup savings.
///
/// The value is treated as always stale until refetched. A failed fetch
/// leaves the savings unknown rather than surfacing an error; the UI shows
/// nothing instead of blocking.
pub struct SavingsTracker {
    api: Arc<dyn FileApi>,
    current: Mutex<Option<SavingsSummary>>,
}

impl SavingsTracker {
    pub fn new(api: Arc<dyn FileApi>) -> Self {
        Self {
            api,
            current: Mutex::new(None),
        }
    }

    pub async fn refresh(&self) {
        let fetched = match self.api.fetch_savings().await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("Savings fetch failed, treating savings as unknown: {}", e);
                None
            }
        };
        *self.current.lock().unwrap() = fetched;
    }

    /// Last fetched summary, or `None` while unknown.
    pub fn current(&self) -> Option<SavingsSummary> {
        self.current.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::{
        application::{api::UploadOutcome, error::ApiError},
        domain::models::{
            file::{FileData, FileRecord},
            filter::FilterCriteria,
        },
    };

    struct FlakySavingsApi {
        fail: bool,
    }

    #[async_trait]
    impl FileApi for FlakySavingsApi {
        async fn upload(&self, _file: &FileData) -> UploadOutcome {
            UploadOutcome::Failed(ApiError::Transport("unused".to_string()))
        }

        async fn list(&self, _filters: &FilterCriteria) -> Result<Vec<FileRecord>, ApiError> {
            Ok(Vec::new())
        }

        async fn remove(&self, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn fetch_download_blob(&self, _url: &str) -> Result<Vec<u8>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_savings(&self) -> Result<SavingsSummary, ApiError> {
            if self.fail {
                Err(ApiError::Transport("boom".to_string()))
            } else {
                Ok(SavingsSummary {
                    size: 2.5,
                    unit: "MB".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn refresh_stores_the_fetched_summary() {
        let tracker = SavingsTracker::new(Arc::new(FlakySavingsApi { fail: false }));
        assert_eq!(tracker.current(), None);

        tracker.refresh().await;
        let summary = tracker.current().unwrap();
        assert_eq!(summary.size, 2.5);
        assert_eq!(summary.unit, "MB");
    }

    #[tokio::test]
    async fn fetch_failure_means_unknown_not_error() {
        let tracker = SavingsTracker::new(Arc::new(FlakySavingsApi { fail: true }));
        tracker.refresh().await;
        assert_eq!(tracker.current(), None);
    }
}
