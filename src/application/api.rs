use async_trait::async_trait;

use crate::{
    application::error::ApiError,
    domain::models::{
        file::{FileData, FileRecord},
        filter::FilterCriteria,
        savings::SavingsSummary,
    },
};

/// Result of one upload attempt.
///
/// `Duplicate` is a successful outcome: the server recorded the logical
/// upload as a reference to an already-stored object instead of new bytes.
/// Callers match on the variant; raw HTTP status codes never leak out.
#[derive(Debug)]
pub enum UploadOutcome {
    Created(FileRecord),
    Duplicate {
        message: String,
        existing_file_id: String,
    },
    Failed(ApiError),
}

/// Client-side port onto the file service's HTTP contract.
///
/// Implementations do no caching; the listing cache belongs to the List
/// Controller.
#[async_trait]
pub trait FileApi: Send + Sync {
    async fn upload(&self, file: &FileData) -> UploadOutcome;
    async fn list(&self, filters: &FilterCriteria) -> Result<Vec<FileRecord>, ApiError>;
    async fn remove(&self, id: &str) -> Result<(), ApiError>;
    /// Fetches raw content for a client-side save. Failures map to the
    /// download-specific error variant, distinct from list/upload errors.
    async fn fetch_download_blob(&self, url: &str) -> Result<Vec<u8>, ApiError>;
    async fn fetch_savings(&self) -> Result<SavingsSummary, ApiError>;
}

/// Destination for downloaded content; the host environment decides what
/// "saving" a blob means.
#[async_trait]
pub trait BlobSink: Send + Sync {
    async fn save(&self, display_name: &str, content: &[u8]) -> Result<(), ApiError>;
}
