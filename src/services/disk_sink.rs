use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::application::{api::BlobSink, error::ApiError};

/// Saves downloaded content into a directory, one file per blob, named by
/// the record's original filename.
pub struct DiskSink {
    directory: PathBuf,
}

impl DiskSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl BlobSink for DiskSink {
    async fn save(&self, display_name: &str, content: &[u8]) -> Result<(), ApiError> {
        let path = self.directory.join(display_name);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| ApiError::Download(format!("Cannot write {}: {}", path.display(), e)))?;
        info!("Saved {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}
