use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one logical uploaded file, as reported by the server.
///
/// Records are immutable on this side of the wire: the client refetches the
/// listing instead of mutating a record in place. Unknown fields in the
/// server JSON are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub original_filename: String,
    /// MIME type recorded at upload time.
    pub file_type: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    /// Download URL or server-relative reference for the stored content.
    pub file: String,
}

/// A locally selected file awaiting upload.
#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String, mime_type: String) -> Self {
        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}
