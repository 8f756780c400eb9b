use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    application::{
        api::{FileApi, UploadOutcome},
        controllers::savings::SavingsTracker,
        error::UploadStateError,
        signal::InvalidationSignal,
    },
    domain::{format::format_file_size, models::file::FileData},
};

/// Where the upload flow currently stands.
///
/// A successful upload is reported through the returned [`UploadOutcome`];
/// the machine goes straight back to `Idle` once the success effects have
/// run. Notice phases stay visible until the next file selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Selected,
    Uploading,
    DuplicateNotice {
        message: String,
        existing_file_id: String,
    },
    ErrorNotice {
        message: String,
    },
}

/// Owns the selected-file state and the upload state machine.
///
/// Terminal effects: a `Created` outcome clears the selection, bumps the
/// shared listing invalidation and refreshes savings; a `Duplicate` outcome
/// refreshes savings only (the server may still have recorded a reference);
/// a `Failed` outcome changes nothing beyond the visible notice.
pub struct UploadController {
    api: Arc<dyn FileApi>,
    savings: Arc<SavingsTracker>,
    invalidation: InvalidationSignal,
    phase: UploadPhase,
    selected: Option<FileData>,
}

impl UploadController {
    pub fn new(
        api: Arc<dyn FileApi>,
        savings: Arc<SavingsTracker>,
        invalidation: InvalidationSignal,
    ) -> Self {
        Self {
            api,
            savings,
            invalidation,
            phase: UploadPhase::Idle,
            selected: None,
        }
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn selected(&self) -> Option<&FileData> {
        self.selected.as_ref()
    }

    /// The user-visible notice message, if the last attempt left one.
    pub fn notice(&self) -> Option<&str> {
        match &self.phase {
            UploadPhase::DuplicateNotice { message, .. } => Some(message),
            UploadPhase::ErrorNotice { message } => Some(message),
            _ => None,
        }
    }

    /// Stores the file to submit and clears any notice left over from the
    /// previous attempt. Rejected while an upload is in flight.
    pub fn select_file(&mut self, file: FileData) -> Result<(), UploadStateError> {
        if self.phase == UploadPhase::Uploading {
            return Err(UploadStateError::UploadInFlight);
        }
        self.selected = Some(file);
        self.phase = UploadPhase::Selected;
        Ok(())
    }

    /// Submits the selected file. Legal only from `Selected`; calling it
    /// with nothing selected is a local validation error and never reaches
    /// the network.
    pub async fn submit(&mut self) -> Result<UploadOutcome, UploadStateError> {
        if self.phase == UploadPhase::Uploading {
            return Err(UploadStateError::UploadInFlight);
        }
        if self.phase != UploadPhase::Selected {
            return Err(UploadStateError::NoFileSelected);
        }
        let Some(file) = self.selected.take() else {
            return Err(UploadStateError::NoFileSelected);
        };

        self.phase = UploadPhase::Uploading;
        let outcome = self.api.upload(&file).await;

        match &outcome {
            UploadOutcome::Created(record) => {
                info!("Upload accepted, new record {}", record.id);
                self.phase = UploadPhase::Idle;
                self.invalidation.notify();
                self.savings.refresh().await;
            }
            UploadOutcome::Duplicate {
                message,
                existing_file_id,
            } => {
                info!(
                    "Upload deduplicated against existing file {}",
                    existing_file_id
                );
                self.phase = UploadPhase::DuplicateNotice {
                    message: format!(
                        "{} (file size: {})",
                        message,
                        format_file_size(file.size())
                    ),
                    existing_file_id: existing_file_id.clone(),
                };
                self.selected = Some(file);
                self.savings.refresh().await;
            }
            UploadOutcome::Failed(reason) => {
                warn!("Upload failed: {}", reason);
                self.phase = UploadPhase::ErrorNotice {
                    message: reason.to_string(),
                };
                self.selected = Some(file);
            }
        }

        Ok(outcome)
    }
}
