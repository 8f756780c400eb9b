//! Client for a file-management service that deduplicates uploads
//! server-side. The HTTP contract is wrapped by [`services::HttpFileApi`];
//! the upload state machine and the filter-keyed listing cache live in
//! [`application::controllers`].

pub mod application;
pub mod domain;
pub mod services;

pub use application::{
    api::{BlobSink, FileApi, UploadOutcome},
    controllers::{
        list::ListController,
        savings::SavingsTracker,
        upload::{UploadController, UploadPhase},
    },
    error::{ApiError, UploadStateError},
    signal::InvalidationSignal,
};
pub use domain::{
    format::format_file_size,
    models::{
        file::{FileData, FileRecord},
        filter::FilterCriteria,
        savings::SavingsSummary,
    },
};
pub use services::{DiskSink, HttpFileApi, DEFAULT_BASE_URL};
