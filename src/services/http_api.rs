use async_trait::async_trait;
use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use tracing::warn;

use crate::{
    application::{
        api::{FileApi, UploadOutcome},
        error::ApiError,
    },
    domain::models::{
        file::{FileData, FileRecord},
        filter::FilterCriteria,
        savings::SavingsSummary,
    },
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Body the server sends with a 409 when the uploaded content matches an
/// already-stored file. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct DuplicateBody {
    message: String,
    duplicate_file_id: String,
}

/// The three body shapes the listing endpoint produces: a bare array, a
/// `{detail}` object standing in for "no results", or a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody {
    Records(Vec<FileRecord>),
    Paginated { results: Vec<FileRecord> },
    Detail { detail: String },
}

/// Reqwest-backed implementation of the file service contract.
pub struct HttpFileApi {
    client: Client,
    base_url: String,
}

impl HttpFileApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn files_url(&self) -> String {
        format!("{}/files/", self.base_url)
    }

    /// Record `file` references may be server-relative (`/media/...`);
    /// resolve those against the base URL's origin.
    fn resolve_content_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return reference.to_string();
        }
        let origin = reqwest::Url::parse(&self.base_url)
            .ok()
            .and_then(|url| {
                let host = url.host_str()?.to_string();
                Some(match url.port() {
                    Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
                    None => format!("{}://{}", url.scheme(), host),
                })
            })
            .unwrap_or_else(|| self.base_url.clone());
        format!("{}/{}", origin, reference.trim_start_matches('/'))
    }
}

#[async_trait]
impl FileApi for HttpFileApi {
    async fn upload(&self, file: &FileData) -> UploadOutcome {
        let part = match multipart::Part::bytes(file.content.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.mime_type)
        {
            Ok(part) => part,
            Err(e) => {
                return UploadOutcome::Failed(ApiError::Transport(format!(
                    "Invalid MIME type {}: {}",
                    file.mime_type, e
                )))
            }
        };
        let form = multipart::Form::new().part("file", part);

        let response = match self
            .client
            .post(self.files_url())
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return UploadOutcome::Failed(e.into()),
        };

        let status = response.status();
        if status.is_success() {
            return match response.json::<FileRecord>().await {
                Ok(record) => UploadOutcome::Created(record),
                Err(e) => UploadOutcome::Failed(ApiError::MalformedResponse(format!(
                    "Upload response: {}",
                    e
                ))),
            };
        }
        if status == StatusCode::CONFLICT {
            return match response.json::<DuplicateBody>().await {
                Ok(body) => UploadOutcome::Duplicate {
                    message: body.message,
                    existing_file_id: body.duplicate_file_id,
                },
                Err(e) => UploadOutcome::Failed(ApiError::MalformedResponse(format!(
                    "Duplicate response: {}",
                    e
                ))),
            };
        }

        let body = response.text().await.unwrap_or_default();
        UploadOutcome::Failed(ApiError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn list(&self, filters: &FilterCriteria) -> Result<Vec<FileRecord>, ApiError> {
        let response = self
            .client
            .get(self.files_url())
            .query(&filters.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: ListBody = response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(format!("List response: {}", e)))?;

        Ok(match body {
            ListBody::Records(records) => records,
            ListBody::Paginated { results } => results,
            ListBody::Detail { detail } => {
                // The server uses this shape for "no results", but it can
                // also carry an authorization failure. Keep the empty-list
                // contract and leave a trace of the message.
                warn!("List endpoint answered with a detail message, treating as empty: {detail}");
                Vec::new()
            }
        })
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/files/{}/", self.base_url, id);
        let response = self.client.delete(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn fetch_download_blob(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let target = self.resolve_content_url(url);
        let response = self
            .client
            .get(&target)
            .send()
            .await
            .map_err(|e| ApiError::Download(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::Download(format!(
                "Status {} for {}",
                response.status(),
                target
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Download(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn fetch_savings(&self) -> Result<SavingsSummary, ApiError> {
        let url = format!("{}/files/total_saving_size/", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SavingsSummary>()
            .await
            .map_err(|e| ApiError::MalformedResponse(format!("Savings response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_on_the_base_url_is_normalized() {
        let api = HttpFileApi::new("http://localhost:8000/api/");
        assert_eq!(api.files_url(), "http://localhost:8000/api/files/");
    }

    #[test]
    fn absolute_content_urls_pass_through() {
        let api = HttpFileApi::new("http://localhost:8000/api");
        assert_eq!(
            api.resolve_content_url("http://cdn.example.com/media/a.txt"),
            "http://cdn.example.com/media/a.txt"
        );
    }

    #[test]
    fn relative_content_urls_resolve_against_the_origin() {
        let api = HttpFileApi::new("http://localhost:8000/api");
        assert_eq!(
            api.resolve_content_url("/media/a.txt"),
            "http://localhost:8000/media/a.txt"
        );
    }
}
