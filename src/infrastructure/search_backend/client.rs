// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the reverse image search backend.
//!
//! All methods are `async` and meant to be wrapped in `Task::perform` by the
//! caller; the client is cheap to clone.

use super::wire;
use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::domain::search::{ImageResult, SearchQuery};
use crate::error::{Error, Result};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

const USER_AGENT: &str = concat!("SearchLens/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    /// Creates a client for the backend at `base_url` (without trailing `/`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// URL serving the full image stored at `path` on the backend host.
    #[must_use]
    pub fn image_url(&self, path: &str) -> String {
        format!("{}/image/{}", self.base_url, urlencoding::encode(path))
    }

    /// URL of a server-relative resource such as a thumbnail.
    #[must_use]
    pub fn resource_url(&self, relative: &str) -> String {
        format!("{}/{}", self.base_url, relative.trim_start_matches('/'))
    }

    #[must_use]
    pub fn select_folder_url(&self) -> String {
        format!("{}/select-folder", self.base_url)
    }

    /// Uploads the query image and returns the ranked matches.
    pub async fn search(&self, query: SearchQuery) -> Result<Vec<ImageResult>> {
        let bytes = tokio::fs::read(&query.image_path).await?;
        let file_name = query
            .image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "query".to_string());

        let form = Form::new()
            .part("query", Part::bytes(bytes).file_name(file_name))
            .text("folder", query.folder.clone())
            .text("min_score", query.min_score.value().to_string())
            .text("batch_size", query.batch_size.value().to_string());

        log::info!(
            "searching {} (min_score={}, batch_size={})",
            query.folder,
            query.min_score.value(),
            query.batch_size.value()
        );

        let response = self
            .http
            .post(self.search_url())
            .multipart(form)
            .send()
            .await?;
        let body = successful_body(response).await?;
        let results = wire::parse_search_response(&body)?;

        log::info!("search returned {} results", results.len());
        Ok(results)
    }

    /// Downloads the encoded bytes of the image stored at `path`.
    pub async fn fetch_image(&self, path: String) -> Result<Vec<u8>> {
        self.fetch_bytes(self.image_url(&path)).await
    }

    /// Downloads the thumbnail of `result`, or the full image when the
    /// backend did not produce one.
    pub async fn fetch_thumbnail(&self, result: ImageResult) -> Result<Vec<u8>> {
        let url = match &result.thumbnail {
            Some(relative) => self.resource_url(relative),
            None => self.image_url(&result.path),
        };
        self.fetch_bytes(url).await
    }

    /// Asks the backend host to show its native folder picker.
    pub async fn select_folder(&self) -> Result<Option<String>> {
        let response = self.http.get(self.select_folder_url()).send().await?;
        let body = successful_body(response).await?;
        wire::parse_folder_response(&body)
    }

    async fn fetch_bytes(&self, url: String) -> Result<Vec<u8>> {
        log::debug!("fetching {url}");
        let response = self.http.get(url).send().await?;
        successful_body(response).await
    }
}

/// Returns the body of a 2xx response, or an [`Error::Search`] carrying the
/// backend's message.
async fn successful_body(response: reqwest::Response) -> Result<Vec<u8>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.bytes().await?.to_vec());
    }

    let text = response.text().await.unwrap_or_default();
    let message = wire::error_message(&text);
    log::warn!("backend answered {status}: {message}");
    Err(Error::Search {
        status: status.as_u16(),
        message,
    })
}
