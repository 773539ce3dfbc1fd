// SPDX-License-Identifier: MPL-2.0
//! JSON bodies exchanged with the search backend.

use crate::domain::search::{filename_from_path, ImageResult, Score};
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    path: String,
    score: f32,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl From<ResultEntry> for ImageResult {
    fn from(entry: ResultEntry) -> Self {
        let filename = entry
            .filename
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| filename_from_path(&entry.path));

        ImageResult {
            filename,
            description: entry.description.filter(|text| !text.trim().is_empty()),
            thumbnail: entry.thumbnail,
            score: Score::new(entry.score),
            width: entry.width.unwrap_or(0),
            height: entry.height.unwrap_or(0),
            path: entry.path,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FolderResponse {
    folder_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: serde_json::Value,
}

/// Parses a `/search` response body into ranked results, keeping the
/// backend's order.
pub fn parse_search_response(body: &[u8]) -> Result<Vec<ImageResult>> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    Ok(response.results.into_iter().map(ImageResult::from).collect())
}

/// Parses a `/select-folder` response body. `None` means the user cancelled.
pub fn parse_folder_response(body: &[u8]) -> Result<Option<String>> {
    let response: FolderResponse = serde_json::from_slice(body)?;
    Ok(response.folder_path.filter(|path| !path.is_empty()))
}

/// Extracts a human readable message from an error body.
///
/// Uses the `detail` field when the body is a JSON error, the trimmed body
/// otherwise.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorResponse { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}
