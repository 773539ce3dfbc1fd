// SPDX-License-Identifier: MPL-2.0
//! Adapter for the reverse image search HTTP backend.
//!
//! # Endpoints
//!
//! - `POST /search`: multipart upload of the query image with the folder,
//!   minimum score and batch size; answers with ranked results
//! - `GET /image/<url-encoded path>`: bytes of one result image
//! - `GET /select-folder`: folder picked with the backend host's native dialog

pub mod client;
pub mod wire;

pub use client::SearchClient;
