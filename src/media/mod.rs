// SPDX-License-Identifier: MPL-2.0
//! Storage of result images fetched from the search backend.

pub mod image_cache;

pub use image_cache::ImageCache;

use crate::error::{Error, Result};
use image_rs::ImageReader;
use std::io::Cursor;

/// Reads the pixel size of an encoded image from its header.
///
/// The backend does not always report result dimensions; the carousel needs
/// them to size the active slide, so they are taken from the fetched bytes.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::Io(e.to_string()))?
        .into_dimensions()
        .map_err(|e| Error::Io(e.to_string()))
}

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image_rs::RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image_rs::ImageFormat::Png)
        .expect("encode png");
    bytes
}
