// SPDX-License-Identifier: MPL-2.0
//! Application-wide error type.
//!
//! The carousel itself never fails; these errors come from the collaborators
//! around it (configuration files, the search backend, file dialogs) and are
//! surfaced to the user as a localized status line.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// Transport-level failure (connection refused, timeout, malformed body).
    #[error("HTTP Error: {0}")]
    Http(String),

    /// The search backend answered with a non-success status.
    #[error("Search failed with status {status}: {message}")]
    Search { status: u16, message: String },

    #[error("Dialog Error: {0}")]
    Dialog(String),
}

impl Error {
    /// Returns the i18n message key used for the status line.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Http(_) => "error-search-unreachable",
            Error::Search { .. } => "error-search-failed",
            Error::Dialog(_) => "error-dialog",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::Search {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Error::Http(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Http(format!("invalid response body: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn search_error_display_includes_status() {
        let err = Error::Search {
            status: 500,
            message: "model not loaded".into(),
        };
        let text = format!("{}", err);
        assert!(text.contains("500"));
        assert!(text.contains("model not loaded"));
    }

    #[test]
    fn json_error_maps_to_http_variant() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse_error.into();
        assert!(matches!(err, Error::Http(message) if message.contains("invalid response")));
    }

    #[test]
    fn i18n_keys_are_distinct_per_variant() {
        let keys = [
            Error::Io(String::new()).i18n_key(),
            Error::Config(String::new()).i18n_key(),
            Error::Http(String::new()).i18n_key(),
            Error::Search {
                status: 404,
                message: String::new(),
            }
            .i18n_key(),
            Error::Dialog(String::new()).i18n_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
