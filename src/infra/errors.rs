// src/infra/errors.rs — Error types for cvscan

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvScanError {
    // Transport errors (request never produced a usable reply)
    #[error("Request to '{endpoint}' failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from '{endpoint}': {message}")]
    InvalidResponse { endpoint: String, message: String },

    // Application errors (server answered with success = false)
    #[error("{message}")]
    Api { message: String },

    #[error("Response from '{endpoint}' is missing '{field}'")]
    MissingField {
        endpoint: String,
        field: &'static str,
    },

    // Local checks, no request issued
    #[error("{0}")]
    Validation(String),

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Message shown when the server reports failure without saying why.
pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

impl CvScanError {
    /// Build an application error from the server's optional `error` field.
    pub fn api(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
        CvScanError::Api { message }
    }

    /// True when the server answered and reported the failure itself.
    pub fn is_application(&self) -> bool {
        matches!(self, CvScanError::Api { .. } | CvScanError::Validation(_))
    }

    /// User-facing alert text for a failed operation.
    ///
    /// Server-reported messages are shown verbatim after the prefix; anything
    /// else collapses into a generic retry hint.
    pub fn alert_text(&self, prefix: &str) -> String {
        match self {
            CvScanError::Api { message } => format!("{prefix}: {message}"),
            CvScanError::Validation(message) => message.clone(),
            _ => format!("{prefix}. Please try again later."),
        }
    }
}
