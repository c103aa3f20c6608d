//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` so a settled query can
//! hold on to its error while the page keeps rendering.

use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Transport or connectivity failure while talking to the portal backend.
    #[error("Network Error: {0}")]
    Network(Arc<reqwest::Error>),

    /// The backend answered with a non-success HTTP status.
    #[error("API Error: {status} from {url}")]
    Api {
        status: reqwest::StatusCode,
        url: String,
    },

    /// A query was built with `start` after `end`. Raised before anything is dispatched.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A date or period string did not match its expected format.
    #[error("Invalid date '{input}': expected {expected}")]
    InvalidDate {
        input: String,
        expected: &'static str,
    },

    /// The variable exists but the requested endpoint does not serve it.
    #[error("Unsupported variable for this query: {0}")]
    UnsupportedVariable(String),

    /// The response decoded but broke one of its shape invariants, or did not decode at all.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Any failure while fetching a download. The message is always user-facing.
    #[error("Download failed: {0}")]
    Download(String),

    /// The endpoint has no offline counterpart in the demo data provider.
    #[error("'{0}' is not available in offline mode")]
    Offline(&'static str),

    /// Error during JSON parsing (`serde_json`). Wrapped in Arc as serde_json::Error is not Clone.
    #[error("JSON Parsing Error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    /// Error while reading CSV download contents.
    #[error("CSV Error: {0}")]
    Csv(Arc<csv::Error>),

    /// Error related to accessing environment variables.
    #[error("Environment Error: {0}")]
    Env(#[from] std::env::VarError),

    /// A configuration value was present but could not be used.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Error specific to CLI logic or argument handling.
    #[error("CLI Error: {0}")]
    Cli(String),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    /// Error related to progress spinner templating (`indicatif`).
    #[error("Progress Style Template Error: {0}")]
    Template(Arc<indicatif::style::TemplateError>),
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<indicatif::style::TemplateError> for AppError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        AppError::Template(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(Arc::new(err))
    }
}
