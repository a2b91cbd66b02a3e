//! Errors reported by translation backends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    /// The request could not be sent or the response could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status (quota, bad request)
    #[error("backend returned status {0}")]
    Status(u16),

    /// The response body did not have the expected shape
    #[error("unexpected backend response: {0}")]
    Parse(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The backend produced no translation for non-empty input
    #[error("backend returned an empty translation")]
    EmptyResponse,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TranslateError>;
