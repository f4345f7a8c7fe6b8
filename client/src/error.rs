//! Error types for the submission client.

use std::fmt;
use thiserror::Error;

/// Failure of one request/response cycle against the prediction endpoint.
///
/// Every variant renders the same message in the result region; the kinds
/// only matter for logging and callers that want diagnostics.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("endpoint answered with status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid prediction: {0}")]
    InvalidResponse(String),

    #[error("could not render result: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Status,
    Parse,
    Render,
}

impl SubmissionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmissionError::Network(_) => ErrorKind::Network,
            SubmissionError::Status(_) => ErrorKind::Status,
            SubmissionError::Parse(_) | SubmissionError::InvalidResponse(_) => ErrorKind::Parse,
            SubmissionError::Render(_) => ErrorKind::Render,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Network => "network",
            ErrorKind::Status => "status",
            ErrorKind::Parse => "parse",
            ErrorKind::Render => "render",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid endpoint url {0:?}: {1}")]
    InvalidUrl(String, #[source] url::ParseError),

    #[error("could not build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("{var} must be {expected} (got {value:?})")]
    InvalidVar {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("expected campo=valor, got {0:?}")]
    MalformedPair(String),

    #[error("empty field name in {0:?}")]
    EmptyName(String),

    #[error("argument is not valid UTF-8: {0:?}")]
    NotUtf8(String),
}
