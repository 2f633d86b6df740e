use std::path::PathBuf;

use thiserror::Error;

/// Exit status for a missing `-url` (after usage has been printed)
pub const USAGE_EXIT_CODE: i32 = 1;

/// Exit status for every other fatal error
pub const FATAL_EXIT_CODE: i32 = 1;

/// Every way a single invocation can fail.
///
/// A response body that is not JSON is not listed here: it is reported on
/// stdout and the run still succeeds.
#[derive(Debug, Error)]
pub enum HttpreqError {
    #[error("missing required flag -url")]
    MissingUrl,

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Could not read file '{}': {source}", .path.display())]
    BodyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid auth credentials '{0}'")]
    InvalidAuth(String),

    #[error("Invalid header '{header}': {reason}")]
    InvalidHeader { header: String, reason: String },

    #[error("Invalid method '{0}'")]
    InvalidMethod(String),

    #[error("Error creating HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Error making request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Error reading response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("Error writing output: {0}")]
    Output(#[from] std::io::Error),
}

impl HttpreqError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            HttpreqError::MissingUrl => USAGE_EXIT_CODE,
            _ => FATAL_EXIT_CODE,
        }
    }
}

pub type Result<T> = std::result::Result<T, HttpreqError>;
