//! Error types.
//!
//! `ConfigError` is the only error a caller ever sees (from construction
//! and option parsing). `SubmitError` stays inside the crate's submission
//! path and ends as a log line.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The endpoint is empty, unparseable, or not an http(s) URL
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// A filter pattern failed to compile
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Options JSON could not be parsed
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The collector answered outside 200..=299
    #[error("\"{url}\" is {status} {status_text}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
    },

    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// The report could not be serialized
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
