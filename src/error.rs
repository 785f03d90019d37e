//! Error types for the scr.im client.

use thiserror::Error;

/// Errors that can occur while generating a scr.im alias.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested alias is longer than the service accepts.
    #[error("alias is too long: {len} characters (maximum is {max})", max = crate::client::MAX_ALIAS_LEN)]
    AliasTooLong { len: usize },

    /// `generate` was called before an email address was set.
    #[error("no email address set")]
    MissingEmail,

    /// scr.im answers 200 even for application errors, so anything else means
    /// the service itself is down.
    #[error("scr.im is currently unavailable (HTTP {status})")]
    ServiceUnavailable { status: u16 },

    /// The response body is not the XML document we expect.
    #[error("could not parse scr.im's XML response: {body}, error: {details}")]
    XmlParse { body: String, details: String },

    /// The XML parsed, but `result` is neither a success nor an "already stored" notice.
    #[error("scr.im returned an unexpected result: {0}")]
    UnexpectedResult(String),

    /// scr.im answered for a different email than the one submitted.
    #[error("scr.im returned a URL for the wrong email (expected {expected}, got {actual})")]
    EmailMismatch { expected: String, actual: String },

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}
