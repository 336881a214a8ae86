//! Error handling and custom error types
//!
//! Separates transport/service failures from responses that arrived intact
//! but carried nothing usable.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Network or service-level failure: connection errors, non-success
    /// status codes, or an envelope that could not be parsed.
    #[error("Remote service error{}: {message}", status_suffix(.status))]
    RemoteService {
        status: Option<u16>,
        message: String,
    },

    #[error("No image payload in response")]
    NoImagePayload,

    #[error("No text payload in response")]
    NoTextPayload,

    #[error("Malformed image encoding: {0}")]
    MalformedEncoding(String),

    #[error("Missing required input: {0}")]
    Precondition(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" (status {})", s))
        .unwrap_or_default()
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::RemoteService {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl Error {
    pub(crate) fn remote(message: impl Into<String>) -> Self {
        Error::RemoteService {
            status: None,
            message: message.into(),
        }
    }

    /// True for failures that happened before or during the round trip,
    /// as opposed to a valid response with an unexpected shape.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::RemoteService { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
