//! Error types for the Subsonic client.

use meloman_playback::PlaybackError;
use thiserror::Error;

/// Errors that can occur when talking to a Subsonic server.
#[derive(Error, Debug)]
pub enum SubsonicError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with `status = "failed"`
    #[error("Subsonic error {code}: {message}")]
    Api { code: i32, message: String },

    /// Non-success HTTP status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Credentials missing or rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl SubsonicError {
    /// Wrong username/password or token auth not supported
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::Api { code: 40 | 41, .. })
    }
}

impl From<SubsonicError> for PlaybackError {
    fn from(err: SubsonicError) -> Self {
        PlaybackError::Gateway(err.to_string())
    }
}

/// Result type for Subsonic client operations.
pub type Result<T> = std::result::Result<T, SubsonicError>;
