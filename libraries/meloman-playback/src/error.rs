//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Seek target outside `[0, duration]`
    #[error("Invalid seek position: {0}s")]
    InvalidSeekPosition(f64),

    /// The output refused to start the resource
    #[error("Start rejected: {0}")]
    StartRejected(String),

    /// Audio output error (bind, seek)
    #[error("Audio output error: {0}")]
    Output(String),

    /// Media gateway error
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Artwork could not be decoded
    #[error("Artwork error: {0}")]
    Artwork(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
