//! Playback events
//!
//! Event-based communication for UI synchronization. The player queues
//! events as state changes and the presentation layer drains them:
//! - State changes (loading/playing/paused/ended/idle)
//! - Track changes (on every bind)
//! - Position updates (as the output reports progress)
//! - Queue, volume, accent and lyrics updates

use crate::accent::Accent;
use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A new track was bound to the output
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previously bound track (if any)
        previous_track_id: Option<String>,
    },

    /// Position update, as reported by the output
    PositionUpdate {
        position_ms: u64,
        duration_ms: u64,
    },

    /// Volume preference changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// Queue contents or selection changed
    QueueChanged {
        length: usize,
        current_index: Option<usize>,
    },

    /// Accent colour for the current track is ready
    AccentChanged { accent: Accent },

    /// Lyrics for the current track are available
    LyricsReady { track_id: String },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Short event name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::StateChanged { .. } => "state_changed",
            Self::TrackChanged { .. } => "track_changed",
            Self::PositionUpdate { .. } => "position_update",
            Self::VolumeChanged { .. } => "volume_changed",
            Self::QueueChanged { .. } => "queue_changed",
            Self::AccentChanged { .. } => "accent_changed",
            Self::LyricsReady { .. } => "lyrics_ready",
            Self::Error { .. } => "error",
        }
    }
}
