//! Core types for queue and transport management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Track information for queue management
///
/// Contains all metadata needed for playback and display. A track is never
/// mutated once it has been placed in the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track identifier on the media server
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Track duration
    pub duration: Duration,

    /// Cover art reference on the media server (optional)
    pub cover_art: Option<String>,
}

/// Identity of one queue slot
///
/// The same track may sit in several slots; the slot id tells them apart and
/// is what "the same logical track" means across queue mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub(crate) u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot-{}", self.0)
    }
}

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No resource bound
    Idle,

    /// Resource bound, starting
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track (or loaded but not started)
    Paused,

    /// Reached the natural end of the track
    Ended,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

/// Algorithm used when shuffle is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleAlgorithm {
    /// Pure random shuffle
    #[default]
    Random,

    /// Smart shuffle (distribute artists)
    Smart,
}

/// Point-in-time view of the transport, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSnapshot {
    /// Track bound to the output (may lag the queue during a load)
    pub loaded_track_id: Option<String>,
    pub state: PlaybackState,
    pub is_playing: bool,
    pub current_time: Duration,
    pub duration: Duration,
    /// Volume preference (0-100)
    pub volume: u8,
}

/// Configuration for the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 70)
    pub volume: u8,

    /// Shuffle algorithm (default: Random)
    pub shuffle: ShuffleAlgorithm,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Delay before the single automatic start retry (default: 250ms)
    pub start_retry_delay_ms: u64,

    /// Elapsed time after which "previous" restarts the current track (default: 3s)
    pub restart_threshold_ms: u64,

    /// Upper bound for the "listened enough" progress notification (default: 30s)
    pub progress_notify_cap_secs: u64,

    /// How long fetched lyrics stay fresh (default: 10 minutes)
    pub lyrics_cache_ttl_secs: u64,

    /// Maximum number of cached lyric sets (default: 64)
    pub lyrics_cache_capacity: usize,

    /// Artwork size requested for accent colour extraction (default: 300)
    pub artwork_size: u32,

    /// Pixel sampling stride for accent colour extraction (default: 5)
    pub accent_sample_step: u32,
}

impl PlaybackConfig {
    pub fn start_retry_delay(&self) -> Duration {
        Duration::from_millis(self.start_retry_delay_ms)
    }

    pub fn restart_threshold(&self) -> Duration {
        Duration::from_millis(self.restart_threshold_ms)
    }

    pub fn lyrics_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.lyrics_cache_ttl_secs)
    }

    /// Delay of the progress notification: `min(cap, duration / 2)`
    pub fn progress_notify_delay(&self, duration: Duration) -> Duration {
        (duration / 2).min(Duration::from_secs(self.progress_notify_cap_secs))
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 70,
            shuffle: ShuffleAlgorithm::Random,
            repeat: RepeatMode::Off,
            start_retry_delay_ms: 250,
            restart_threshold_ms: 3_000,
            progress_notify_cap_secs: 30,
            lyrics_cache_ttl_secs: 600,
            lyrics_cache_capacity: 64,
            artwork_size: 300,
            accent_sample_step: 5,
        }
    }
}
