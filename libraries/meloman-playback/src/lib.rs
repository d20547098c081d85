//! Meloman - Playback Core
//!
//! Queue and transport management for the Meloman music client.
//!
//! This crate provides:
//! - Play queue with slot identity, shuffle (Random + Smart) and repeat (Off, All, One)
//! - Transport state machine (`Player`) binding one audio resource at a time
//! - Logarithmic volume preference (0-100%)
//! - Lyrics model with a TTL cache and prefetch of the next slot
//! - Accent colour derived from cover art
//!
//! # Architecture
//!
//! `meloman-playback` knows nothing about HTTP or audio decoding:
//! - The media server is reached through the [`MediaGateway`] trait
//! - Audio is produced by a platform [`AudioOutput`]
//! - Side tasks (timers, artwork, lyrics) run on tokio and report back
//!   through a notice channel the owner drains with [`Player::poll_notices`]
//!   or [`Player::next_notice`]
//!
//! # Example: Queue only
//!
//! ```rust
//! use meloman_playback::{Queue, RepeatMode, Track};
//! use std::time::Duration;
//!
//! let track = |id: &str| Track {
//!     id: id.to_string(),
//!     title: format!("Song {id}"),
//!     artist: "Artist".to_string(),
//!     album: "Album".to_string(),
//!     duration: Duration::from_secs(200),
//!     cover_art: None,
//! };
//!
//! let mut queue = Queue::new();
//! queue.replace(vec![track("a"), track("b")], 0);
//! queue.set_repeat(RepeatMode::All);
//!
//! assert!(queue.advance_to_next());
//! assert!(queue.advance_to_next());
//! assert_eq!(queue.current().unwrap().id, "a");
//! ```

mod accent;
mod error;
pub mod events;
mod gateway;
pub mod lyrics;
mod output;
mod player;
pub mod queue;
mod shuffle;
mod tasks;
pub mod types;
mod volume;

// Public exports
pub use accent::Accent;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use gateway::MediaGateway;
pub use lyrics::{LyricLine, Lyrics, LyricsCache};
pub use output::{AudioOutput, AudioResource, OutputEvent, OutputEvents, ResourceId};
pub use player::Player;
pub use queue::{Queue, QueueEntry};
pub use tasks::{BindToken, Notice};
pub use types::{
    PlaybackConfig, PlaybackState, RepeatMode, ShuffleAlgorithm, SlotId, Track,
    TransportSnapshot,
};
pub use volume::Volume;
