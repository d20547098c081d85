//! Media gateway contract
//!
//! The player needs a handful of things from the media server: where to
//! stream a track from, where its artwork lives, lyrics, artwork bytes, and a
//! way to report listening progress. The Subsonic client implements this.

use crate::error::Result;
use crate::lyrics::Lyrics;
use async_trait::async_trait;
use url::Url;

#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Stream location for a track (pure, deterministic)
    fn stream_location(&self, track_id: &str) -> Url;

    /// Artwork location for a cover art reference at a given size (pure, deterministic)
    fn artwork_location(&self, art_ref: &str, size: u32) -> Url;

    /// Report listening progress
    ///
    /// `completed = false` announces "now playing", `true` submits a
    /// finished listen. Callers never wait on the outcome.
    async fn notify_playback_progress(&self, track_id: &str, completed: bool) -> Result<()>;

    /// Lyrics for a track; an error means "no lyrics"
    async fn fetch_lyrics(&self, track_id: &str) -> Result<Lyrics>;

    /// Raw artwork bytes (any common image format)
    async fn fetch_artwork(&self, art_ref: &str, size: u32) -> Result<Vec<u8>>;
}
