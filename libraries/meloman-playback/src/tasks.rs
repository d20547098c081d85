//! Fire-and-forget side tasks of the player
//!
//! Timers, artwork decoding and lyric fetches run on the tokio runtime and
//! report back through a single notice channel. The player applies notices
//! on its own task, after checking they still belong to the live bind.

use crate::accent::Accent;
use crate::gateway::MediaGateway;
use crate::lyrics::Lyrics;
use crate::output::{OutputEvent, ResourceId};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// Identity of one bind; increases with every bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindToken(pub(crate) u64);

impl fmt::Display for BindToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bind-{}", self.0)
    }
}

/// Message from a resource or a side task to the player
#[derive(Debug, Clone)]
pub enum Notice {
    /// Runtime event of a bound resource
    Output {
        resource: ResourceId,
        event: OutputEvent,
    },

    /// Time for the single automatic start retry
    RetryStart { token: BindToken },

    /// Time for the "listened enough" progress notification
    ProgressDue { token: BindToken },

    /// Accent colour derived for a bind
    Accent { token: BindToken, accent: Accent },

    /// Lyrics fetch finished (`None` when the track has none)
    Lyrics {
        track_id: String,
        lyrics: Option<Lyrics>,
    },
}

/// Send `notice` after `delay`, measured from now
pub(crate) fn spawn_timer(tx: UnboundedSender<Notice>, delay: Duration, notice: Notice) {
    let sleep = tokio::time::sleep(delay);
    tokio::spawn(async move {
        sleep.await;
        let _ = tx.send(notice);
    });
}

/// Fetch artwork and derive its accent colour; falls back to the default
pub(crate) fn spawn_accent(
    tx: UnboundedSender<Notice>,
    gateway: Arc<dyn MediaGateway>,
    token: BindToken,
    art_ref: String,
    size: u32,
    step: u32,
) {
    tokio::spawn(async move {
        let accent = match gateway.fetch_artwork(&art_ref, size).await {
            Ok(bytes) => {
                match tokio::task::spawn_blocking(move || Accent::from_image_bytes(&bytes, step))
                    .await
                {
                    Ok(Ok(accent)) => accent,
                    Ok(Err(e)) => {
                        warn!(art_ref = %art_ref, error = %e, "Failed to derive accent colour");
                        Accent::default()
                    }
                    Err(e) => {
                        warn!(art_ref = %art_ref, error = %e, "Accent task aborted");
                        Accent::default()
                    }
                }
            }
            Err(e) => {
                warn!(art_ref = %art_ref, error = %e, "Failed to fetch artwork");
                Accent::default()
            }
        };

        debug!(token = %token, color = %accent.color, "Accent colour ready");
        let _ = tx.send(Notice::Accent { token, accent });
    });
}

/// Fetch lyrics for a track
pub(crate) fn spawn_lyrics(
    tx: UnboundedSender<Notice>,
    gateway: Arc<dyn MediaGateway>,
    track_id: String,
) {
    tokio::spawn(async move {
        let lyrics = match gateway.fetch_lyrics(&track_id).await {
            Ok(lyrics) => Some(lyrics),
            Err(e) => {
                debug!(track_id = %track_id, error = %e, "No lyrics");
                None
            }
        };
        let _ = tx.send(Notice::Lyrics { track_id, lyrics });
    });
}

/// Report a finished listen; failures are only logged
pub(crate) fn spawn_progress_report(gateway: Arc<dyn MediaGateway>, track_id: String) {
    tokio::spawn(async move {
        match gateway.notify_playback_progress(&track_id, true).await {
            Ok(()) => debug!(track_id = %track_id, "Playback progress reported"),
            Err(e) => warn!(track_id = %track_id, error = %e, "Failed to report playback progress"),
        }
    });
}
