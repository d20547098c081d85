//! Lyrics model and a small TTL cache
//!
//! Lyrics are fetched per track and kept for a while so skipping back and
//! forth does not refetch them. The next queue slot is prefetched while the
//! current track plays.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::time::Instant;

/// One displayed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Offset from the start of the track (synced lyrics only)
    pub start: Option<Duration>,
    pub text: String,
}

/// Lyrics of one track
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Lyrics {
    pub lines: Vec<LyricLine>,

    /// Whether line offsets can drive a karaoke-style display
    pub synced: bool,
}

impl Lyrics {
    /// Build lyrics from raw `(offset_ms, value)` pairs
    ///
    /// A value containing line breaks becomes several lines sharing the same
    /// offset.
    pub fn from_timed_lines<I, S>(lines: I, synced: bool) -> Self
    where
        I: IntoIterator<Item = (Option<u64>, S)>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .flat_map(|(start_ms, value)| {
                let start = start_ms.map(Duration::from_millis);
                value
                    .as_ref()
                    .split('\n')
                    .map(|part| LyricLine {
                        start,
                        text: part.to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Self { lines, synced }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the line being sung at `position`
    ///
    /// The last line whose offset is at or before `position`. Always `None`
    /// for unsynced lyrics.
    pub fn active_line(&self, position: Duration) -> Option<usize> {
        if !self.synced {
            return None;
        }
        self.lines
            .iter()
            .rposition(|line| line.start.is_some_and(|start| start <= position))
    }
}

/// LRU cache of lyrics with a freshness window
///
/// Entries older than the TTL are treated as missing.
#[derive(Debug)]
pub struct LyricsCache {
    entries: LruCache<String, (Instant, Lyrics)>,
    ttl: Duration,
}

impl LyricsCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    /// Fresh lyrics for a track
    pub fn get(&mut self, track_id: &str) -> Option<&Lyrics> {
        let fresh = self
            .entries
            .peek(track_id)
            .is_some_and(|(stored, _)| stored.elapsed() < self.ttl);

        if !fresh {
            self.entries.pop(track_id);
            return None;
        }
        self.entries.get(track_id).map(|(_, lyrics)| lyrics)
    }

    /// Whether a fresh entry exists, without touching recency
    pub fn contains(&self, track_id: &str) -> bool {
        self.entries
            .peek(track_id)
            .is_some_and(|(stored, _)| stored.elapsed() < self.ttl)
    }

    pub fn insert(&mut self, track_id: impl Into<String>, lyrics: Lyrics) {
        self.entries.put(track_id.into(), (Instant::now(), lyrics));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
