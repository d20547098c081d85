//! Types for Subsonic API responses.
//!
//! Field names follow the JSON flavour of the REST API (camelCase). Every
//! optional attribute is `Option` or defaulted, since servers differ in
//! what they send.

use meloman_playback::{Lyrics, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for connecting to a Subsonic server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
    pub username: String,
    /// `md5(password + salt)`
    pub token: String,
    pub salt: String,
}

impl ServerConfig {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        token: impl Into<String>,
        salt: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            token: token.into(),
            salt: salt.into(),
        }
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// Outer JSON object of every response
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(rename = "subsonic-response")]
    pub response: ResponseBody<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseBody<T> {
    pub status: ResponseStatus,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(flatten)]
    pub payload: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ResponseStatus {
    Ok,
    Failed,
}

/// Error object of a failed response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiError {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Payload of responses that carry nothing (ping, star, scrobble)
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Empty {}

// =============================================================================
// Library
// =============================================================================

/// A song (`Child` in the API reference)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
    /// Seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub track: Option<u32>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub bit_rate: Option<u32>,
    /// Timestamp when starred
    #[serde(default)]
    pub starred: Option<String>,
}

impl From<Song> for Track {
    fn from(song: Song) -> Self {
        Track {
            id: song.id,
            title: song.title,
            artist: song.artist.unwrap_or_else(|| "Unknown Artist".to_string()),
            album: song.album.unwrap_or_default(),
            duration: Duration::from_secs(song.duration.unwrap_or(0)),
            cover_art: song.cover_art,
        }
    }
}

/// An album (`AlbumID3`), with songs when fetched through `getAlbum`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Some servers send `title` instead of `name`
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub song_count: Option<u32>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub starred: Option<String>,
    #[serde(default)]
    pub song: Vec<Song>,
}

impl Album {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.title.as_deref().unwrap_or_default()
        } else {
            &self.name
        }
    }

    /// The album's songs as playable tracks, in disc order
    pub fn tracks(&self) -> Vec<Track> {
        self.song.iter().cloned().map(Track::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub album_count: Option<u32>,
    #[serde(default)]
    pub starred: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub song_count: Option<u32>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub cover_art: Option<String>,
    /// Songs, only present on `getPlaylist`
    #[serde(default)]
    pub entry: Vec<Song>,
}

/// Result of `search3`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, rename = "artist")]
    pub artists: Vec<Artist>,
    #[serde(default, rename = "album")]
    pub albums: Vec<Album>,
    #[serde(default, rename = "song")]
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub scrobbling_enabled: bool,
    #[serde(default)]
    pub admin_role: bool,
    #[serde(default)]
    pub stream_role: bool,
}

// =============================================================================
// Lyrics
// =============================================================================

/// Result of `getLyricsBySongId` (OpenSubsonic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsList {
    #[serde(default)]
    pub structured_lyrics: Vec<StructuredLyrics>,
}

impl LyricsList {
    /// First lyrics set with at least one line
    pub fn into_lyrics(self) -> Option<Lyrics> {
        self.structured_lyrics
            .into_iter()
            .find(|set| !set.line.is_empty())
            .map(|set| {
                Lyrics::from_timed_lines(
                    set.line.into_iter().map(|line| (line.start, line.value)),
                    set.synced,
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredLyrics {
    #[serde(default)]
    pub display_artist: Option<String>,
    #[serde(default)]
    pub display_title: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub synced: bool,
    #[serde(default)]
    pub line: Vec<StructuredLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredLine {
    /// Milliseconds from the start of the song
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub value: String,
}

// =============================================================================
// Payload wrappers
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlbumListPayload {
    #[serde(default, rename = "albumList2")]
    pub album_list: Option<AlbumList>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlbumList {
    #[serde(default)]
    pub album: Vec<Album>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArtistsPayload {
    #[serde(default)]
    pub artists: Option<ArtistIndexes>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArtistIndexes {
    #[serde(default)]
    pub index: Vec<ArtistIndex>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArtistIndex {
    #[serde(default)]
    pub artist: Vec<Artist>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlbumPayload {
    #[serde(default)]
    pub album: Option<Album>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchPayload {
    #[serde(default, rename = "searchResult3")]
    pub search_result: Option<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RandomSongsPayload {
    #[serde(default, rename = "randomSongs")]
    pub random_songs: Option<SongList>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SongList {
    #[serde(default)]
    pub song: Vec<Song>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlaylistsPayload {
    #[serde(default)]
    pub playlists: Option<PlaylistList>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlaylistList {
    #[serde(default)]
    pub playlist: Vec<Playlist>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlaylistPayload {
    #[serde(default)]
    pub playlist: Option<Playlist>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserPayload {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LyricsPayload {
    #[serde(default, rename = "lyricsList")]
    pub lyrics_list: Option<LyricsList>,
}
