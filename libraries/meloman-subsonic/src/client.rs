//! Subsonic REST client.

use crate::auth::Credentials;
use crate::error::{Result, SubsonicError};
use crate::types::{
    Album, AlbumListPayload, AlbumPayload, Artist, ArtistsPayload, Empty, Envelope,
    LyricsList, LyricsPayload, Playlist, PlaylistPayload, PlaylistsPayload, RandomSongsPayload,
    ResponseStatus, SearchPayload, SearchResult, ServerConfig, Song, User, UserPayload,
};
use async_trait::async_trait;
use meloman_playback::{Lyrics, MediaGateway, PlaybackError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Page size of the album list request
const ALBUM_LIST_SIZE: u32 = 500;

/// Client for a Subsonic-compatible media server.
///
/// Credentials are fixed at construction; every request carries them as
/// query parameters.
///
/// # Example
///
/// ```ignore
/// use meloman_subsonic::{ServerConfig, SubsonicClient};
///
/// let config = ServerConfig::new("https://music.example.com", "alice", token, salt);
/// let client = SubsonicClient::new(config)?;
///
/// client.ping().await?;
/// for album in client.album_list().await? {
///     println!("{} - {}", album.artist.unwrap_or_default(), album.display_name());
/// }
/// ```
pub struct SubsonicClient {
    http: Client,
    base_url: String,
    rest_base: Url,
    credentials: Credentials,
}

impl SubsonicClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(SubsonicError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SubsonicError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let mut rest_base =
            Url::parse(&base_url).map_err(|e| SubsonicError::InvalidUrl(e.to_string()))?;
        rest_base
            .path_segments_mut()
            .map_err(|()| SubsonicError::InvalidUrl(base_url.clone()))?
            .pop_if_empty()
            .push("rest");

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Meloman/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            rest_base,
            credentials: Credentials::from_config(&config),
        })
    }

    /// Server URL without trailing slash.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Check that the server is reachable and accepts the credentials.
    pub async fn ping(&self) -> Result<()> {
        if !self.credentials.is_complete() {
            return Err(SubsonicError::AuthRequired);
        }

        let _: Empty = self.get("ping", &[]).await?;
        info!(url = %self.base_url, username = %self.username(), "Connected to server");
        Ok(())
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// All albums in alphabetical order, one entry per artist and title.
    ///
    /// Servers that index the same album from several folders return it more
    /// than once; duplicates are dropped by normalised artist and name.
    pub async fn album_list(&self) -> Result<Vec<Album>> {
        let size = ALBUM_LIST_SIZE.to_string();
        let payload: AlbumListPayload = self
            .get(
                "getAlbumList2",
                &[("type", "alphabeticalByName"), ("size", size.as_str())],
            )
            .await?;

        let albums = payload.album_list.map(|list| list.album).unwrap_or_default();
        let unique = dedupe_albums(albums);
        debug!(albums = unique.len(), "Fetched album list");
        Ok(unique)
    }

    /// All artists, flattened out of the alphabetical index.
    pub async fn artists(&self) -> Result<Vec<Artist>> {
        let payload: ArtistsPayload = self.get("getArtists", &[]).await?;
        Ok(payload
            .artists
            .map(|artists| {
                artists
                    .index
                    .into_iter()
                    .flat_map(|index| index.artist)
                    .collect()
            })
            .unwrap_or_default())
    }

    /// One album with its songs.
    pub async fn album(&self, id: &str) -> Result<Album> {
        let payload: AlbumPayload = self.get("getAlbum", &[("id", id)]).await?;
        payload
            .album
            .ok_or_else(|| SubsonicError::ParseError(format!("Response has no album {}", id)))
    }

    /// Search artists, albums and songs.
    pub async fn search(&self, query: &str) -> Result<SearchResult> {
        let payload: SearchPayload = self
            .get(
                "search3",
                &[
                    ("query", query),
                    ("albumCount", "20"),
                    ("artistCount", "20"),
                    ("songCount", "50"),
                ],
            )
            .await?;
        Ok(payload.search_result.unwrap_or_default())
    }

    pub async fn random_songs(&self, size: u32) -> Result<Vec<Song>> {
        let size = size.to_string();
        let payload: RandomSongsPayload = self
            .get("getRandomSongs", &[("size", size.as_str())])
            .await?;
        Ok(payload
            .random_songs
            .map(|list| list.song)
            .unwrap_or_default())
    }

    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        let payload: PlaylistsPayload = self.get("getPlaylists", &[]).await?;
        Ok(payload
            .playlists
            .map(|list| list.playlist)
            .unwrap_or_default())
    }

    /// One playlist with its entries.
    pub async fn playlist(&self, id: &str) -> Result<Playlist> {
        let payload: PlaylistPayload = self.get("getPlaylist", &[("id", id)]).await?;
        payload
            .playlist
            .ok_or_else(|| SubsonicError::ParseError(format!("Response has no playlist {}", id)))
    }

    // =========================================================================
    // Annotation
    // =========================================================================

    pub async fn star(&self, id: &str) -> Result<()> {
        let _: Empty = self.get("star", &[("id", id)]).await?;
        debug!(id = %id, "Starred");
        Ok(())
    }

    pub async fn unstar(&self, id: &str) -> Result<()> {
        let _: Empty = self.get("unstar", &[("id", id)]).await?;
        debug!(id = %id, "Unstarred");
        Ok(())
    }

    /// Register a listen.
    ///
    /// `submission = false` marks the song as "now playing", `true` records
    /// a finished play.
    pub async fn scrobble(&self, id: &str, submission: bool) -> Result<()> {
        let submission = if submission { "true" } else { "false" };
        let _: Empty = self
            .get("scrobble", &[("id", id), ("submission", submission)])
            .await?;
        Ok(())
    }

    /// The account the client is logged in as.
    pub async fn user(&self) -> Result<User> {
        let username = self.credentials.username().to_string();
        let payload: UserPayload = self.get("getUser", &[("username", username.as_str())]).await?;
        payload
            .user
            .ok_or_else(|| SubsonicError::ParseError("Response has no user".into()))
    }

    pub async fn lyrics_by_song_id(&self, id: &str) -> Result<LyricsList> {
        let payload: LyricsPayload = self.get("getLyricsBySongId", &[("id", id)]).await?;
        Ok(payload.lyrics_list.unwrap_or_default())
    }

    // =========================================================================
    // Media
    // =========================================================================

    /// Authenticated stream URL; handed to the audio output as-is.
    pub fn stream_url(&self, id: &str) -> Url {
        self.endpoint_url("stream", &[("id", id)])
    }

    /// Authenticated cover art URL, optionally scaled server-side.
    pub fn cover_art_url(&self, id: &str, size: Option<u32>) -> Url {
        match size {
            Some(size) => {
                let size = size.to_string();
                self.endpoint_url("getCoverArt", &[("id", id), ("size", size.as_str())])
            }
            None => self.endpoint_url("getCoverArt", &[("id", id)]),
        }
    }

    /// Raw cover art bytes.
    pub async fn cover_art(&self, id: &str, size: u32) -> Result<Vec<u8>> {
        let url = self.cover_art_url(id, Some(size));
        debug!(id = %id, size, "Fetching cover art");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status.as_u16() == 401 {
            return Err(SubsonicError::AuthRequired);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SubsonicError::ServerError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        // Errors come back as a JSON envelope with status 200
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("json"));

        if is_json {
            let envelope: Envelope<Empty> = response.json().await.map_err(|e| {
                SubsonicError::ParseError(format!("Failed to parse cover art response: {}", e))
            })?;
            envelope_result(envelope)?;
            return Err(SubsonicError::ParseError(format!(
                "Cover art {} returned no image",
                id
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.rest_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(endpoint);
        }
        url.query_pairs_mut()
            .extend_pairs(self.credentials.query_pairs())
            .extend_pairs(params);
        url
    }

    /// GET an endpoint and unwrap the `subsonic-response` envelope.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        // The URL carries the token, so only the endpoint is logged
        debug!(endpoint = %endpoint, "Subsonic request");

        let response = self
            .http
            .get(self.endpoint_url(endpoint, params))
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            let envelope: Envelope<T> = response.json().await.map_err(|e| {
                SubsonicError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
            })?;
            envelope_result(envelope)
        } else if status.as_u16() == 401 {
            Err(SubsonicError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(SubsonicError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

fn envelope_result<T>(envelope: Envelope<T>) -> Result<T> {
    let body = envelope.response;
    match body.status {
        ResponseStatus::Ok => Ok(body.payload),
        ResponseStatus::Failed => {
            let err = body.error.map_or_else(
                || SubsonicError::Api {
                    code: 0,
                    message: "Request failed".into(),
                },
                |e| SubsonicError::Api {
                    code: e.code,
                    message: e.message,
                },
            );
            warn!(error = %err, "Server rejected request");
            Err(err)
        }
    }
}

/// Keep the first album of every normalised `artist::name` pair.
fn dedupe_albums(albums: Vec<Album>) -> Vec<Album> {
    let mut seen = HashSet::new();
    albums
        .into_iter()
        .filter(|album| {
            let artist = album.artist.as_deref().unwrap_or_default().trim().to_lowercase();
            let name = album.display_name().trim().to_lowercase();
            seen.insert(format!("{}::{}", artist, name))
        })
        .collect()
}

#[async_trait]
impl MediaGateway for SubsonicClient {
    fn stream_location(&self, track_id: &str) -> Url {
        self.stream_url(track_id)
    }

    fn artwork_location(&self, art_ref: &str, size: u32) -> Url {
        self.cover_art_url(art_ref, Some(size))
    }

    async fn notify_playback_progress(
        &self,
        track_id: &str,
        completed: bool,
    ) -> meloman_playback::Result<()> {
        Ok(self.scrobble(track_id, completed).await?)
    }

    async fn fetch_lyrics(&self, track_id: &str) -> meloman_playback::Result<Lyrics> {
        self.lyrics_by_song_id(track_id)
            .await?
            .into_lyrics()
            .ok_or_else(|| PlaybackError::Gateway(format!("No lyrics for {}", track_id)))
    }

    async fn fetch_artwork(&self, art_ref: &str, size: u32) -> meloman_playback::Result<Vec<u8>> {
        Ok(self.cover_art(art_ref, size).await?)
    }
}
