//! Meloman Subsonic Client
//!
//! HTTP client for Subsonic-compatible media servers (Navidrome, Airsonic,
//! Gonic and friends), speaking the JSON flavour of the REST API.
//!
//! # Features
//!
//! - **Browsing**: albums, artists, playlists, random songs, search
//! - **Annotation**: star/unstar, scrobble
//! - **Media**: authenticated stream and cover art URLs, cover art bytes
//! - **Lyrics**: OpenSubsonic structured lyrics
//!
//! [`SubsonicClient`] implements [`meloman_playback::MediaGateway`], so it
//! can be handed straight to a [`meloman_playback::Player`].
//!
//! # Example
//!
//! ```ignore
//! use meloman_subsonic::{ServerConfig, SubsonicClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::new("https://music.example.com", "alice", token, salt);
//!     let client = SubsonicClient::new(config)?;
//!
//!     client.ping().await?;
//!
//!     let results = client.search("radiohead").await?;
//!     println!("Found {} songs", results.songs.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod types;

pub use auth::{Credentials, API_VERSION, CLIENT_NAME};
pub use client::SubsonicClient;
pub use error::{Result, SubsonicError};
pub use types::{
    Album, Artist, LyricsList, Playlist, SearchResult, ServerConfig, Song, StructuredLine,
    StructuredLyrics, User,
};
