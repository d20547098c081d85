//! A logged-in client: media server, player and preferences together

use crate::error::Result;
use crate::preferences::{KeyValueStore, Preferences};
use crate::settings::Settings;
use meloman_playback::{AudioOutput, Player, Track};
use meloman_subsonic::SubsonicClient;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Session<S> {
    client: Arc<SubsonicClient>,
    player: Player,
    preferences: Preferences<S>,
}

impl<S: KeyValueStore> Session<S> {
    /// Validate settings, check the server answers, and build the player
    ///
    /// A stored volume preference overrides the configured initial volume.
    pub async fn connect(
        settings: &Settings,
        output: Box<dyn AudioOutput>,
        store: S,
    ) -> Result<Self> {
        settings.validate()?;

        let client = Arc::new(SubsonicClient::new(settings.server.clone())?);
        client.ping().await?;

        let preferences = Preferences::new(store);
        let mut playback = settings.playback.clone();
        if let Some(volume) = preferences.volume() {
            playback.volume = volume;
        }

        let player = Player::new(playback, client.clone(), output);
        info!(url = %client.url(), username = %client.username(), "Session ready");

        Ok(Self {
            client,
            player,
            preferences,
        })
    }

    pub fn client(&self) -> &SubsonicClient {
        &self.client
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences<S> {
        &mut self.preferences
    }

    /// Set the volume and remember it
    pub fn set_volume(&mut self, level: i32) -> Result<()> {
        self.player.set_volume(level);
        self.preferences.set_volume(self.player.volume())
    }

    /// Replace the queue with an album and play from `start_index`
    ///
    /// Returns `false` when the album has no track at that index.
    pub async fn play_album(&mut self, album_id: &str, start_index: usize) -> Result<bool> {
        let album = self.client.album(album_id).await?;
        let tracks = album.tracks();
        let Some(track) = tracks.get(start_index).cloned() else {
            debug!(album_id = %album_id, start_index, tracks = tracks.len(), "No such album track");
            return Ok(false);
        };

        debug!(album_id = %album_id, track_id = %track.id, "Playing album");
        self.player.play(track, Some(tracks));
        Ok(true)
    }

    /// Replace the queue with a playlist and play its first entry
    pub async fn play_playlist(&mut self, playlist_id: &str) -> Result<()> {
        let playlist = self.client.playlist(playlist_id).await?;
        let tracks: Vec<Track> = playlist.entry.into_iter().map(Track::from).collect();
        if tracks.is_empty() {
            debug!(playlist_id = %playlist_id, "Playlist is empty");
            return Ok(());
        }

        self.player.set_queue(tracks, 0);
        Ok(())
    }

    /// Append random songs to the queue
    pub async fn queue_random(&mut self, count: u32) -> Result<usize> {
        let songs = self.client.random_songs(count).await?;
        let added = songs.len();
        for song in songs {
            self.player.append(Track::from(song));
        }
        Ok(added)
    }
}
