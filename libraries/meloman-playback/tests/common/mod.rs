//! Shared fakes for player integration tests

use async_trait::async_trait;
use meloman_playback::{
    AudioOutput, AudioResource, Lyrics, MediaGateway, OutputEvents, PlaybackConfig,
    PlaybackError, Player, Result, Track,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

// ===== Tracks =====

pub fn create_track(id: &str, duration_secs: u64) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {}", id),
        artist: "Test Artist".to_string(),
        album: "Test Album".to_string(),
        duration: Duration::from_secs(duration_secs),
        cover_art: None,
    }
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| create_track(id, 200)).collect()
}

pub fn queue_ids(player: &Player) -> Vec<String> {
    player.queue().tracks().map(|t| t.id.clone()).collect()
}

// ===== Gateway =====

/// In-memory media gateway recording every call
#[derive(Default)]
pub struct FakeGateway {
    pub lyrics: Mutex<HashMap<String, Lyrics>>,
    pub lyrics_delay: Mutex<HashMap<String, Duration>>,
    pub lyrics_requests: Mutex<Vec<String>>,
    pub artwork: Mutex<HashMap<String, Vec<u8>>>,
    pub reports: Mutex<Vec<(String, bool)>>,
}

impl FakeGateway {
    pub fn with_lyrics(self, track_id: &str, lyrics: Lyrics) -> Self {
        self.lyrics
            .lock()
            .unwrap()
            .insert(track_id.to_string(), lyrics);
        self
    }

    pub fn with_lyrics_delay(self, track_id: &str, delay: Duration) -> Self {
        self.lyrics_delay
            .lock()
            .unwrap()
            .insert(track_id.to_string(), delay);
        self
    }

    pub fn reports(&self) -> Vec<(String, bool)> {
        self.reports.lock().unwrap().clone()
    }

    pub fn lyrics_requests_for(&self, track_id: &str) -> usize {
        self.lyrics_requests
            .lock()
            .unwrap()
            .iter()
            .filter(|id| *id == track_id)
            .count()
    }
}

#[async_trait]
impl MediaGateway for FakeGateway {
    fn stream_location(&self, track_id: &str) -> Url {
        Url::parse(&format!("http://media.test/stream/{}", track_id)).unwrap()
    }

    fn artwork_location(&self, art_ref: &str, size: u32) -> Url {
        Url::parse(&format!("http://media.test/art/{}?size={}", art_ref, size)).unwrap()
    }

    async fn notify_playback_progress(&self, track_id: &str, completed: bool) -> Result<()> {
        self.reports
            .lock()
            .unwrap()
            .push((track_id.to_string(), completed));
        Ok(())
    }

    async fn fetch_lyrics(&self, track_id: &str) -> Result<Lyrics> {
        self.lyrics_requests
            .lock()
            .unwrap()
            .push(track_id.to_string());

        let delay = self.lyrics_delay.lock().unwrap().get(track_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.lyrics
            .lock()
            .unwrap()
            .get(track_id)
            .cloned()
            .ok_or_else(|| PlaybackError::Gateway("no lyrics".to_string()))
    }

    async fn fetch_artwork(&self, art_ref: &str, _size: u32) -> Result<Vec<u8>> {
        self.artwork
            .lock()
            .unwrap()
            .get(art_ref)
            .cloned()
            .ok_or_else(|| PlaybackError::Gateway("no artwork".to_string()))
    }
}

// ===== Output =====

/// Everything the mock output has been asked to do
#[derive(Default)]
pub struct OutputLog {
    /// Track ids in bind order
    pub binds: Vec<String>,
    pub releases: usize,
    pub live: usize,
    pub max_live: usize,
    pub starts: usize,
    pub pauses: usize,
    pub seeks: Vec<Duration>,
    pub gains: Vec<f32>,

    /// Upcoming start attempts to reject
    pub reject_starts: usize,

    /// Upcoming binds to fail
    pub fail_binds: usize,

    /// Event handles, one per successful bind
    pub events: Vec<OutputEvents>,
}

#[derive(Clone, Default)]
pub struct MockOutput {
    pub log: Arc<Mutex<OutputLog>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event handle of the most recent bind
    pub fn last_events(&self) -> OutputEvents {
        self.log.lock().unwrap().events.last().cloned().unwrap()
    }

    pub fn events_of_bind(&self, index: usize) -> OutputEvents {
        self.log.lock().unwrap().events[index].clone()
    }

    pub fn binds(&self) -> Vec<String> {
        self.log.lock().unwrap().binds.clone()
    }

    pub fn reject_next_starts(&self, count: usize) {
        self.log.lock().unwrap().reject_starts = count;
    }
}

impl AudioOutput for MockOutput {
    fn bind(&mut self, stream: &Url, events: OutputEvents) -> Result<Box<dyn AudioResource>> {
        let mut log = self.log.lock().unwrap();
        if log.fail_binds > 0 {
            log.fail_binds -= 1;
            return Err(PlaybackError::Output("unsupported format".to_string()));
        }

        let track_id = stream
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();
        log.binds.push(track_id);
        log.live += 1;
        log.max_live = log.max_live.max(log.live);
        log.events.push(events);

        Ok(Box::new(MockResource {
            log: self.log.clone(),
            released: false,
        }))
    }
}

struct MockResource {
    log: Arc<Mutex<OutputLog>>,
    released: bool,
}

impl AudioResource for MockResource {
    fn start(&mut self) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        if log.reject_starts > 0 {
            log.reject_starts -= 1;
            return Err(PlaybackError::StartRejected("autoplay blocked".to_string()));
        }
        log.starts += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.log.lock().unwrap().pauses += 1;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.log.lock().unwrap().seeks.push(position);
        Ok(())
    }

    fn set_gain(&mut self, gain: f32) {
        self.log.lock().unwrap().gains.push(gain);
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            let mut log = self.log.lock().unwrap();
            log.live -= 1;
            log.releases += 1;
        }
    }
}

// ===== Harness =====

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn create_player(gateway: Arc<FakeGateway>, output: &MockOutput) -> Player {
    init_tracing();
    Player::new(PlaybackConfig::default(), gateway, Box::new(output.clone()))
}

/// Let spawned side tasks run and apply whatever they reported
pub async fn settle(player: &mut Player) {
    for _ in 0..20 {
        tokio::task::yield_now().await;
        player.poll_notices();
    }
}

/// Settle, advance paused time, then settle again
///
/// Spawned tasks get polled before the clock moves, so their sleeps are
/// registered against the current time.
pub async fn advance(player: &mut Player, duration: Duration) {
    settle(player).await;
    tokio::time::advance(duration).await;
    settle(player).await;
}
