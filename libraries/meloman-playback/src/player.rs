//! Transport manager - core orchestration
//!
//! Owns the queue, at most one live audio resource, the volume preference
//! and the side tasks spawned per bind (accent colour, lyrics, progress
//! report, start retry).
//!
//! Every track change goes through one internal `bind_and_play`. Queue
//! operations routed through the player compare the queue's selected slot
//! with the last slot the player observed; an explicit [`Player::play`]
//! records its own transition as observed before binding, so each logical
//! track change binds exactly once.

use crate::{
    accent::Accent,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    gateway::MediaGateway,
    lyrics::{Lyrics, LyricsCache},
    output::{AudioOutput, AudioResource, OutputEvent, OutputEvents, ResourceId},
    queue::Queue,
    tasks::{self, BindToken, Notice},
    types::{
        PlaybackConfig, PlaybackState, RepeatMode, ShuffleAlgorithm, SlotId, Track,
        TransportSnapshot,
    },
    volume::Volume,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Track currently bound to the output
struct Loaded {
    token: BindToken,
    track: Track,
    resource_id: ResourceId,

    /// Queue slot the track was bound from; `None` for a track played
    /// outside the queue
    slot: Option<SlotId>,

    /// `None` when binding failed; resume retries the bind
    resource: Option<Box<dyn AudioResource>>,

    /// The single automatic start retry is still pending
    retry_armed: bool,

    /// The automatic retry of this bind has been used up
    retried: bool,
}

/// Audio transport over a play queue
pub struct Player {
    config: PlaybackConfig,
    queue: Queue,
    gateway: Arc<dyn MediaGateway>,
    output: Box<dyn AudioOutput>,

    state: PlaybackState,
    loaded: Option<Loaded>,

    /// Queue slot whose transition has already been handled
    observed_slot: Option<SlotId>,

    next_token: u64,
    next_resource: u64,

    current_time: Duration,
    duration: Duration,
    volume: Volume,
    accent: Accent,

    current_lyrics: Option<Lyrics>,
    lyrics_cache: LyricsCache,
    lyrics_in_flight: HashSet<String>,

    notice_tx: UnboundedSender<Notice>,
    notice_rx: UnboundedReceiver<Notice>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl Player {
    /// Create a player over a gateway and a platform output
    pub fn new(
        config: PlaybackConfig,
        gateway: Arc<dyn MediaGateway>,
        output: Box<dyn AudioOutput>,
    ) -> Self {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();

        Self {
            queue: Queue::with_settings(config.shuffle, config.repeat),
            volume: Volume::new(config.volume),
            lyrics_cache: LyricsCache::new(config.lyrics_cache_capacity, config.lyrics_cache_ttl()),
            config,
            gateway,
            output,
            state: PlaybackState::Idle,
            loaded: None,
            observed_slot: None,
            next_token: 0,
            next_resource: 0,
            current_time: Duration::ZERO,
            duration: Duration::ZERO,
            accent: Accent::default(),
            current_lyrics: None,
            lyrics_in_flight: HashSet::new(),
            notice_tx,
            notice_rx,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Play a track the user picked
    ///
    /// With a context sequence the queue is replaced by it and the track is
    /// selected (appended first if the context lacks it). Without one the
    /// queue is left alone. Bind and start failures leave the track loaded
    /// and paused; they are reported through events, never returned.
    pub fn play(&mut self, track: Track, context: Option<Vec<Track>>) {
        let from_queue = context.is_some();
        if let Some(context) = context {
            match context.iter().position(|t| t.id == track.id) {
                Some(index) => self.queue.replace(context, index),
                None => {
                    debug!(track_id = %track.id, "Track missing from context, appending");
                    self.queue.replace(context, 0);
                    self.queue.append(track.clone());
                    self.queue.jump_to(self.queue.len() - 1);
                }
            }
            self.emit_queue_changed();
        }

        // This transition is handled here; the queue sync must not rebind it
        self.observed_slot = self.queue.current_slot();
        let slot = if from_queue { self.observed_slot } else { None };
        self.bind_and_play(track, slot, true);
    }

    /// Pause playback, keeping the position
    ///
    /// Always succeeds; pausing a paused or idle transport changes nothing.
    pub fn pause(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        loaded.retry_armed = false;
        if let Some(resource) = loaded.resource.as_mut() {
            resource.pause();
        }

        if matches!(self.state, PlaybackState::Playing | PlaybackState::Loading) {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Resume the loaded track
    ///
    /// Rebinds first if the previous bind failed. A rejected start leaves
    /// the transport paused and returns the error.
    pub fn resume(&mut self) -> Result<()> {
        let Some(loaded) = self.loaded.as_mut() else {
            return Err(PlaybackError::NoTrackLoaded);
        };
        if self.state == PlaybackState::Playing {
            return Ok(());
        }
        loaded.retry_armed = false;

        match self.start_loaded() {
            Ok(()) => {
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Resume rejected");
                self.set_state(PlaybackState::Paused);
                Err(e)
            }
        }
    }

    /// Pause when playing, resume otherwise
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.state == PlaybackState::Playing {
            self.pause();
            Ok(())
        } else {
            self.resume()
        }
    }

    /// Stop playback and release the resource (the queue is kept)
    pub fn stop(&mut self) {
        self.release_current();
        self.current_time = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.current_lyrics = None;
        self.set_state(PlaybackState::Idle);
    }

    /// Seek to `seconds` from the start of the track
    ///
    /// Only `0 <= seconds <= duration` is accepted; anything else is rejected
    /// without touching the transport.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        let Some(loaded) = self.loaded.as_mut() else {
            return Err(PlaybackError::NoTrackLoaded);
        };
        if !seconds.is_finite() || seconds < 0.0 || seconds > self.duration.as_secs_f64() {
            return Err(PlaybackError::InvalidSeekPosition(seconds));
        }

        let position = Duration::from_secs_f64(seconds);
        let resource = loaded
            .resource
            .as_mut()
            .ok_or_else(|| PlaybackError::Output("no bound resource".to_string()))?;
        resource.seek(position)?;

        self.current_time = position;
        self.emit_position();
        Ok(())
    }

    // ===== Volume =====

    /// Set volume (clamped to 0-100) and apply it to the live resource
    pub fn set_volume(&mut self, level: i32) {
        let changed = self.volume.set_level(level);
        let gain = self.volume.gain();
        if let Some(resource) = self.live_resource() {
            resource.set_gain(gain);
        }
        if changed {
            self.pending_events.push(PlaybackEvent::VolumeChanged {
                level: self.volume.level(),
            });
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    // ===== Navigation =====

    /// Skip to the next queue slot
    ///
    /// Returns `false` at the end of the queue (nothing changes). When the
    /// slot stays the same (repeat one) the track restarts.
    pub fn skip_next(&mut self) -> bool {
        let before = self.queue.current_slot();
        if !self.queue.advance_to_next() {
            return false;
        }
        self.after_advance(before);
        true
    }

    /// Go to the previous queue slot
    ///
    /// More than the restart threshold into a track, this only seeks back to
    /// the start. At the first slot (without repeat all) the track restarts.
    pub fn skip_previous(&mut self) -> bool {
        if self.current_time > self.config.restart_threshold() {
            if let Some(resource) = self.live_resource() {
                match resource.rewind() {
                    Ok(()) => {
                        self.current_time = Duration::ZERO;
                        self.emit_position();
                        return true;
                    }
                    Err(e) => warn!(error = %e, "Failed to rewind, moving to previous slot"),
                }
            }
        }

        let before = self.queue.current_slot();
        if !self.queue.advance_to_previous() {
            return false;
        }
        self.after_advance(before);
        true
    }

    fn after_advance(&mut self, before: Option<SlotId>) {
        if self.queue.current_slot() == before {
            self.restart_current();
        } else {
            self.sync_with_queue(true);
        }
        self.emit_queue_changed();
    }

    /// Natural end of the live resource
    fn on_ended(&mut self) {
        if let Some(track) = self.current_track() {
            info!(track_id = %track.id, "Track ended");
        }
        self.set_state(PlaybackState::Ended);

        let before = self.queue.current_slot();
        if !self.queue.advance_to_next() {
            info!("Queue finished");
            self.stop();
            return;
        }

        if self.queue.repeat() == RepeatMode::One || self.queue.current_slot() == before {
            self.restart_current();
        } else {
            self.sync_with_queue(true);
        }
        self.emit_queue_changed();
    }

    /// Replay the live resource from the start, binding again if needed
    fn restart_current(&mut self) {
        let rewound = self
            .live_resource()
            .map(|resource| resource.rewind().and_then(|()| resource.start()));

        match rewound {
            Some(Ok(())) => {
                self.current_time = Duration::ZERO;
                self.set_state(PlaybackState::Playing);
                self.emit_position();
            }
            Some(Err(e)) => {
                warn!(error = %e, "Restart failed, rebinding");
                self.rebind_selected();
            }
            None => self.rebind_selected(),
        }
    }

    fn rebind_selected(&mut self) {
        let selected = self
            .queue
            .current()
            .cloned()
            .map(|track| (track, self.queue.current_slot()));
        let target = selected.or_else(|| {
            self.loaded
                .as_ref()
                .map(|l| (l.track.clone(), l.slot))
        });
        if let Some((track, slot)) = target {
            self.observed_slot = self.queue.current_slot();
            self.bind_and_play(track, slot, true);
        }
    }

    // ===== Queue Management =====

    /// Replace the queue and play from `start_index`
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        self.queue.replace(tracks, start_index);
        self.sync_with_queue(true);
        self.emit_queue_changed();
    }

    pub fn append(&mut self, track: Track) {
        self.queue.append(track);
        self.sync_with_queue(self.is_playing());
        self.emit_queue_changed();
    }

    pub fn insert_after_current(&mut self, track: Track) {
        self.queue.insert_after_current(track);
        self.sync_with_queue(self.is_playing());
        self.prefetch_next_lyrics();
        self.emit_queue_changed();
    }

    /// Remove a slot
    ///
    /// Removing the current slot binds the slot that slid in, playing only
    /// if the transport was playing. An emptied queue stops the transport.
    pub fn remove_at(&mut self, index: usize) -> Option<Track> {
        let was_playing = self.is_playing();
        let removed = self.queue.remove_at(index)?;
        self.sync_with_queue(was_playing);
        self.emit_queue_changed();
        Some(removed)
    }

    pub fn move_item(&mut self, from: usize, to: usize) {
        self.queue.move_item(from, to);
        self.sync_with_queue(self.is_playing());
        self.prefetch_next_lyrics();
        self.emit_queue_changed();
    }

    pub fn move_up(&mut self, index: usize) {
        self.queue.move_up(index);
        self.emit_queue_changed();
    }

    pub fn move_down(&mut self, index: usize) {
        self.queue.move_down(index);
        self.emit_queue_changed();
    }

    /// Select and play the slot at `index`
    ///
    /// Out of range is a no-op returning `false`. Picking the slot whose
    /// track is already loaded changes nothing.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if !self.queue.jump_to(index) {
            return false;
        }
        let selected = self.queue.current_slot();
        if !self.loaded.as_ref().is_some_and(|l| l.slot == selected) {
            self.rebind_selected();
        }
        self.emit_queue_changed();
        true
    }

    /// Flip shuffle; returns the new state
    pub fn toggle_shuffle(&mut self) -> bool {
        let enabled = self.queue.toggle_shuffle();
        self.emit_queue_changed();
        enabled
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.queue.set_shuffle(enabled);
        self.emit_queue_changed();
    }

    pub fn set_shuffle_algorithm(&mut self, algorithm: ShuffleAlgorithm) {
        self.queue.set_shuffle_algorithm(algorithm);
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.queue.set_repeat(mode);
    }

    /// Clear the queue and stop
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.sync_with_queue(false);
        self.emit_queue_changed();
    }

    // ===== State Queries =====

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing | PlaybackState::Loading)
    }

    /// Track bound to the output
    pub fn current_track(&self) -> Option<&Track> {
        self.loaded.as_ref().map(|l| &l.track)
    }

    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn accent(&self) -> &Accent {
        &self.accent
    }

    /// Lyrics of the bound track, once fetched
    pub fn lyrics_for_current(&self) -> Option<&Lyrics> {
        self.current_lyrics.as_ref()
    }

    /// Index of the lyric line at the current position
    pub fn active_lyric_line(&self) -> Option<usize> {
        self.current_lyrics
            .as_ref()
            .and_then(|l| l.active_line(self.current_time))
    }

    pub fn snapshot(&self) -> TransportSnapshot {
        TransportSnapshot {
            loaded_track_id: self.loaded.as_ref().map(|l| l.track.id.clone()),
            state: self.state,
            is_playing: self.state == PlaybackState::Playing,
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume.level(),
        }
    }

    // ===== Events =====

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Notices =====

    /// Apply every notice that has already arrived; returns how many
    pub fn poll_notices(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(notice) = self.notice_rx.try_recv() {
            self.handle_notice(notice);
            handled += 1;
        }
        handled
    }

    /// Wait for the next notice and apply it
    pub async fn next_notice(&mut self) -> bool {
        match self.notice_rx.recv().await {
            Some(notice) => {
                self.handle_notice(notice);
                true
            }
            None => false,
        }
    }

    fn handle_notice(&mut self, notice: Notice) {
        match notice {
            Notice::Output { resource, event } => self.handle_output_event(resource, event),
            Notice::RetryStart { token } => self.handle_retry(token),
            Notice::ProgressDue { token } => {
                if self.is_live(token) && self.state == PlaybackState::Playing {
                    if let Some(track) = self.current_track() {
                        tasks::spawn_progress_report(self.gateway.clone(), track.id.clone());
                    }
                } else {
                    debug!(token = %token, "Skipping progress report for inactive bind");
                }
            }
            Notice::Accent { token, accent } => {
                if self.is_live(token) {
                    self.set_accent(accent);
                } else {
                    debug!(token = %token, "Discarding stale accent colour");
                }
            }
            Notice::Lyrics { track_id, lyrics } => {
                self.lyrics_in_flight.remove(&track_id);
                let Some(lyrics) = lyrics else {
                    return;
                };
                self.lyrics_cache.insert(track_id.clone(), lyrics.clone());
                if self.current_track().is_some_and(|t| t.id == track_id) {
                    self.current_lyrics = Some(lyrics);
                    self.pending_events
                        .push(PlaybackEvent::LyricsReady { track_id });
                }
            }
        }
    }

    fn handle_output_event(&mut self, resource: ResourceId, event: OutputEvent) {
        let live = self.loaded.as_ref().map(|l| l.resource_id);
        if live != Some(resource) {
            debug!(resource = %resource, ?event, "Discarding event from released resource");
            return;
        }

        match event {
            OutputEvent::Progress(position) => {
                self.current_time = position;
                self.emit_position();
            }
            OutputEvent::Duration(duration) => {
                self.duration = duration;
                self.emit_position();
            }
            OutputEvent::Ended => self.on_ended(),
            OutputEvent::Failed(message) => {
                warn!(resource = %resource, error = %message, "Audio output failed");
                let was_playing = self.is_playing();
                if let Some(resource) = self.live_resource() {
                    resource.pause();
                }
                if was_playing {
                    self.arm_retry();
                }
                self.set_state(PlaybackState::Paused);
                self.pending_events.push(PlaybackEvent::Error { message });
            }
        }
    }

    fn handle_retry(&mut self, token: BindToken) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        if loaded.token != token || !loaded.retry_armed || self.state != PlaybackState::Paused {
            return;
        }
        loaded.retry_armed = false;

        match self.start_loaded() {
            Ok(()) => {
                info!(token = %token, "Start retry succeeded");
                self.set_state(PlaybackState::Playing);
            }
            Err(e) => {
                warn!(token = %token, error = %e, "Start retry failed, giving up");
                self.pending_events.push(PlaybackEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    // ===== Internal =====

    /// Bind whatever the queue now selects, if it differs from what was handled
    fn sync_with_queue(&mut self, autoplay: bool) {
        let slot = self.queue.current_slot();
        if slot == self.observed_slot {
            return;
        }
        self.observed_slot = slot;

        match self.queue.current().cloned() {
            Some(track) => self.bind_and_play(track, slot, autoplay),
            None => self.stop(),
        }
    }

    /// Release the live resource, bind `track` to a fresh one and start it
    fn bind_and_play(&mut self, track: Track, slot: Option<SlotId>, autoplay: bool) {
        let previous_track_id = self.release_current();

        let token = BindToken(self.next_token);
        self.next_token += 1;
        let resource_id = ResourceId(self.next_resource);
        self.next_resource += 1;

        info!(track_id = %track.id, token = %token, "Binding track");

        self.current_time = Duration::ZERO;
        self.duration = track.duration;
        self.current_lyrics = None;
        self.set_state(PlaybackState::Loading);
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });

        let stream = self.gateway.stream_location(&track.id);
        let events = OutputEvents::new(resource_id, self.notice_tx.clone());
        let resource = match self.output.bind(&stream, events) {
            Ok(mut resource) => {
                resource.set_gain(self.volume.gain());
                Some(resource)
            }
            Err(e) => {
                warn!(track_id = %track.id, error = %e, "Failed to bind track");
                self.pending_events.push(PlaybackEvent::Error {
                    message: e.to_string(),
                });
                None
            }
        };

        self.loaded = Some(Loaded {
            token,
            track: track.clone(),
            resource_id,
            slot,
            resource,
            retry_armed: false,
            retried: false,
        });

        if autoplay {
            self.start_bound(token);
        } else {
            self.set_state(PlaybackState::Paused);
        }

        self.spawn_side_tasks(token, &track);
    }

    /// First start attempt of a fresh bind; arms the retry on failure
    ///
    /// A failed bind already reported its error, so only the retry is armed.
    fn start_bound(&mut self, token: BindToken) {
        let Some(loaded) = self.loaded.as_ref() else {
            return;
        };
        if loaded.resource.is_none() {
            debug!(token = %token, "Nothing bound, retrying once");
            self.arm_retry();
            self.set_state(PlaybackState::Paused);
            return;
        }

        match self.start_loaded() {
            Ok(()) => self.set_state(PlaybackState::Playing),
            Err(e) => {
                warn!(token = %token, error = %e, "Start rejected, retrying once");
                self.arm_retry();
                self.set_state(PlaybackState::Paused);
                self.pending_events.push(PlaybackEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    /// Schedule the single automatic retry of the live bind
    fn arm_retry(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        if loaded.retried {
            return;
        }
        loaded.retried = true;
        loaded.retry_armed = true;
        tasks::spawn_timer(
            self.notice_tx.clone(),
            self.config.start_retry_delay(),
            Notice::RetryStart {
                token: loaded.token,
            },
        );
    }

    /// Start the loaded track, binding it again if its bind failed
    fn start_loaded(&mut self) -> Result<()> {
        let Some(loaded) = self.loaded.as_mut() else {
            return Err(PlaybackError::NoTrackLoaded);
        };

        if loaded.resource.is_none() {
            let stream = self.gateway.stream_location(&loaded.track.id);
            let events = OutputEvents::new(loaded.resource_id, self.notice_tx.clone());
            let mut resource = self.output.bind(&stream, events)?;
            resource.set_gain(self.volume.gain());
            loaded.resource = Some(resource);
        }

        match loaded.resource.as_mut() {
            Some(resource) => resource.start(),
            None => Err(PlaybackError::NoTrackLoaded),
        }
    }

    fn spawn_side_tasks(&mut self, token: BindToken, track: &Track) {
        match &track.cover_art {
            Some(art_ref) => tasks::spawn_accent(
                self.notice_tx.clone(),
                self.gateway.clone(),
                token,
                art_ref.clone(),
                self.config.artwork_size,
                self.config.accent_sample_step,
            ),
            None => self.set_accent(Accent::default()),
        }

        self.request_lyrics(&track.id, true);
        self.prefetch_next_lyrics();

        tasks::spawn_timer(
            self.notice_tx.clone(),
            self.config.progress_notify_delay(track.duration),
            Notice::ProgressDue { token },
        );
    }

    /// Warm the lyrics cache for whatever would play next
    fn prefetch_next_lyrics(&mut self) {
        if self.loaded.is_none() {
            return;
        }
        if let Some(next) = self.queue.peek_next().map(|e| e.track.id.clone()) {
            self.request_lyrics(&next, false);
        }
    }

    /// Serve lyrics from the cache or start a fetch
    fn request_lyrics(&mut self, track_id: &str, current: bool) {
        if let Some(lyrics) = self.lyrics_cache.get(track_id) {
            if current {
                self.current_lyrics = Some(lyrics.clone());
                self.pending_events.push(PlaybackEvent::LyricsReady {
                    track_id: track_id.to_string(),
                });
            }
            return;
        }

        if self.lyrics_in_flight.insert(track_id.to_string()) {
            debug!(track_id = %track_id, current, "Fetching lyrics");
            tasks::spawn_lyrics(
                self.notice_tx.clone(),
                self.gateway.clone(),
                track_id.to_string(),
            );
        }
    }

    /// Pause and release the live resource; returns the released track id
    fn release_current(&mut self) -> Option<String> {
        let loaded = self.loaded.take()?;
        if let Some(mut resource) = loaded.resource {
            resource.pause();
            resource.release();
        }
        debug!(track_id = %loaded.track.id, resource = %loaded.resource_id, "Released resource");
        Some(loaded.track.id)
    }

    fn live_resource(&mut self) -> Option<&mut Box<dyn AudioResource>> {
        self.loaded.as_mut().and_then(|l| l.resource.as_mut())
    }

    fn is_live(&self, token: BindToken) -> bool {
        self.loaded.as_ref().is_some_and(|l| l.token == token)
    }

    fn set_accent(&mut self, accent: Accent) {
        if accent != self.accent {
            self.accent = accent.clone();
            self.pending_events
                .push(PlaybackEvent::AccentChanged { accent });
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "Transport state changed");
            self.state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_ms: self.current_time.as_millis() as u64,
            duration_ms: self.duration.as_millis() as u64,
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            current_index: self.queue.current_index(),
        });
    }
}
