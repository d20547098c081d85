//! Platform-agnostic audio output traits
//!
//! The player never decodes audio itself. A platform output binds a stream
//! location to an [`AudioResource`] and reports runtime events (progress,
//! duration, end of track, failure) back through an [`OutputEvents`] handle.

use crate::error::Result;
use crate::tasks::Notice;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Identity of one bound resource
///
/// Runtime events carry it so events from a released resource can be told
/// apart from events of the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub(crate) u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource-{}", self.0)
    }
}

/// Runtime event reported by a bound resource
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    /// Playback position advanced
    Progress(Duration),

    /// Total duration became known
    Duration(Duration),

    /// Natural end of the stream
    Ended,

    /// Decoding or network failure
    Failed(String),
}

/// Handle a resource uses to report its runtime events
///
/// Cheap to clone; sending never blocks. Events sent after the player has
/// been dropped are silently lost.
#[derive(Debug, Clone)]
pub struct OutputEvents {
    resource: ResourceId,
    tx: UnboundedSender<Notice>,
}

impl OutputEvents {
    pub(crate) fn new(resource: ResourceId, tx: UnboundedSender<Notice>) -> Self {
        Self { resource, tx }
    }

    /// Resource this handle reports for
    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    pub fn progress(&self, position: Duration) {
        self.send(OutputEvent::Progress(position));
    }

    pub fn duration(&self, duration: Duration) {
        self.send(OutputEvent::Duration(duration));
    }

    pub fn ended(&self) {
        self.send(OutputEvent::Ended);
    }

    pub fn failed(&self, message: impl Into<String>) {
        self.send(OutputEvent::Failed(message.into()));
    }

    fn send(&self, event: OutputEvent) {
        let _ = self.tx.send(Notice::Output {
            resource: self.resource,
            event,
        });
    }
}

/// One bound audio stream
///
/// Implementors wrap a platform player (an HTML audio element, a rodio sink,
/// a cpal stream fed by a decoder). Only one resource is live at a time.
pub trait AudioResource: Send {
    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Playback started
    /// * `Err(_)` - The platform refused (autoplay policy, device busy, ...)
    fn start(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Seek to position in the stream
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Apply a linear gain (0.0 = silence, 1.0 = unity)
    fn set_gain(&mut self, gain: f32);

    /// Release the underlying stream; the resource is not used afterwards
    fn release(&mut self);

    /// Rewind to the beginning of the stream
    ///
    /// Equivalent to `seek(Duration::ZERO)`
    fn rewind(&mut self) -> Result<()> {
        self.seek(Duration::ZERO)
    }
}

/// Factory for audio resources
pub trait AudioOutput: Send {
    /// Bind a stream location to a fresh resource
    ///
    /// The resource must report runtime events through `events`.
    fn bind(&mut self, stream: &Url, events: OutputEvents) -> Result<Box<dyn AudioResource>>;
}
