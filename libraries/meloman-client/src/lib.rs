//! Meloman - Client
//!
//! Glue between the playback core and the Subsonic gateway:
//! - [`Settings`]: server credentials and playback tuning from a TOML file
//!   and `MELOMAN_*` environment variables
//! - [`Preferences`]: small JSON blobs in a key-value store (concert
//!   location, recommendation service, last volume)
//! - [`Session`]: a validated connection with a ready [`meloman_playback::Player`]

mod error;
pub mod preferences;
mod session;
mod settings;

pub use error::{ClientError, Result};
pub use preferences::{
    AudioMuseConfig, ConcertConfig, FileStore, KeyValueStore, MemoryStore, Preferences,
};
pub use session::Session;
pub use settings::{Settings, ENV_PREFIX};
