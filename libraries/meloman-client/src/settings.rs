/// Client settings
use crate::error::{ClientError, Result};
use meloman_playback::PlaybackConfig;
use meloman_subsonic::ServerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix (`MELOMAN_SERVER__URL`, `MELOMAN_PLAYBACK__VOLUME`)
pub const ENV_PREFIX: &str = "MELOMAN";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    /// JSON file backing the preference store
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
}

impl Settings {
    /// Load settings from an optional TOML file and the environment
    ///
    /// A missing file is not an error. Environment variables win over the
    /// file; nested keys use a double underscore.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                builder = builder.add_source(config::File::from(path.to_path_buf()));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if url.is_empty() {
            return Err(ClientError::Config(
                "Server URL is required (set MELOMAN_SERVER__URL)".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "Server URL must start with http:// or https:// (got {})",
                url
            )));
        }

        if self.server.username.is_empty() {
            return Err(ClientError::Config(
                "Username is required (set MELOMAN_SERVER__USERNAME)".to_string(),
            ));
        }

        if self.server.token.is_empty() || self.server.salt.is_empty() {
            return Err(ClientError::Config(
                "Token and salt are required".to_string(),
            ));
        }

        if self.playback.volume > 100 {
            return Err(ClientError::Config(format!(
                "Volume must be between 0 and 100 (got {})",
                self.playback.volume
            )));
        }

        if self.playback.accent_sample_step == 0 {
            return Err(ClientError::Config(
                "Accent sample step must be at least 1".to_string(),
            ));
        }

        if self.playback.lyrics_cache_capacity == 0 {
            return Err(ClientError::Config(
                "Lyrics cache capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            playback: PlaybackConfig::default(),
            preferences_path: default_preferences_path(),
        }
    }
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("./meloman-preferences.json")
}
