//! Token authentication parameters
//!
//! Subsonic authenticates every request with query parameters: the user
//! name, `t = md5(password + salt)` and the salt itself. The token is
//! derived once at login by the caller and stored; this client only
//! carries it.

use crate::types::ServerConfig;

/// REST protocol version announced to the server
pub const API_VERSION: &str = "1.8.0";

/// Client name announced to the server
pub const CLIENT_NAME: &str = "MelomanWeb";

/// Response format requested from the server
const FORMAT: &str = "json";

/// Credentials attached to every request
#[derive(Clone)]
pub struct Credentials {
    username: String,
    token: String,
    salt: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        token: impl Into<String>,
        salt: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            salt: salt.into(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.username, &config.token, &config.salt)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// All three parts present
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.token.is_empty() && !self.salt.is_empty()
    }

    /// Query pairs in the order the server documents them
    pub(crate) fn query_pairs(&self) -> [(&'static str, &str); 6] {
        [
            ("u", self.username.as_str()),
            ("t", self.token.as_str()),
            ("s", self.salt.as_str()),
            ("v", API_VERSION),
            ("c", CLIENT_NAME),
            ("f", FORMAT),
        ]
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}
