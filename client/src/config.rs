//! Connection settings.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use url::Url;

/// Delay between a lost connection and the next attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid server url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported url scheme {0:?}; expected http, https, ws or wss")]
    UnsupportedScheme(String),
    #[error("username must not be empty")]
    EmptyUsername,
}

/// How long to wait before each reconnection attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// The same delay every time.
    Fixed(Duration),
    /// Doubling from `initial` on each consecutive failure, capped at `max`.
    Exponential { initial: Duration, max: Duration },
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::Fixed(DEFAULT_RECONNECT_DELAY)
    }
}

impl ReconnectPolicy {
    /// Delay before attempt number `attempt`, counting from zero since the
    /// last successful open.
    #[must_use]
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(delay) => delay,
            Self::Exponential { initial, max } => {
                let factor = 1_u32.checked_shl(attempt).unwrap_or(u32::MAX);
                initial.saturating_mul(factor).min(max)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    server_url: Url,
    username: String,
    pub reconnect: ReconnectPolicy,
}

impl ClientConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the url does not parse, uses a scheme other
    /// than http(s) or ws(s), or the username is blank.
    pub fn new(server_url: &str, username: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(server_url).map_err(|source| ConfigError::InvalidUrl {
            url: server_url.to_owned(),
            source,
        })?;
        let socket_scheme = match url.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(ConfigError::UnsupportedScheme(other.to_owned())),
        };
        if url.set_scheme(socket_scheme).is_err() {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_owned()));
        }
        if username.trim().is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self {
            server_url: url,
            username: username.to_owned(),
            reconnect: ReconnectPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_reconnect(mut self, reconnect: ReconnectPolicy) -> Self {
        self.reconnect = reconnect;
        self
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The socket url, `<server>/ws/<username>`, reused for every reconnect.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let mut url = self.server_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("ws").push(&self.username);
        }
        url.into()
    }
}
