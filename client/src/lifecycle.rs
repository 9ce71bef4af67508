//! Connection state machine, free of I/O.
//!
//! DESIGN
//! ======
//! The socket task drives this machine and performs whatever it returns: the
//! message to send when the socket opens, the delay to sleep before the next
//! attempt. Keeping the transitions here means the "one pending reconnect" and
//! "`RequestInit` first" rules can be checked without a network.
//!
//! ```text
//! Connecting -> Open -> Closed -> Waiting -> Connecting ...
//!     \___________________/            (connect failure also closes)
//! any state -> Stopped                 (explicit close)
//! ```

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::fmt;
use std::time::Duration;

use frames::Message;

use crate::config::ReconnectPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
    /// A reconnect is scheduled.
    Waiting,
    /// Torn down by the application; no further attempts.
    Stopped,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Waiting => "waiting",
            Self::Stopped => "stopped",
        })
    }
}

#[derive(Debug)]
pub struct Lifecycle {
    state: ConnectionState,
    policy: ReconnectPolicy,
    failures: u32,
    pending_reconnect: bool,
}

impl Lifecycle {
    #[must_use]
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self { state: ConnectionState::Connecting, policy, failures: 0, pending_reconnect: false }
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Number of reconnects currently scheduled; never more than one.
    #[must_use]
    pub fn pending_reconnects(&self) -> usize {
        usize::from(self.pending_reconnect)
    }

    /// The socket opened. Returns the resync request that must go out before
    /// anything else, or `None` if the connection was stopped meanwhile.
    pub fn on_open(&mut self) -> Option<Message> {
        if self.state != ConnectionState::Connecting {
            return None;
        }
        self.state = ConnectionState::Open;
        self.failures = 0;
        Some(Message::RequestInit)
    }

    /// The socket closed or a connect attempt failed.
    pub fn on_close(&mut self) {
        if matches!(self.state, ConnectionState::Connecting | ConnectionState::Open) {
            self.state = ConnectionState::Closed;
        }
    }

    /// Schedule the next attempt. Returns the delay to wait, or `None` when a
    /// reconnect is already pending or the connection is not closed.
    pub fn schedule_reconnect(&mut self) -> Option<Duration> {
        if self.state != ConnectionState::Closed || self.pending_reconnect {
            return None;
        }
        let delay = self.policy.delay(self.failures);
        self.failures = self.failures.saturating_add(1);
        self.pending_reconnect = true;
        self.state = ConnectionState::Waiting;
        Some(delay)
    }

    /// The reconnect delay elapsed. Returns `true` if a new attempt should
    /// start now.
    pub fn on_retry(&mut self) -> bool {
        if self.state != ConnectionState::Waiting || !self.pending_reconnect {
            return false;
        }
        self.pending_reconnect = false;
        self.state = ConnectionState::Connecting;
        true
    }

    /// Stop for good, cancelling any pending reconnect.
    pub fn stop(&mut self) {
        self.pending_reconnect = false;
        self.state = ConnectionState::Stopped;
    }
}
