//! Session state

use std::fmt;

/// Connection state of a [`Session`](super::Session)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No stream. Initial state, and the state after `close()`
    Closed,

    /// Greeting consumed, ready for commands
    Open,

    /// Stream left mid-response or broken; must be closed and reopened
    Faulted,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Closed => f.write_str("closed"),
            SessionState::Open => f.write_str("open"),
            SessionState::Faulted => f.write_str("faulted"),
        }
    }
}
