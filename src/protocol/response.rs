//! Response definitions
//!
//! Represents a completed console reply.

use std::fmt;

/// How the console finished a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Terminated by `OK`
    Success,

    /// Terminated by `KO: <reason>`
    Failure,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => f.write_str("OK"),
            Outcome::Failure => f.write_str("KO"),
        }
    }
}

/// A decoded console response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Success or failure marker
    pub outcome: Outcome,

    /// Response text without the marker, trimmed. For a failure this is the
    /// reason following `KO:`.
    pub body: String,
}

impl Response {
    /// Create a success response
    pub fn success(body: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            body: body.into(),
        }
    }

    /// Create a failure response
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            body: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failure
    }

    /// Split into the body on success or the reason on failure
    pub fn into_result(self) -> std::result::Result<String, String> {
        match self.outcome {
            Outcome::Success => Ok(self.body),
            Outcome::Failure => Err(self.body),
        }
    }
}
