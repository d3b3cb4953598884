//! Response marker matching
//!
//! Decides, from everything received since a command was written, whether
//! the console has finished replying and how.
//!
//! Matching is anchored at the end of the buffer. Only the final
//! CRLF-terminated line can carry a marker, so text earlier in the buffer
//! (including a stray `OK\r\n` inside a longer reply) never ends a response
//! on its own once more bytes follow it.

use crate::error::Result;
use super::codec::decode_output;
use super::{Outcome, Response};

/// Literal ending a successful response
pub const SUCCESS_MARKER: &[u8] = b"OK";

/// Literal introducing a failure reason
pub const FAILURE_MARKER: &[u8] = b"KO:";

/// Line terminator after either marker
pub const MARKER_TERMINATOR: &[u8] = b"\r\n";

/// A complete response located in a receive buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub outcome: Outcome,

    /// Raw body bytes: text before `OK`, or the reason after `KO:`
    pub body: &'a [u8],
}

impl Frame<'_> {
    /// Decode the body into an owned response
    pub fn to_response(&self) -> Result<Response> {
        Ok(Response {
            outcome: self.outcome,
            body: decode_output(self.body)?,
        })
    }
}

/// Classify an accumulated receive buffer
///
/// Returns `None` while the response is incomplete. A final line containing
/// `KO:` is a failure even if it also ends in `OK`, e.g. `KO: not OK\r\n`.
pub fn classify(buffer: &[u8]) -> Option<Frame<'_>> {
    let content = buffer.strip_suffix(MARKER_TERMINATOR)?;

    let line_start = content
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let last_line = &content[line_start..];

    if let Some(pos) = find(last_line, FAILURE_MARKER) {
        return Some(Frame {
            outcome: Outcome::Failure,
            body: &last_line[pos + FAILURE_MARKER.len()..],
        });
    }

    content.strip_suffix(SUCCESS_MARKER).map(|body| Frame {
        outcome: Outcome::Success,
        body,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
