//! Protocol Module
//!
//! Line-based text protocol spoken by the emulator console.
//!
//! ## Request Format
//! ```text
//! ┌──────────┬───┬──────────┬───┬─────┬──────┐
//! │ family   │ ␠ │ token 1  │ ␠ │ ... │  LF  │
//! └──────────┴───┴──────────┴───┴─────┴──────┘
//! ```
//! Tokens are ASCII and joined by single spaces.
//!
//! ## Response Format
//! ```text
//! ┌─────────────────────────────┬──────────────────────┐
//! │  body (any UTF-8 text)      │ OK CRLF              │  success
//! ├─────────────────────────────┼──────────────────────┤
//! │  (ignored)                  │ KO: <reason> CRLF    │  failure
//! └─────────────────────────────┴──────────────────────┘
//! ```
//!
//! There is no length prefix and no request id. The only frame boundary is
//! the terminal marker, so exactly one command may be outstanding at a time.

mod command;
mod response;
mod codec;
mod marker;

pub use command::{Command, CommandFamily};
pub use response::{Outcome, Response};
pub use codec::{encode_command, decode_output, write_command, LINE_TERMINATOR};
pub use marker::{classify, Frame, FAILURE_MARKER, MARKER_TERMINATOR, SUCCESS_MARKER};
