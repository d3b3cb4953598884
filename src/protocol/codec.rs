//! Protocol codec
//!
//! Encoding of outgoing command lines and decoding of console output.
//!
//! Outgoing commands are restricted to ASCII: tokens are auth tokens, enum
//! names and identifiers. Incoming output may echo arbitrary device text and
//! is decoded as UTF-8. Neither direction substitutes replacement characters.

use std::io::Write;

use crate::error::{ConsoleError, Result};

/// Terminator appended to every command line
pub const LINE_TERMINATOR: u8 = b'\n';

/// Whitespace stripped from decoded output
const TRIM_CHARS: [char; 4] = [' ', '\t', '\r', '\n'];

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: tokens joined by single spaces, then `\n`.
pub fn encode_command<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<u8>> {
    if tokens.is_empty() {
        return Err(ConsoleError::InvalidArguments(
            "command has no tokens".to_string(),
        ));
    }

    let len = tokens.iter().map(|t| t.as_ref().len() + 1).sum();
    let mut message = Vec::with_capacity(len);

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        if let Some(c) = token.chars().find(|c| !c.is_ascii() || *c == '\r' || *c == '\n') {
            return Err(ConsoleError::Encoding {
                token: token.to_string(),
                byte: c as u32,
            });
        }

        if i > 0 {
            message.push(b' ');
        }
        message.extend_from_slice(token.as_bytes());
    }
    message.push(LINE_TERMINATOR);

    Ok(message)
}

/// Write a command to a stream
pub fn write_command<W: Write, S: AsRef<str>>(writer: &mut W, tokens: &[S]) -> Result<()> {
    let bytes = encode_command(tokens)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Output Decoding
// =============================================================================

/// Decode console output as UTF-8 and strip surrounding protocol whitespace
pub fn decode_output(bytes: &[u8]) -> Result<String> {
    let text = String::from_utf8(bytes.to_vec())?;
    Ok(text.trim_matches(&TRIM_CHARS[..]).to_string())
}
