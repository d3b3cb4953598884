//! Console Facade
//!
//! Builds commands for the `auth`, `avd` and `network` families.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{ConsoleError, Result};
use crate::protocol::{Command, CommandFamily, Response};
use crate::session::Session;
use super::{NetworkDelay, NetworkSpeed};

/// Whitespace stripped from an auth token file
const TOKEN_TRIM_CHARS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Split an argument string using shell quoting rules
pub fn tokenize(args: &str) -> Result<Vec<String>> {
    shlex::split(args)
        .ok_or_else(|| ConsoleError::InvalidArguments(format!("unbalanced quotes in {:?}", args)))
}

/// High-level client for one emulator console
pub struct Console {
    session: Session,
}

impl Console {
    /// Wrap an existing session
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Connect with the given config and consume the greeting
    pub fn connect(config: Config) -> Result<Self> {
        Ok(Self::new(Session::connect(config)?))
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Authenticate with the token stored at `path`
    pub fn auth(&mut self, path: impl AsRef<Path>) -> Result<Response> {
        let path = path.as_ref();
        let token = fs::read_to_string(path).map_err(|source| ConsoleError::TokenFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.auth_token(&token)
    }

    /// Authenticate with an in-memory token
    pub fn auth_token(&mut self, token: &str) -> Result<Response> {
        let token = token.trim_matches(&TOKEN_TRIM_CHARS[..]);
        self.run(&Command::new(CommandFamily::Auth).arg(token))
    }

    // =========================================================================
    // Device Management
    // =========================================================================

    /// Run `avd <subcommand> [args...]`
    pub fn avd(&mut self, subcommand: &str, args: &str) -> Result<Response> {
        let command = Command::new(CommandFamily::Avd)
            .arg(subcommand)
            .args(tokenize(args)?);
        self.run(&command)
    }

    // =========================================================================
    // Network Emulation
    // =========================================================================

    /// Run `network <subcommand> [args...]`
    pub fn network(&mut self, subcommand: &str, args: &str) -> Result<Response> {
        let command = Command::new(CommandFamily::Network)
            .arg(subcommand)
            .args(tokenize(args)?);
        self.run(&command)
    }

    /// Set the emulated network latency
    pub fn network_delay(&mut self, delay: NetworkDelay) -> Result<Response> {
        self.run(
            &Command::new(CommandFamily::Network)
                .arg("delay")
                .arg(delay.token()),
        )
    }

    /// Set the emulated network bandwidth
    pub fn network_speed(&mut self, speed: NetworkSpeed) -> Result<Response> {
        self.run(
            &Command::new(CommandFamily::Network)
                .arg("speed")
                .arg(speed.token()),
        )
    }

    // =========================================================================
    // Raw Access
    // =========================================================================

    /// Run an arbitrary token list with the default timeout
    pub fn execute<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<Response> {
        self.session.execute_default(tokens)
    }

    /// Run a prebuilt command with the default timeout
    pub fn run(&mut self, command: &Command) -> Result<Response> {
        self.session.execute_default(command.tokens())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Close the underlying session
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Give back the session
    pub fn into_session(self) -> Session {
        self.session
    }
}
