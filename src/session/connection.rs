//! Console Session
//!
//! Owns the TCP stream and runs one command/response exchange at a time.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use bytes::BytesMut;

use crate::config::Config;
use crate::error::{ConsoleError, Result};
use crate::protocol::{classify, encode_command, Response};
use super::{Endpoint, SessionState};

/// A connection to one emulator console
///
/// Created closed. [`open`](Session::open) connects and consumes the
/// greeting banner; [`execute`](Session::execute) then runs one command at a
/// time. A timeout, EOF or I/O failure mid-exchange moves the session to
/// [`SessionState::Faulted`], after which only `close()` and `open()` are
/// useful.
pub struct Session {
    /// Session configuration
    config: Config,

    /// Where `open()` connects
    endpoint: Endpoint,

    state: SessionState,

    /// Exclusively owned stream, `Some` only while open
    stream: Option<TcpStream>,

    /// Bytes received since the last command was written
    buffer: BytesMut,

    /// Decoded greeting banner from the last successful open
    greeting: Option<String>,

    log_commands: bool,
    log_output: bool,
}

impl Session {
    /// Create a closed session for the configured endpoint
    pub fn new(config: Config) -> Self {
        Self {
            endpoint: config.endpoint(),
            buffer: BytesMut::with_capacity(config.read_chunk_size),
            log_commands: config.log_commands,
            log_output: config.log_output,
            state: SessionState::Closed,
            stream: None,
            greeting: None,
            config,
        }
    }

    /// Create a session and open it
    pub fn connect(config: Config) -> Result<Self> {
        let mut session = Self::new(config);
        session.open()?;
        Ok(session)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Connect and consume the greeting banner
    ///
    /// Any existing stream is closed first. On failure the session is left
    /// closed: a connect failure is [`ConsoleError::Connect`], a banner with no
    /// marker within the greeting timeout is [`ConsoleError::Protocol`].
    pub fn open(&mut self) -> Result<()> {
        self.close();
        self.greeting = None;
        self.config.validate()?;

        if self.log_commands {
            tracing::info!(target: "emuconsole::command", "-> open {}", self.endpoint);
        }

        self.stream = Some(self.connect_stream()?);

        let timeout = self.config.greeting_timeout();
        let greeting = match self.read_response(timeout) {
            Ok(response) => response,
            Err(ConsoleError::Timeout(elapsed)) => {
                self.close();
                return Err(ConsoleError::Protocol(format!(
                    "no response marker in greeting from {} within {:?}",
                    self.endpoint, elapsed
                )));
            }
            Err(e) => {
                self.close();
                return Err(e);
            }
        };
        self.buffer.clear();

        tracing::debug!(
            "Connected to {} (greeting outcome: {})",
            self.endpoint,
            greeting.outcome
        );
        if self.log_output {
            tracing::info!(target: "emuconsole::output", "{}", greeting.body);
        }

        self.greeting = Some(greeting.body);
        self.state = SessionState::Open;
        Ok(())
    }

    /// Release the stream
    ///
    /// Idempotent; valid from every state.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
            tracing::debug!("Closed connection to {}", self.endpoint);
        }
        self.buffer.clear();
        self.state = SessionState::Closed;
    }

    // =========================================================================
    // Command Exchange
    // =========================================================================

    /// Send one command and wait for its response
    ///
    /// A `KO:` reply is returned as `Ok` with a failure outcome. Errors are
    /// reserved for client-side problems:
    /// - [`ConsoleError::NotConnected`] if the session is closed or faulted
    /// - [`ConsoleError::Encoding`] if a token is not plain ASCII
    /// - [`ConsoleError::Timeout`] if no marker arrives in time (faults)
    /// - [`ConsoleError::ConnectionClosed`] / [`ConsoleError::Io`] (faults)
    /// - [`ConsoleError::Decoding`] if the reply is not UTF-8
    pub fn execute<S: AsRef<str>>(&mut self, tokens: &[S], timeout: Duration) -> Result<Response> {
        if self.state != SessionState::Open {
            return Err(ConsoleError::NotConnected { state: self.state });
        }

        let message = encode_command(tokens)?;
        self.buffer.clear();

        if self.log_commands {
            let line = String::from_utf8_lossy(&message[..message.len() - 1]);
            tracing::info!(target: "emuconsole::command", "-> {}", line);
        }

        let result = self
            .write_message(&message)
            .and_then(|_| self.read_response(timeout));
        self.buffer.clear();

        match result {
            Ok(response) => {
                if self.log_output {
                    tracing::info!(target: "emuconsole::output", "{}", response.body);
                }
                Ok(response)
            }
            Err(e) => {
                if breaks_stream(&e) {
                    self.fault(&e);
                }
                Err(e)
            }
        }
    }

    /// Run a command with the configured default timeout
    pub fn execute_default<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<Response> {
        let timeout = self.config.command_timeout();
        self.execute(tokens, timeout)
    }

    // =========================================================================
    // Logging Switches
    // =========================================================================

    /// Enable or disable logging of outgoing commands
    pub fn enable_logging_command(&mut self, enabled: bool) -> &mut Self {
        self.log_commands = enabled;
        self
    }

    /// Enable or disable logging of console output
    pub fn enable_logging_output(&mut self, enabled: bool) -> &mut Self {
        self.log_output = enabled;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Greeting text consumed by the last successful `open()`
    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Resolve the endpoint and connect to the first reachable address
    fn connect_stream(&self) -> Result<TcpStream> {
        let connect_err = |source| ConsoleError::Connect {
            endpoint: self.endpoint.clone(),
            source,
        };

        let addrs = (self.endpoint.host.as_str(), self.endpoint.port)
            .to_socket_addrs()
            .map_err(connect_err)?;

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.config.connect_timeout()) {
                Ok(stream) => {
                    // Commands are single short lines; don't let Nagle hold them
                    stream.set_nodelay(true).map_err(connect_err)?;
                    stream
                        .set_write_timeout(Some(self.config.write_timeout()))
                        .map_err(connect_err)?;
                    return Ok(stream);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(connect_err(last_err.unwrap_or_else(|| {
            std::io::Error::new(ErrorKind::AddrNotAvailable, "host resolved to no addresses")
        })))
    }

    fn write_message(&mut self, message: &[u8]) -> Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or(ConsoleError::NotConnected { state: self.state })?;
        stream.write_all(message)?;
        stream.flush()?;
        Ok(())
    }

    /// Read until the buffer holds a complete response or `timeout` elapses
    fn read_response(&mut self, timeout: Duration) -> Result<Response> {
        let stream = self
            .stream
            .as_mut()
            .ok_or(ConsoleError::NotConnected { state: self.state })?;

        let deadline = Instant::now() + timeout;
        let mut chunk = vec![0u8; self.config.read_chunk_size];

        loop {
            if let Some(frame) = classify(&self.buffer) {
                return frame.to_response();
            }

            if self.buffer.len() > self.config.max_response_size {
                return Err(ConsoleError::Protocol(format!(
                    "response exceeded {} bytes without a marker",
                    self.config.max_response_size
                )));
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ConsoleError::Timeout(timeout));
            }
            stream.set_read_timeout(Some(remaining))?;

            match stream.read(&mut chunk) {
                Ok(0) => return Err(ConsoleError::ConnectionClosed),
                Ok(n) => {
                    tracing::trace!("Read {} bytes from {}", n, self.endpoint);
                    self.buffer.extend_from_slice(&chunk[..n]);
                }
                // Read timeout (Windows uses TimedOut instead of WouldBlock)
                Err(ref e)
                    if matches!(
                        e.kind(),
                        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                    ) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Drop the stream after an exchange left it unusable
    fn fault(&mut self, cause: &ConsoleError) {
        tracing::warn!("Session to {} faulted: {}", self.endpoint, cause);
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        self.buffer.clear();
        self.state = SessionState::Faulted;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

/// Errors after which the stream position is unknown
fn breaks_stream(error: &ConsoleError) -> bool {
    matches!(
        error,
        ConsoleError::Io(_)
            | ConsoleError::Timeout(_)
            | ConsoleError::ConnectionClosed
            | ConsoleError::Protocol(_)
    )
}
