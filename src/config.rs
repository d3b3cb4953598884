//! Configuration for emuconsole
//!
//! Centralized session configuration with sensible defaults.

use std::time::Duration;

use crate::error::{ConsoleError, Result};
use crate::session::Endpoint;

/// Default console host
pub const DEFAULT_HOST: &str = "localhost";

/// Default console port (first emulator instance)
pub const DEFAULT_PORT: u16 = 5554;

/// Main configuration for a console session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint Configuration
    // -------------------------------------------------------------------------
    /// Console host name or address
    pub host: String,

    /// Console TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Timeout Configuration
    // -------------------------------------------------------------------------
    /// TCP connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Time allowed for the greeting banner after connect (milliseconds)
    pub greeting_timeout_ms: u64,

    /// Default per-command response timeout (milliseconds)
    pub command_timeout_ms: u64,

    /// Socket write timeout (milliseconds)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Buffer Configuration
    // -------------------------------------------------------------------------
    /// Upper bound on a single response before it is treated as unframed
    pub max_response_size: usize,

    /// Bytes requested per socket read
    pub read_chunk_size: usize,

    // -------------------------------------------------------------------------
    // Logging Configuration
    // -------------------------------------------------------------------------
    /// Log each outgoing command line
    pub log_commands: bool,

    /// Log each incoming response body
    pub log_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: 10_000,
            greeting_timeout_ms: 10_000,
            command_timeout_ms: 10_000,
            write_timeout_ms: 5_000,
            max_response_size: 16 * 1024 * 1024, // 16 MB
            read_chunk_size: 4096,
            log_commands: true,
            log_output: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The endpoint this config points at
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn greeting_timeout(&self) -> Duration {
        Duration::from_millis(self.greeting_timeout_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Reject values that would make a session unusable
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ConsoleError::Config("host must not be empty".to_string()));
        }

        let timeouts = [
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("greeting_timeout_ms", self.greeting_timeout_ms),
            ("command_timeout_ms", self.command_timeout_ms),
            ("write_timeout_ms", self.write_timeout_ms),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                return Err(ConsoleError::Config(format!("{} must be greater than zero", name)));
            }
        }

        if self.read_chunk_size == 0 {
            return Err(ConsoleError::Config(
                "read_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.max_response_size < self.read_chunk_size {
            return Err(ConsoleError::Config(format!(
                "max_response_size ({}) must be at least read_chunk_size ({})",
                self.max_response_size, self.read_chunk_size
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the console host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the console port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the greeting timeout (in milliseconds)
    pub fn greeting_timeout_ms(mut self, ms: u64) -> Self {
        self.config.greeting_timeout_ms = ms;
        self
    }

    /// Set the default command timeout (in milliseconds)
    pub fn command_timeout_ms(mut self, ms: u64) -> Self {
        self.config.command_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the maximum accepted response size (in bytes)
    pub fn max_response_size(mut self, size: usize) -> Self {
        self.config.max_response_size = size;
        self
    }

    /// Set the per-read chunk size (in bytes)
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.config.read_chunk_size = size;
        self
    }

    /// Enable or disable command logging
    pub fn log_commands(mut self, enabled: bool) -> Self {
        self.config.log_commands = enabled;
        self
    }

    /// Enable or disable output logging
    pub fn log_output(mut self, enabled: bool) -> Self {
        self.config.log_output = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
