//! Command definitions
//!
//! A command is an ordered list of tokens. The first token names the
//! command family, the rest are the subcommand and its arguments.

use std::fmt;

/// Command families understood by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFamily {
    /// Authenticate the session with the console auth token
    Auth,

    /// Virtual device management (snapshots, name, status, ...)
    Avd,

    /// Network emulation (delay, speed, status, ...)
    Network,
}

impl CommandFamily {
    /// The wire name of the family
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandFamily::Auth => "auth",
            CommandFamily::Avd => "avd",
            CommandFamily::Network => "network",
        }
    }
}

impl fmt::Display for CommandFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command built fresh for each exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    tokens: Vec<String>,
}

impl Command {
    /// Start a command for a known family
    pub fn new(family: CommandFamily) -> Self {
        Self::raw(family.as_str())
    }

    /// Start a command with an arbitrary first token
    pub fn raw(first: impl Into<String>) -> Self {
        Self {
            tokens: vec![first.into()],
        }
    }

    /// Append one token
    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.tokens.push(token.into());
        self
    }

    /// Append several tokens
    pub fn args<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The command line without its terminator
    pub fn line(&self) -> String {
        self.tokens.join(" ")
    }
}

impl AsRef<[String]> for Command {
    fn as_ref(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line())
    }
}
