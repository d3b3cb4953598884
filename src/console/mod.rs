//! Console Module
//!
//! Command builders layered over a [`Session`](crate::session::Session).
//!
//! Each helper assembles `[family, subcommand, args...]` and runs it with the
//! session's default timeout. Argument strings are split with shell quoting
//! rules, so `avd("snapshot", "save 'my snap'")` sends three tokens after the
//! family.

mod facade;
mod network;

pub use facade::{tokenize, Console};
pub use network::{NetworkDelay, NetworkSpeed};
