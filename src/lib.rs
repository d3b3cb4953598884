//! # emuconsole
//!
//! A blocking client for the Android emulator console:
//! - Line-based command encoding (ASCII out, UTF-8 in)
//! - Response boundary detection from `OK` / `KO:` terminal markers
//! - Single-connection, single-outstanding-command sessions with timeouts
//! - Command helpers for `auth`, `avd` and `network`
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Console (facade)                        │
//! │          auth / avd / network → token lists                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ execute(tokens, timeout)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Session                              │
//! │        Closed ⇄ Open → Faulted,  one exchange at a time     │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │   Line Codec    │                │ Marker Matcher  │
//!   │ encode / decode │                │   classify()    │
//!   └─────────────────┘                └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use emuconsole::{Config, Console};
//!
//! let mut console = Console::connect(Config::default())?;
//! let response = console.avd("snapshot", "list")?;
//! println!("[{}] {}", response.outcome, response.body);
//! # Ok::<(), emuconsole::ConsoleError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod session;
pub mod console;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ConsoleError, Result};
pub use config::Config;
pub use protocol::{Outcome, Response};
pub use session::{Endpoint, Session, SessionState};
pub use console::Console;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of emuconsole
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
