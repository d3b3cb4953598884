//! Session Module
//!
//! A single TCP connection to an emulator console and its protocol state.
//!
//! ## Lifecycle
//! ```text
//!            open()                 timeout / EOF / I/O error
//!  Closed ───────────▶ Open ───────────────────────────────▶ Faulted
//!    ▲                  │                                      │
//!    └──── close() ─────┴────────────── close() ◀──────────────┘
//! ```
//!
//! ## Concurrency
//! - One outstanding command per session, enforced by `&mut self`
//! - No internal locking; open more sessions for parallel command streams

mod endpoint;
mod state;
mod connection;

pub use endpoint::Endpoint;
pub use state::SessionState;
pub use connection::Session;
