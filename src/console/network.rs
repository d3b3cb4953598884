//! Network emulation profiles
//!
//! Values accepted by `network delay` and `network speed`.

use std::fmt;

/// Latency profile for `network delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkDelay {
    None,
    Umts,
    Edge,
    Gprs,

    /// Custom latency range in milliseconds
    Custom { low_ms: u32, high_ms: u32 },
}

/// Bandwidth profile for `network speed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkSpeed {
    Gsm,
    Hscsd,
    Gprs,
    Edge,
    Umts,
    Hsdpa,
    Lte,
    Evdo,
    Full,

    /// Custom bandwidth range in kb/s
    Custom { low_kbps: u32, high_kbps: u32 },
}

impl NetworkDelay {
    /// The single argument token for this profile
    pub fn token(&self) -> String {
        match self {
            NetworkDelay::None => "none".to_string(),
            NetworkDelay::Umts => "umts".to_string(),
            NetworkDelay::Edge => "edge".to_string(),
            NetworkDelay::Gprs => "gprs".to_string(),
            NetworkDelay::Custom { low_ms, high_ms } => format!("{}:{}", low_ms, high_ms),
        }
    }
}

impl NetworkSpeed {
    /// The single argument token for this profile
    pub fn token(&self) -> String {
        let name = match self {
            NetworkSpeed::Gsm => "gsm",
            NetworkSpeed::Hscsd => "hscsd",
            NetworkSpeed::Gprs => "gprs",
            NetworkSpeed::Edge => "edge",
            NetworkSpeed::Umts => "umts",
            NetworkSpeed::Hsdpa => "hsdpa",
            NetworkSpeed::Lte => "lte",
            NetworkSpeed::Evdo => "evdo",
            NetworkSpeed::Full => "full",
            NetworkSpeed::Custom { low_kbps, high_kbps } => {
                return format!("{}:{}", low_kbps, high_kbps)
            }
        };
        name.to_string()
    }
}

impl fmt::Display for NetworkDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl fmt::Display for NetworkSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}
