//! # Bus configuration.
//!
//! Provides [`Config`], the settings shared by a [`Registry`](crate::Registry)
//! and every channel it creates.
//!
//! Config is used in two ways:
//! 1. **Registry creation**: `Registry::new(config)`; registered channels inherit it.
//! 2. **Private channels**: `Channel::new(&config)`.
//!
//! ## Sentinel values
//! - `drain_grace = 0s` → `Registry::shutdown` does not wait for deliveries

use std::time::Duration;

use super::matcher::MatchMode;

/// Configuration for channels and the registry.
///
/// ## Field semantics
/// - `match_mode`: how prefixes are compared with event names (default: literal)
/// - `drain_grace`: maximum wait for in-flight deliveries on shutdown (`0s` = no wait)
#[derive(Clone, Debug)]
pub struct Config {
    /// Prefix matching rule applied by every channel built from this config.
    pub match_mode: MatchMode,

    /// Maximum time [`Registry::shutdown`](crate::Registry::shutdown) waits for
    /// in-flight deliveries.
    ///
    /// Deliveries are never cancelled; exceeding the grace period only
    /// reports `BusError::GraceExceeded`.
    pub drain_grace: Duration,
}

impl Config {
    /// Returns the shutdown grace period as an `Option`.
    ///
    /// - `None` → do not wait
    /// - `Some(d)` → wait up to `d`
    #[inline]
    pub fn drain_grace_opt(&self) -> Option<Duration> {
        if self.drain_grace == Duration::ZERO {
            None
        } else {
            Some(self.drain_grace)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `match_mode = MatchMode::Literal`
    /// - `drain_grace = 5s`
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            drain_grace: Duration::from_secs(5),
        }
    }
}
