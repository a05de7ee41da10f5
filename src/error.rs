//! Error types used by the bus and its subscribers.
//!
//! This module defines two error enums:
//!
//! - [`BusError`] — errors raised by the registry and channels.
//! - [`SubscriberError`] — errors returned by subscriber callbacks.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging.
//! A [`SubscriberError`] never reaches the publisher: the dispatcher logs it
//! and moves on.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the bus.
///
/// All variants are recoverable. A `DuplicateName` is typically answered by
/// looking up the existing channel instead.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// A channel with this name is already registered; the existing entry was left untouched.
    #[error("channel {name:?} already exists")]
    DuplicateName {
        /// The requested channel name.
        name: String,
    },

    /// No channel is registered under this name.
    #[error("channel {name:?} not found")]
    ChannelNotFound {
        /// The requested channel name.
        name: String,
    },

    /// Draining exceeded its grace period with deliveries still running.
    #[error("drain timeout {grace:?} exceeded; {pending} deliveries still running")]
    GraceExceeded {
        /// The grace duration that was exceeded.
        grace: Duration,
        /// Number of deliveries still in flight when the grace period ended.
        pending: usize,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use prefixbus::BusError;
    ///
    /// let err = BusError::DuplicateName { name: "orders".into() };
    /// assert_eq!(err.as_label(), "bus_duplicate_name");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::DuplicateName { .. } => "bus_duplicate_name",
            BusError::ChannelNotFound { .. } => "bus_channel_not_found",
            BusError::GraceExceeded { .. } => "bus_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::DuplicateName { name } => format!("duplicate channel name: {name}"),
            BusError::ChannelNotFound { name } => format!("unknown channel: {name}"),
            BusError::GraceExceeded { grace, pending } => {
                format!("grace exceeded after {grace:?}; pending deliveries={pending}")
            }
        }
    }
}

/// # Errors returned by subscriber callbacks.
///
/// Logged by the dispatcher at `warn` level and otherwise discarded.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SubscriberError {
    /// The callback could not handle the event.
    #[error("handler failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },
}

impl SubscriberError {
    /// Shorthand for [`SubscriberError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        SubscriberError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscriberError::Fail { .. } => "subscriber_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubscriberError::Fail { error } => format!("error: {error}"),
        }
    }
}
