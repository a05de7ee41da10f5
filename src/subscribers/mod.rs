//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the closure adapter
//! [`SubscribeFn`], and built-in implementations.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Publisher ── publish(name, payload) ──► Channel ──► every matching prefix
//!                                                           │
//!                                                           ├──► Subscribe::on_event(&Event)
//!                                                           │         │
//!                                                           │    ┌────┴────┬─────────┐
//!                                                           │    ▼         ▼         ▼
//!                                                           │  LogWriter  JobSink  Custom ...
//!                                                           │
//!                                                           └──► (one tokio task per delivery)
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use prefixbus::{Event, Subscribe, SubscriberError};
//! use async_trait::async_trait;
//!
//! struct SlackNotifier;
//!
//! #[async_trait]
//! impl Subscribe for SlackNotifier {
//!     async fn on_event(&self, event: &Event) -> Result<(), SubscriberError> {
//!         if event.name().starts_with("job.failed") {
//!             // post a message
//!         }
//!         Ok(())
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod embedded;
mod subscriber;
mod subscriber_fn;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use subscriber::{Subscribe, SubscriberRef};
pub use subscriber_fn::SubscribeFn;
