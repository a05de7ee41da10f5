//! # Event subscriber trait.
//!
//! Provides [`Subscribe`], the callback registered on a
//! [`Channel`](crate::Channel) under a prefix.
//!
//! Each matching publish gives the subscriber:
//! - **Its own tokio task** (one per delivery, not one per subscriber)
//! - **Panic isolation** (panics are caught and logged)
//! - **Error isolation** (a returned [`SubscriberError`] is logged and dropped)
//!
//! ## Architecture
//! ```text
//! Channel::publish ──► Dispatcher::deliver ──► tokio::spawn ──► subscriber.on_event()
//!                                                  └─► Err / panic → tracing (warn / error)
//! ```
//!
//! ## Rules
//! - A slow subscriber only delays its own delivery task.
//! - Deliveries of one subscriber may overlap each other; there is no per-subscriber queue.
//! - Subscribers never block publishers or each other.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use prefixbus::{Event, Subscribe, SubscriberError};
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Subscribe for Audit {
//!     async fn on_event(&self, ev: &Event) -> Result<(), SubscriberError> {
//!         if ev.payload().is_empty() {
//!             return Err(SubscriberError::fail("missing payload"));
//!         }
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str { "audit" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SubscriberError;
use crate::events::Event;

/// Shared handle to a subscriber, as stored in a channel's subscription map.
pub type SubscriberRef = Arc<dyn Subscribe>;

/// Callback invoked for every matching event.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally where possible; anything returned is only logged.
/// - Be prepared for concurrent invocations: the same subscriber may be
///   running for several events at once.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated delivery task, never in the publisher context.
    /// Panics are caught by the dispatcher.
    async fn on_event(&self, event: &Event) -> Result<(), SubscriberError>;

    /// Returns the subscriber name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
