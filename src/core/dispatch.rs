//! # Failure-isolated delivery.
//!
//! [`Dispatcher`] turns one `(subscriber, event)` pair into an independent
//! tokio task and makes sure nothing that happens inside the subscriber can
//! escape it.
//!
//! ## Rules
//! - `deliver()` never blocks and never fails.
//! - A subscriber returning `Err` is logged at `warn` level.
//! - A subscriber panic is caught (`catch_unwind`) and logged at `error` level.
//! - Deliveries are never cancelled and have no timeout.
//!
//! ## Diagram
//! ```text
//!    deliver(sub, ev)
//!        │
//!        └──► TaskTracker::spawn ──► catch_unwind(sub.on_event(&ev))
//!                                        ├─ Ok(Ok)   → done
//!                                        ├─ Ok(Err)  → warn!
//!                                        └─ Err(panic) → error!
//! ```
//!
//! The tracker is closed at construction: spawning on a closed tracker is
//! allowed, and `wait()` then resolves whenever no delivery is in flight.

use std::any::Any;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::task::TaskTracker;

use crate::events::Event;
use crate::subscribers::SubscriberRef;

/// Spawns and tracks deliveries for one channel.
pub(crate) struct Dispatcher {
    channel: Arc<str>,
    tracker: TaskTracker,
}

impl Dispatcher {
    /// Creates a dispatcher; `channel` is only used as a log field.
    pub(crate) fn new(channel: Arc<str>) -> Self {
        let tracker = TaskTracker::new();
        tracker.close();
        Self { channel, tracker }
    }

    /// Schedules one delivery of `ev` to `sub` (fire-and-forget).
    pub(crate) fn deliver(&self, sub: SubscriberRef, ev: Event) {
        let channel = Arc::clone(&self.channel);

        self.tracker.spawn(async move {
            let outcome = std::panic::AssertUnwindSafe(async { sub.on_event(&ev).await })
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::warn!(
                        channel = %channel,
                        subscriber = sub.name(),
                        event = ev.name(),
                        seq = ev.seq,
                        label = err.as_label(),
                        error = %err,
                        "subscriber failed"
                    );
                }
                Err(panic_err) => {
                    tracing::error!(
                        channel = %channel,
                        subscriber = sub.name(),
                        event = ev.name(),
                        seq = ev.seq,
                        info = %panic_message(&*panic_err),
                        "subscriber panicked"
                    );
                }
            }
        });
    }

    /// Number of deliveries currently in flight.
    pub(crate) fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Resolves once no delivery is in flight.
    pub(crate) async fn idle(&self) {
        self.tracker.wait().await;
    }
}

/// Extracts a readable message from a panic payload.
fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
