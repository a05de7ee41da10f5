//! # LogWriter — event logger
//!
//! A minimal subscriber that logs every incoming [`Event`] through `tracing`.
//! Subscribe it with the empty prefix to observe all traffic on a channel.
//!
//! ## Example output (with `tracing-subscriber` fmt layer)
//! ```text
//! INFO prefixbus::subscribers::embedded::log: received event event="order.created" seq=3
//! INFO prefixbus::subscribers::embedded::log: received event event="job.progress" seq=4
//! ```

use async_trait::async_trait;

use crate::error::SubscriberError;
use crate::events::Event;
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) -> Result<(), SubscriberError> {
        tracing::info!(event = e.name(), seq = e.seq, "received event");
        Ok(())
    }

    fn name(&self) -> &str {
        "LogWriter"
    }
}
