//! # Events published on a channel.
//!
//! An [`Event`] is a transient `(name, payload)` pair created by
//! [`Channel::publish`](crate::Channel::publish). It exists only while its
//! deliveries are in flight; nothing is persisted.
//!
//! The struct also carries metadata useful for logs:
//! - `seq`: process-wide sequence number, increasing monotonically
//! - `at`: wall-clock timestamp taken when the event was published
//!
//! ## Ordering
//! Deliveries carry no ordering guarantee. `seq` can be used to restore
//! publish order when a subscriber observes events out of order.
//!
//! ## Example
//! ```rust
//! use prefixbus::{Event, Payload};
//!
//! let ev = Event::new("order.created", Payload::new(42_u64));
//!
//! assert_eq!(ev.name(), "order.created");
//! assert_eq!(ev.payload().downcast_ref::<u64>(), Some(&42));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use super::payload::Payload;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// A published event.
///
/// Cheap to clone: the name and payload are shared behind `Arc`s, so every
/// delivery task can own its copy.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    name: Arc<str>,
    payload: Payload,
}

impl Event {
    /// Creates a new event with the current timestamp and next sequence number.
    pub fn new(name: impl Into<Arc<str>>, payload: Payload) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            name: name.into(),
            payload,
        }
    }

    /// Free-form event name the routing prefixes are matched against.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque payload attached by the publisher.
    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new("a", Payload::empty());
        let b = Event::new("b", Payload::empty());
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_clone_shares_payload() {
        let ev = Event::new("job.done", Payload::new(String::from("report.csv")));
        let copy = ev.clone();

        assert_eq!(copy.seq, ev.seq);
        assert_eq!(copy.name(), "job.done");
        assert!(ev.payload().ptr_eq(copy.payload()));
    }
}
