//! Published events: the event record and its opaque payload.
//!
//! ## Contents
//! - [`Event`] transient `(name, payload)` pair with sequence and timestamp
//! - [`Payload`] type-erased value attached by the publisher
//!
//! ## Quick reference
//! - **Producers**: [`Channel::publish`](crate::Channel::publish) builds one
//!   `Event` per call and clones it into every delivery task.
//! - **Consumers**: [`Subscribe::on_event`](crate::Subscribe::on_event).

mod event;
mod payload;

pub use event::Event;
pub use payload::Payload;
