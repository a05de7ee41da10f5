//! # prefixbus
//!
//! **prefixbus** is an in-process publish/subscribe event bus for tokio
//! applications.
//!
//! It lets independent subsystems (background polling loops, job runners,
//! loggers, notifiers) exchange notifications without holding references to
//! each other. Subscribers register under a string prefix; publishers emit
//! free-form event names with an opaque payload; every subscription whose
//! prefix matches the event name receives it on its own task.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ poll loop    │   │ job runner   │   │ http handler │      (publishers)
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ registry.channel("jobs")            │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry (explicitly constructed, shared as Arc<Registry>)       │
//! │  - name → Arc<Channel>                                            │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Channel                                                          │
//! │  - Mutex<HashMap<prefix, Vec<SubscriberRef>>>                     │
//! │  - publish(name, payload): match prefixes, schedule, return       │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   [task: sub A]     [task: sub B]      [task: sub N]        (one per delivery)
//!   catch_unwind      catch_unwind       catch_unwind
//!        │                  │                  │
//!   on_event(&Event)  on_event(&Event)   on_event(&Event)
//! ```
//!
//! ### Guarantees
//! - A subscription under `p` receives `publish(e, _)` iff `e` starts with `p`
//!   (the empty prefix receives everything).
//! - Each matching subscription gets exactly one delivery per publish.
//! - `publish` never waits for subscribers and has no failure mode.
//! - A failing or panicking subscriber is logged and affects nothing else.
//!
//! ### Not provided
//! - Ordered, durable, replayed or cross-process delivery.
//! - Unsubscribing: subscriptions live as long as their channel.
//! - Backpressure: many slow subscribers under a high publish rate grow the
//!   number of running tasks without bound.
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                    |
//! |-------------------|-------------------------------------------------------------|---------------------------------------|
//! | **Channels**      | Prefix-routed fan-out with failure isolation.               | [`Channel`], [`MatchMode`]            |
//! | **Registry**      | Named lookup of shared channels.                            | [`Registry`]                          |
//! | **Subscribers**   | Trait and closure adapter for callbacks.                    | [`Subscribe`], [`SubscribeFn`]        |
//! | **Events**        | Event record with opaque payload.                           | [`Event`], [`Payload`]                |
//! | **Errors**        | Typed errors for the registry and subscribers.              | [`BusError`], [`SubscriberError`]     |
//! | **Configuration** | Matching mode and shutdown grace.                           | [`Config`]                            |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], a subscriber logging every event via `tracing`.
//!
//! ## Example
//! ```rust
//! use prefixbus::{BusError, Config, Event, Payload, Registry};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), BusError> {
//!     let registry = Registry::new(Config::default());
//!     let orders = registry.create_channel("orders").await?;
//!
//!     orders
//!         .subscribe_fn("order", "audit", |ev: Event| async move {
//!             println!("{} {:?}", ev.name(), ev.payload().downcast_ref::<u64>());
//!             Ok(())
//!         })
//!         .await;
//!
//!     // elsewhere, without a direct reference
//!     let bus = registry.channel("orders").await?;
//!     bus.publish("order.created", Payload::new(1_u64)).await;
//!
//!     registry.shutdown().await
//! }
//! ```
mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Channel, Config, MatchMode, Registry};
pub use error::{BusError, SubscriberError};
pub use events::{Event, Payload};
pub use subscribers::{Subscribe, SubscribeFn, SubscriberRef};

// Optional: built-in logger subscriber.
// Enabled by default with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
