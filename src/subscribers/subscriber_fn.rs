//! # Function-backed subscriber (`SubscribeFn`)
//!
//! [`SubscribeFn`] wraps a closure `F: Fn(Event) -> Fut`, producing a fresh
//! future per delivery. The closure receives an owned [`Event`] (a cheap
//! clone), so the returned future can be `'static` without borrowing.
//!
//! ## Concurrency semantics
//! - Every delivery calls the closure again and gets a **new** future.
//! - There is no hidden state between deliveries; share state explicitly via
//!   `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use prefixbus::{Event, Subscribe, SubscribeFn, SubscriberRef};
//!
//! let s: SubscriberRef = SubscribeFn::arc("printer", |ev: Event| async move {
//!     println!("got {}", ev.name());
//!     Ok(())
//! });
//!
//! assert_eq!(s.name(), "printer");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SubscriberError;
use crate::events::Event;
use crate::subscribers::Subscribe;

/// Function-backed subscriber implementation.
#[derive(Debug)]
pub struct SubscribeFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F, Fut> SubscribeFn<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SubscriberError>> + Send + 'static,
{
    /// Creates a new function-backed subscriber.
    ///
    /// Prefer [`SubscribeFn::arc`] when you immediately need a [`SubscriberRef`](crate::SubscriberRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the subscriber and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Subscribe for SubscribeFn<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SubscriberError>> + Send + 'static,
{
    async fn on_event(&self, event: &Event) -> Result<(), SubscriberError> {
        (self.f)(event.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
