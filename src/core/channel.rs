//! # Channel: prefix-routed publish/subscribe bus.
//!
//! A [`Channel`] maps subscription prefixes to the subscribers registered
//! under them and fans every published event out to all matching ones.
//!
//! ## Architecture
//! ```text
//! subscribe(prefix, sub) ──► lock ──► map[prefix].push(sub) ──► unlock
//!
//! publish(name, payload)
//!        │
//!        ├──► lock
//!        ├──► for (prefix, subs) in map where match_mode.matches(prefix, name):
//!        │        for sub in subs: Dispatcher::deliver(sub, event)   (spawn, no await)
//!        └──► unlock, return number of scheduled deliveries
//! ```
//!
//! ## Rules
//! - One `tokio::sync::Mutex` per channel guards the subscription map; it is
//!   held only for the map phase of `subscribe`/`publish`, never while a
//!   subscriber runs.
//! - Subscriptions only accumulate. Subscribing the same subscriber twice
//!   yields two deliveries per matching publish.
//! - Each matching subscription receives exactly one delivery per publish.
//! - No ordering between deliveries, and no replay: a subscriber only sees
//!   events published after its `subscribe` call returned.
//!
//! ## Example
//! ```rust
//! use prefixbus::{Channel, Config, Event, Payload, SubscribeFn};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ch = Channel::new(&Config::default());
//!
//! ch.subscribe("order", SubscribeFn::arc("orders", |ev: Event| async move {
//!     println!("order event: {}", ev.name());
//!     Ok(())
//! }))
//! .await;
//!
//! assert_eq!(ch.publish("order.created", Payload::new(1_u64)).await, 1);
//! assert_eq!(ch.publish("shipment.sent", ()).await, 0);
//! # }
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::error::{BusError, SubscriberError};
use crate::events::{Event, Payload};
use crate::subscribers::{SubscribeFn, SubscriberRef};

use super::config::Config;
use super::dispatch::Dispatcher;
use super::matcher::MatchMode;

/// Label used in logs for channels that were not registered under a name.
const PRIVATE_LABEL: &str = "<private>";

/// Publish/subscribe bus with prefix routing.
pub struct Channel {
    name: Option<Arc<str>>,
    match_mode: MatchMode,
    subscribers: Mutex<HashMap<String, Vec<SubscriberRef>>>,
    dispatcher: Dispatcher,
}

impl Channel {
    /// Creates a private (unregistered) channel.
    ///
    /// Reachable only through the returned value; use
    /// [`Registry::create_channel`](crate::Registry::create_channel) for a
    /// named, shared channel.
    pub fn new(cfg: &Config) -> Self {
        Self::build(None, cfg)
    }

    /// Creates a channel that reports `name` (used by the registry).
    pub(crate) fn named(name: &str, cfg: &Config) -> Self {
        Self::build(Some(Arc::from(name)), cfg)
    }

    fn build(name: Option<Arc<str>>, cfg: &Config) -> Self {
        let label = name.clone().unwrap_or_else(|| Arc::from(PRIVATE_LABEL));
        Self {
            name,
            match_mode: cfg.match_mode,
            subscribers: Mutex::new(HashMap::new()),
            dispatcher: Dispatcher::new(label),
        }
    }

    /// Name this channel is registered under, `None` for private channels.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Prefix matching rule used by this channel.
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Registers `sub` under `prefix`.
    ///
    /// The empty prefix receives every event. Never fails; there is no way to
    /// remove a subscription afterwards.
    pub async fn subscribe(&self, prefix: impl Into<String>, sub: SubscriberRef) {
        let prefix = prefix.into();
        let mut map = self.subscribers.lock().await;

        tracing::debug!(
            channel = self.label(),
            prefix = %prefix,
            subscriber = sub.name(),
            "subscribe"
        );
        map.entry(prefix).or_default().push(sub);
    }

    /// Registers a closure under `prefix`.
    ///
    /// Shorthand for `subscribe(prefix, SubscribeFn::arc(name, f))`.
    pub async fn subscribe_fn<F, Fut>(
        &self,
        prefix: impl Into<String>,
        name: &'static str,
        f: F,
    ) where
        F: Fn(Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SubscriberError>> + Send + 'static,
    {
        self.subscribe(prefix, SubscribeFn::arc(name, f)).await;
    }

    /// Publishes an event to every matching subscription (fire-and-forget).
    ///
    /// Returns once all deliveries are scheduled, without waiting for any of
    /// them. The return value is the number of scheduled deliveries; callers
    /// are free to ignore it.
    pub async fn publish(&self, name: impl Into<Arc<str>>, payload: impl Into<Payload>) -> usize {
        let ev = Event::new(name, payload.into());
        let map = self.subscribers.lock().await;

        let mut scheduled = 0;
        for (prefix, subs) in map.iter() {
            if !self.match_mode.matches(prefix, ev.name()) {
                continue;
            }
            for sub in subs {
                self.dispatcher.deliver(Arc::clone(sub), ev.clone());
                scheduled += 1;
            }
        }
        drop(map);

        tracing::trace!(
            channel = self.label(),
            event = ev.name(),
            seq = ev.seq,
            deliveries = scheduled,
            "publish"
        );
        scheduled
    }

    /// Returns the sorted list of prefixes with at least one subscription.
    pub async fn prefixes(&self) -> Vec<String> {
        let map = self.subscribers.lock().await;
        let mut prefixes: Vec<String> = map.keys().cloned().collect();
        prefixes.sort_unstable();
        prefixes
    }

    /// Total number of subscriptions across all prefixes.
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.values().map(Vec::len).sum()
    }

    /// Number of deliveries currently running.
    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    /// Waits up to `grace` for in-flight deliveries to finish.
    ///
    /// Nothing is cancelled and publishing stays possible meanwhile; events
    /// published during the wait are waited for as well.
    ///
    /// # Errors
    /// [`BusError::GraceExceeded`] with the number of deliveries still running.
    pub async fn drain(&self, grace: Duration) -> Result<(), BusError> {
        match tokio::time::timeout(grace, self.idle()).await {
            Ok(()) => Ok(()),
            Err(_) => Err(BusError::GraceExceeded {
                grace,
                pending: self.in_flight(),
            }),
        }
    }

    /// Resolves once no delivery is in flight.
    pub(crate) async fn idle(&self) {
        self.dispatcher.idle().await;
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(PRIVATE_LABEL)
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("match_mode", &self.match_mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::Subscribe;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    const WAIT: Duration = Duration::from_secs(2);

    /// Subscriber that forwards `(tag, event name)` into a channel.
    struct Probe {
        tag: &'static str,
        tx: mpsc::UnboundedSender<(&'static str, String)>,
    }

    #[async_trait]
    impl Subscribe for Probe {
        async fn on_event(&self, ev: &Event) -> Result<(), SubscriberError> {
            let _ = self.tx.send((self.tag, ev.name().to_string()));
            Ok(())
        }

        fn name(&self) -> &str {
            self.tag
        }
    }

    fn probe(
        tag: &'static str,
        tx: &mpsc::UnboundedSender<(&'static str, String)>,
    ) -> SubscriberRef {
        Arc::new(Probe {
            tag,
            tx: tx.clone(),
        })
    }

    /// Drains the channel, then collects every delivery recorded so far.
    async fn collect(
        ch: &Channel,
        rx: &mut mpsc::UnboundedReceiver<(&'static str, String)>,
    ) -> Vec<(&'static str, String)> {
        ch.drain(WAIT).await.expect("deliveries did not finish");
        let mut got = Vec::new();
        while let Ok(item) = rx.try_recv() {
            got.push(item);
        }
        got.sort();
        got
    }

    #[tokio::test]
    async fn test_prefix_match_iff_starts_with() {
        let prefixes = ["", "o", "order", "order.created", "shipment"];
        let names = ["order", "order.created", "order.cancelled", "order2", "shipment.sent", ""];

        let ch = Channel::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        for p in prefixes {
            ch.subscribe(p, probe(p, &tx)).await;
        }

        for name in names {
            ch.publish(name, ()).await;
            let got = collect(&ch, &mut rx).await;

            let mut expected: Vec<(&'static str, String)> = prefixes
                .iter()
                .filter(|p| name.starts_with(**p))
                .map(|p| (*p, name.to_string()))
                .collect();
            expected.sort();
            assert_eq!(got, expected, "event {name:?}");
        }
    }

    #[tokio::test]
    async fn test_overlapping_prefixes() {
        let ch = Channel::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        ch.subscribe("order", probe("order", &tx)).await;
        ch.subscribe("order.created", probe("created", &tx)).await;

        assert_eq!(ch.publish("order.created", Payload::new(1_u64)).await, 2);
        let got = collect(&ch, &mut rx).await;
        assert_eq!(
            got,
            vec![
                ("created", "order.created".to_string()),
                ("order", "order.created".to_string()),
            ]
        );

        assert_eq!(ch.publish("order.cancelled", ()).await, 1);
        let got = collect(&ch, &mut rx).await;
        assert_eq!(got, vec![("order", "order.cancelled".to_string())]);
    }

    #[tokio::test]
    async fn test_literal_matching_hits_sibling_names() {
        let ch = Channel::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        ch.subscribe("order", probe("order", &tx)).await;

        ch.publish("order2", ()).await;
        assert_eq!(
            collect(&ch, &mut rx).await,
            vec![("order", "order2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_segment_mode_skips_sibling_names() {
        let cfg = Config {
            match_mode: MatchMode::Segment { separator: '.' },
            ..Config::default()
        };
        let ch = Channel::new(&cfg);
        let (tx, mut rx) = mpsc::unbounded_channel();
        ch.subscribe("order", probe("order", &tx)).await;

        assert_eq!(ch.publish("order2", ()).await, 0);
        assert_eq!(ch.publish("order.created", ()).await, 1);
        assert_eq!(
            collect(&ch, &mut rx).await,
            vec![("order", "order.created".to_string())]
        );
    }

    #[tokio::test]
    async fn test_duplicate_subscription_delivers_twice() {
        let ch = Channel::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sub = probe("dup", &tx);
        ch.subscribe("job", Arc::clone(&sub)).await;
        ch.subscribe("job", Arc::clone(&sub)).await;
        ch.subscribe("", sub).await;

        assert_eq!(ch.subscriber_count().await, 3);
        assert_eq!(ch.publish("job.done", ()).await, 3);
        assert_eq!(collect(&ch, &mut rx).await.len(), 3);
    }

    #[tokio::test]
    async fn test_each_match_invoked_exactly_once() {
        let ch = Channel::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tags = ["a", "b", "c", "d", "e", "f", "g", "h"];
        for tag in tags {
            ch.subscribe("", probe(tag, &tx)).await;
        }

        ch.publish("ping", ()).await;
        let got: Vec<&str> = collect(&ch, &mut rx)
            .await
            .into_iter()
            .map(|(tag, _)| tag)
            .collect();
        assert_eq!(got, tags.to_vec());
    }

    #[tokio::test]
    async fn test_no_replay_for_late_subscribers() {
        let ch = Channel::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        assert_eq!(ch.publish("order.created", ()).await, 0);
        ch.subscribe("order", probe("late", &tx)).await;

        assert!(collect(&ch, &mut rx).await.is_empty());
    }

    #[tokio::test]
    async fn test_failing_and_panicking_siblings_do_not_block_delivery() {
        let ch = Channel::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        ch.subscribe_fn("order", "panics", |ev: Event| async move {
            if ev.name().starts_with("order") {
                panic!("bad subscriber");
            }
            Ok(())
        })
        .await;
        ch.subscribe_fn("order", "fails", |_ev: Event| async move {
            Err(SubscriberError::fail("db unavailable"))
        })
        .await;
        ch.subscribe("order", probe("same-prefix", &tx)).await;
        ch.subscribe("", probe("other-prefix", &tx)).await;

        assert_eq!(ch.publish("order.created", ()).await, 4);
        let got = collect(&ch, &mut rx).await;
        assert_eq!(
            got,
            vec![
                ("other-prefix", "order.created".to_string()),
                ("same-prefix", "order.created".to_string()),
            ]
        );

        // the channel stays usable after a subscriber panicked
        assert_eq!(ch.publish("order.shipped", ()).await, 4);
        assert_eq!(collect(&ch, &mut rx).await.len(), 2);
    }

    #[tokio::test]
    async fn test_publish_does_not_wait_for_slow_subscriber() {
        let ch = Channel::default();
        let (release_tx, release_rx) = tokio::sync::watch::channel(false);

        ch.subscribe_fn("", "slow", move |_ev: Event| {
            let mut release = release_rx.clone();
            async move {
                let _ = release.wait_for(|go| *go).await;
                Ok(())
            }
        })
        .await;

        let scheduled = tokio::time::timeout(WAIT, ch.publish("tick", ()))
            .await
            .expect("publish blocked on a subscriber");
        assert_eq!(scheduled, 1);

        // still running; subscribe must not be blocked by it either
        tokio::time::timeout(WAIT, ch.subscribe_fn("x", "noop", |_ev: Event| async { Ok(()) }))
            .await
            .expect("subscribe blocked on a delivery");

        let err = ch.drain(Duration::from_millis(20)).await.unwrap_err();
        assert_eq!(
            err,
            BusError::GraceExceeded {
                grace: Duration::from_millis(20),
                pending: 1,
            }
        );

        release_tx.send(true).unwrap();
        ch.drain(WAIT).await.unwrap();
        assert_eq!(ch.in_flight(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_subscribe_and_publish() {
        let ch = Arc::new(Channel::default());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut handles = Vec::new();
        for i in 0..32 {
            let ch = Arc::clone(&ch);
            let tx = tx.clone();
            handles.push(tokio::spawn(async move {
                ch.subscribe(format!("p{i}"), probe("sub", &tx)).await;
                ch.publish(format!("p{i}.noise"), ()).await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        ch.drain(WAIT).await.unwrap();
        while rx.try_recv().is_ok() {}

        assert_eq!(ch.subscriber_count().await, 32);
        assert_eq!(ch.prefixes().await.len(), 32);

        // every completed subscribe is visible to a later publish
        for i in 0..32 {
            assert!(ch.publish(format!("p{i}.final"), ()).await >= 1);
        }
        let got = collect(&ch, &mut rx).await;
        let finals = got.iter().filter(|(_, n)| n.ends_with(".final")).count();
        // "p1" and "p2" also match their two-digit siblings, "p3" matches "p30" and "p31"
        assert_eq!(finals, 32 + 10 + 10 + 2);
    }

    #[test]
    fn test_private_channel_has_no_name() {
        let ch = Channel::default();
        assert_eq!(ch.name(), None);
        assert_eq!(ch.label(), PRIVATE_LABEL);
        assert_eq!(ch.match_mode(), MatchMode::Literal);
    }
}
