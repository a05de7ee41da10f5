//! # Channel registry - named directory of shared channels.
//!
//! Subsystems that need a shared bus (background loops, job runners, loggers)
//! look it up by name instead of receiving the channel explicitly.
//!
//! ## Architecture
//! ```text
//! Arc<Registry> (constructed once, passed to whoever needs it)
//!   └─► RwLock<HashMap<name, Arc<Channel>>>
//!         ├─► create_channel(name)      → insert, or DuplicateName (entry untouched)
//!         ├─► channel(name)             → Arc<Channel>, or ChannelNotFound
//!         ├─► channel_or_create(name)   → existing or newly inserted
//!         └─► drain(grace) / shutdown() → wait for in-flight deliveries
//! ```
//!
//! ## Rules
//! - Names are unique; the empty name is never registered (it yields a private channel).
//! - Entries are never removed; a registered channel lives as long as the registry.
//! - Every channel created here inherits the registry [`Config`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::RwLock;

use crate::error::BusError;

use super::channel::Channel;
use super::config::Config;

/// Directory mapping channel names to shared channels.
pub struct Registry {
    channels: RwLock<HashMap<String, Arc<Channel>>>,
    cfg: Config,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(cfg: Config) -> Arc<Self> {
        Arc::new(Self {
            channels: RwLock::new(HashMap::new()),
            cfg,
        })
    }

    /// Configuration applied to channels created by this registry.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Creates a channel and registers it under `name`.
    ///
    /// An empty `name` returns a private channel that is not registered.
    ///
    /// # Errors
    /// [`BusError::DuplicateName`] if `name` is taken; the registered channel is left as is.
    pub async fn create_channel(&self, name: &str) -> Result<Arc<Channel>, BusError> {
        if name.is_empty() {
            return Ok(Arc::new(Channel::new(&self.cfg)));
        }

        let channel = Arc::new(Channel::named(name, &self.cfg));
        let mut channels = self.channels.write().await;
        match channels.entry(name.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!(channel = name, "channel already exists");
                Err(BusError::DuplicateName {
                    name: name.to_string(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&channel));
                tracing::debug!(channel = name, "channel created");
                Ok(channel)
            }
        }
    }

    /// Looks up the channel registered under `name`.
    ///
    /// # Errors
    /// [`BusError::ChannelNotFound`] if nothing is registered under `name`.
    pub async fn channel(&self, name: &str) -> Result<Arc<Channel>, BusError> {
        self.channels
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| BusError::ChannelNotFound {
                name: name.to_string(),
            })
    }

    /// Returns the channel registered under `name`, registering a new one if absent.
    ///
    /// Check and insert happen under one write lock, so concurrent callers
    /// always share a single channel. An empty `name` yields a private channel.
    pub async fn channel_or_create(&self, name: &str) -> Arc<Channel> {
        if name.is_empty() {
            return Arc::new(Channel::new(&self.cfg));
        }

        let mut channels = self.channels.write().await;
        let channel = channels
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Channel::named(name, &self.cfg)));
        Arc::clone(channel)
    }

    /// Returns sorted list of registered channel names.
    pub async fn list(&self) -> Vec<String> {
        let channels = self.channels.read().await;
        let mut names: Vec<String> = channels.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Returns true if no channel is registered.
    pub async fn is_empty(&self) -> bool {
        self.channels.read().await.is_empty()
    }

    /// Waits up to `grace` for in-flight deliveries on every registered channel.
    ///
    /// Private channels are not tracked here; drain them through
    /// [`Channel::drain`].
    ///
    /// # Errors
    /// [`BusError::GraceExceeded`] with the total number of deliveries still running.
    pub async fn drain(&self, grace: Duration) -> Result<(), BusError> {
        let channels: Vec<Arc<Channel>> = self.channels.read().await.values().cloned().collect();

        let all_idle = join_all(channels.iter().map(|c| c.idle()));
        match tokio::time::timeout(grace, all_idle).await {
            Ok(_) => Ok(()),
            Err(_) => {
                let pending = channels.iter().map(|c| c.in_flight()).sum();
                tracing::warn!(?grace, pending, "drain grace exceeded");
                Err(BusError::GraceExceeded { grace, pending })
            }
        }
    }

    /// Drains with the configured [`Config::drain_grace`]; returns at once if it is zero.
    pub async fn shutdown(&self) -> Result<(), BusError> {
        match self.cfg.drain_grace_opt() {
            Some(grace) => self.drain(grace).await,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}
