//! Bus core: channels, routing, delivery and the channel registry.
//!
//! Public API from this module: [`Channel`], [`Registry`], [`Config`] and
//! [`MatchMode`].
//!
//! Internal modules:
//! - [`channel`]: subscription map, `subscribe`/`publish`;
//! - [`dispatch`]: failure-isolated, tracked delivery tasks;
//! - [`matcher`]: prefix matching rules;
//! - [`registry`]: named channel directory;
//! - [`config`]: settings shared by the registry and its channels.

mod channel;
mod config;
mod dispatch;
mod matcher;
mod registry;

pub use channel::Channel;
pub use config::Config;
pub use matcher::MatchMode;
pub use registry::Registry;
