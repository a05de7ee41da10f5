//! # Prefix matching rules.
//!
//! [`MatchMode`] decides whether a subscription prefix routes a given event
//! name.
//!
//! - [`MatchMode::Literal`] (default): plain textual prefix. `"order"` matches
//!   `"order.created"` **and** `"order2"`. The empty prefix matches everything.
//! - [`MatchMode::Segment`]: the prefix must end on a segment boundary. The
//!   character after the prefix must be the separator (or the name must end
//!   there), unless the prefix itself ends with the separator.
//!
//! ```text
//! prefix      event               Literal  Segment('.')
//! ""          "anything"          yes      yes
//! "order"     "order"             yes      yes
//! "order"     "order.created"     yes      yes
//! "order"     "order2"            yes      no
//! "order."    "order.created"     yes      yes
//! "order.c"   "order.created"     yes      no
//! ```

/// How subscription prefixes are compared with event names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Literal string prefix.
    #[default]
    Literal,
    /// Prefix must stop at a `separator` boundary.
    Segment {
        /// Segment separator, usually `'.'`.
        separator: char,
    },
}

impl MatchMode {
    /// Returns true if a subscription under `prefix` receives `event`.
    pub fn matches(&self, prefix: &str, event: &str) -> bool {
        if !event.starts_with(prefix) {
            return false;
        }
        match *self {
            MatchMode::Literal => true,
            MatchMode::Segment { separator } => {
                if prefix.is_empty() || prefix.ends_with(separator) {
                    return true;
                }
                // starts_with guarantees prefix.len() is a char boundary
                let rest = &event[prefix.len()..];
                rest.is_empty() || rest.starts_with(separator)
            }
        }
    }
}
