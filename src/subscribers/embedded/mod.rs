//! # Built-in subscribers
//!
//! Small, self-contained implementations useful for observability and demos.
//!
//! - [`LogWriter`]: logs every event through `tracing`.

mod log;

pub use log::LogWriter;
