//! # Opaque event payload.
//!
//! The bus imposes no schema on payloads. A [`Payload`] holds any
//! `Send + Sync + 'static` value behind an `Arc` and lets subscribers recover
//! it with [`Payload::downcast_ref`]. Subscribers that do not know the concrete
//! type simply ignore it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased, shareable event payload.
#[derive(Clone, Default)]
pub struct Payload(Option<Arc<dyn Any + Send + Sync>>);

impl Payload {
    /// Wraps a value.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self(Some(Arc::new(value)))
    }

    /// Wraps an already shared value without another allocation.
    pub fn from_arc(value: Arc<dyn Any + Send + Sync>) -> Self {
        Self(Some(value))
    }

    /// A payload carrying nothing.
    pub fn empty() -> Self {
        Self(None)
    }

    /// True if no value is attached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// True if the attached value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_deref().is_some_and(|v| v.is::<T>())
    }

    /// Borrows the attached value as `T`, if it is one.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|v| v.downcast_ref::<T>())
    }

    /// True if both payloads share the same allocation (or are both empty).
    pub fn ptr_eq(&self, other: &Payload) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Payload(..)"),
            None => f.write_str("Payload(empty)"),
        }
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct JobProgress {
        id: u64,
        percent: u8,
    }

    #[test]
    fn test_downcast_matching_type() {
        let p = Payload::new(JobProgress { id: 7, percent: 40 });
        assert!(p.is::<JobProgress>());
        assert_eq!(
            p.downcast_ref::<JobProgress>(),
            Some(&JobProgress { id: 7, percent: 40 })
        );
    }

    #[test]
    fn test_downcast_wrong_type_is_none() {
        let p = Payload::new(1_i32);
        assert!(!p.is::<i64>());
        assert_eq!(p.downcast_ref::<String>(), None);
    }

    #[test]
    fn test_empty() {
        let p = Payload::from(());
        assert!(p.is_empty());
        assert!(!p.is::<()>());
        assert_eq!(format!("{p:?}"), "Payload(empty)");
    }
}
