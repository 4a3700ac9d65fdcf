//! Widget identity.
//!
//! Every widget is assigned a [`WidgetId`] at construction. Ids are opaque,
//! process-unique, and never reused, which makes them safe to hold as weak
//! references: a stale id simply fails to look anything up. The focus
//! pointer in the event dispatcher is the main consumer.

use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a widget.
///
/// Ids are allocated from a process-wide monotonic counter, so two widgets
/// never share an id even across independent GUI roots. Holding a
/// `WidgetId` does not keep the widget alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate the next unique id.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
    }
}
