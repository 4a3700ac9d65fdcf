//! Signal/slot system.
//!
//! A [`Signal`] is emitted by a widget when its state changes; connected
//! slots (callbacks) are invoked in response. Delivery is synchronous and
//! happens in registration order. Slots may re-enter the signal system
//! (connect, disconnect, or emit again) from inside a slot: the connection
//! list is snapshotted before any slot runs, so re-entrant mutation never
//! invalidates an in-flight emission.
//!
//! # Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn = text_changed.connect(|text| {
//!     println!("text changed to {text}");
//! });
//!
//! text_changed.emit("hello".to_string());
//! text_changed.disconnect(conn);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// A unique identifier for a signal-slot connection.
///
/// Returned by [`Signal::connect`]; pass it to [`Signal::disconnect`] to
/// remove the slot again. Ids are never reused within a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// Internal storage for a single connection.
struct Connection<Args> {
    id: ConnectionId,
    /// The slot function (Arc-wrapped so emission can run without the lock).
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal with any number of connected slots.
///
/// Slots are invoked synchronously, on the emitting thread, in the order
/// they were connected. Use `()` for signals without arguments or a tuple
/// for several.
pub struct Signal<Args> {
    /// Connections in registration order.
    connections: Mutex<Vec<Connection<Args>>>,
    /// Whether emission is temporarily blocked.
    blocked: AtomicBool,
    /// Source of connection ids for this signal.
    next_id: AtomicU64,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
            blocked: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
        }
    }

    /// Connect a slot to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.connections.lock().push(Connection {
            id,
            slot: Arc::new(slot),
        });
        id
    }

    /// Disconnect a specific slot by its connection id.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut connections = self.connections.lock();
        let before = connections.len();
        connections.retain(|c| c.id != id);
        connections.len() != before
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block or unblock emission.
    ///
    /// While blocked, calls to [`emit`](Self::emit) do nothing. Useful
    /// during batch updates to suppress cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in registration order.
    ///
    /// The connection list is snapshotted before the first slot runs, so a
    /// slot that connects or disconnects during delivery affects the next
    /// emission, not this one.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "trellis_core::signal", "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            connections.iter().map(|c| Arc::clone(&c.slot)).collect()
        };
        tracing::trace!(
            target: "trellis_core::signal",
            slot_count = slots.len(),
            "emitting signal"
        );

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn emit_invokes_all_slots() {
        let signal = Signal::<i32>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c1 = Arc::clone(&count);
        signal.connect(move |n| {
            c1.fetch_add(*n as usize, Ordering::SeqCst);
        });
        let c2 = Arc::clone(&count);
        signal.connect(move |n| {
            c2.fetch_add(*n as usize, Ordering::SeqCst);
        });

        signal.emit(3);
        assert_eq!(count.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn slots_run_in_registration_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in 0..4 {
            let order = Arc::clone(&order);
            signal.connect(move |_| order.lock().push(tag));
        }

        signal.emit(());
        assert_eq!(*order.lock(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn disconnect_removes_slot() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        let id = signal.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(());
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(());

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn blocked_signal_does_not_emit() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        signal.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        signal.emit(());
        signal.set_blocked(false);
        signal.emit(());

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reentrant_disconnect_is_safe() {
        let signal = Arc::new(Signal::<()>::new());
        let count = Arc::new(AtomicUsize::new(0));

        let sig = Arc::clone(&signal);
        let c = Arc::clone(&count);
        let id = Arc::new(Mutex::new(None));
        let id_slot = Arc::clone(&id);
        let registered = signal.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            // Disconnect ourselves mid-delivery.
            if let Some(own) = *id_slot.lock() {
                sig.disconnect(own);
            }
        });
        *id.lock() = Some(registered);

        signal.emit(());
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
