//! Application-visible widget callbacks.
//!
//! Widgets raise [`CallbackArgs`] bundles through per-trigger signals:
//! application code subscribes to a [`Trigger`] kind on a widget and
//! receives every matching notification, in registration order. Delivery is
//! synchronous; a listener may itself cause further widget state changes.

use trellis_core::{ConnectionId, Point, Signal, WidgetId};

/// The kinds of notifications a widget can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The widget gained keyboard focus.
    Focused,
    /// The widget lost keyboard focus.
    Unfocused,
    /// The pointer entered the widget's interactive area.
    MouseEntered,
    /// The pointer left the widget's interactive area.
    MouseLeft,
    /// The left mouse button went down on the widget.
    LeftMousePressed,
    /// The left mouse button went up on the widget.
    LeftMouseReleased,
    /// Press and release both landed on the widget.
    LeftMouseClicked,
    /// The space key activated the focused widget.
    SpaceKeyPressed,
    /// The return key activated the focused widget.
    ReturnKeyPressed,
    /// A checkbox was checked.
    Checked,
    /// A checkbox was unchecked.
    Unchecked,
    /// An edit box's text changed.
    TextChanged,
    /// A value-bearing widget changed its value.
    ValueChanged,
    /// An animated picture finished a non-looping run.
    AnimationFinished,
}

/// The immutable payload delivered to callback listeners.
#[derive(Debug, Clone)]
pub struct CallbackArgs {
    /// The widget the notification originated from.
    pub source: WidgetId,
    /// What happened.
    pub trigger: Trigger,
    /// Pointer position, for mouse-driven triggers.
    pub mouse: Option<Point>,
    /// Text payload, for text-driven triggers.
    pub text: Option<String>,
    /// Numeric payload, for value-driven triggers.
    pub value: Option<f32>,
    /// Checked state, for checkbox triggers.
    pub checked: Option<bool>,
}

impl CallbackArgs {
    /// Create a payload carrying only the source and trigger.
    pub fn new(source: WidgetId, trigger: Trigger) -> Self {
        Self {
            source,
            trigger,
            mouse: None,
            text: None,
            value: None,
            checked: None,
        }
    }

    /// Attach a pointer position.
    pub fn with_mouse(mut self, pos: Point) -> Self {
        self.mouse = Some(pos);
        self
    }

    /// Attach a text payload.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach a numeric payload.
    pub fn with_value(mut self, value: f32) -> Self {
        self.value = Some(value);
        self
    }

    /// Attach a checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }
}

/// Per-trigger listener registry owned by every widget.
///
/// Signals are created lazily on first subscription, so widgets that never
/// have listeners pay a lookup and nothing else when they raise a trigger.
#[derive(Debug, Default)]
pub struct Callbacks {
    slots: Vec<(Trigger, Signal<CallbackArgs>)>,
}

impl Callbacks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener to a trigger kind.
    pub fn connect<F>(&mut self, trigger: Trigger, listener: F) -> ConnectionId
    where
        F: Fn(&CallbackArgs) + Send + Sync + 'static,
    {
        if let Some((_, signal)) = self.slots.iter().find(|(t, _)| *t == trigger) {
            return signal.connect(listener);
        }
        let signal = Signal::new();
        let id = signal.connect(listener);
        self.slots.push((trigger, signal));
        id
    }

    /// Remove a listener from a trigger kind.
    pub fn disconnect(&mut self, trigger: Trigger, id: ConnectionId) -> bool {
        self.slots
            .iter()
            .find(|(t, _)| *t == trigger)
            .is_some_and(|(_, signal)| signal.disconnect(id))
    }

    /// Whether any listener is subscribed to a trigger kind.
    pub fn has_listeners(&self, trigger: Trigger) -> bool {
        self.slots
            .iter()
            .any(|(t, signal)| *t == trigger && signal.connection_count() > 0)
    }

    /// Raise a notification; a no-op when nothing is subscribed.
    pub fn emit(&self, args: CallbackArgs) {
        if let Some((_, signal)) = self.slots.iter().find(|(t, _)| *t == args.trigger) {
            signal.emit(args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn listeners_receive_matching_triggers_only() {
        let mut callbacks = Callbacks::new();
        let clicks = Arc::new(AtomicUsize::new(0));
        let id = WidgetId::next();

        let counter = Arc::clone(&clicks);
        callbacks.connect(Trigger::LeftMouseClicked, move |args| {
            assert_eq!(args.trigger, Trigger::LeftMouseClicked);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        callbacks.emit(CallbackArgs::new(id, Trigger::LeftMouseClicked));
        callbacks.emit(CallbackArgs::new(id, Trigger::Focused));
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn has_listeners_tracks_connections() {
        let mut callbacks = Callbacks::new();
        assert!(!callbacks.has_listeners(Trigger::TextChanged));

        let id = callbacks.connect(Trigger::TextChanged, |_| {});
        assert!(callbacks.has_listeners(Trigger::TextChanged));
        assert!(!callbacks.has_listeners(Trigger::Focused));

        assert!(callbacks.disconnect(Trigger::TextChanged, id));
        assert!(
            !callbacks.has_listeners(Trigger::TextChanged),
            "an empty signal does not count as a listener"
        );
    }

    #[test]
    fn multiple_listeners_fire_in_registration_order() {
        let mut callbacks = Callbacks::new();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let id = WidgetId::next();

        for tag in 0..3 {
            let order = Arc::clone(&order);
            callbacks.connect(Trigger::Focused, move |_| order.lock().push(tag));
        }

        callbacks.emit(CallbackArgs::new(id, Trigger::Focused));
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }
}
