//! Widget base implementation.
//!
//! [`WidgetBase`] carries the state every widget shares: identity, geometry,
//! visibility, enabled state, the interactivity flags the dispatcher reads,
//! and the transient input state the dispatcher writes. Widget
//! implementations embed it as a field and delegate to it.

use std::time::Duration;

use trellis_core::{Point, Rect, Signal, Size, WidgetId};

use super::callback::{CallbackArgs, Callbacks, Trigger};

/// Bitset of visual phases a widget's renderer may distinguish.
///
/// Purely presentational: dispatch logic never reads these. A widget
/// declares the phases its artwork has separate images for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetPhases(u8);

impl WidgetPhases {
    pub const HOVER: Self = Self(1);
    pub const MOUSE_DOWN: Self = Self(1 << 1);
    pub const FOCUSED: Self = Self(1 << 2);
    pub const SELECTED: Self = Self(1 << 3);

    /// No optional phases.
    pub const NONE: Self = Self(0);

    /// Combine two phase sets.
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every phase in `other` is present.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// The base implementation for all widgets.
///
/// Holds:
/// - identity ([`WidgetId`])
/// - geometry (position relative to the parent, and size)
/// - visibility / enabled / focusable / draggable / animated flags
/// - transient input state (pressed, hovered, focused) — written only by
///   the dispatcher that owns the widget's sibling list
/// - the per-trigger callback registry
pub struct WidgetBase {
    /// The widget's unique id.
    id: WidgetId,

    /// Position relative to the parent's local space.
    position: Point,

    /// The widget's size.
    size: Size,

    /// Whether the widget is visible.
    visible: bool,

    /// Whether the widget is enabled (can receive input).
    enabled: bool,

    /// Whether the widget can receive keyboard focus.
    focusable: bool,

    /// Whether the widget keeps receiving mouse moves while pressed,
    /// regardless of pointer position.
    draggable: bool,

    /// Whether the widget consumes per-frame time updates.
    animated: bool,

    /// Visual phases the widget's artwork distinguishes.
    phases: WidgetPhases,

    /// Whether the mouse went down on the widget and has not been released.
    pressed: bool,

    /// Whether the mouse is currently over the widget.
    hovered: bool,

    /// Whether the widget currently has focus.
    focused: bool,

    /// Time accumulated by the dispatcher, consumed by `on_update`.
    animation_time_elapsed: Duration,

    /// Per-trigger callback listeners.
    callbacks: Callbacks,

    /// Signal emitted when position or size changes.
    pub geometry_changed: Signal<Rect>,
}

impl WidgetBase {
    /// Create a new widget base.
    pub fn new() -> Self {
        Self {
            id: WidgetId::next(),
            position: Point::ZERO,
            size: Size::ZERO,
            visible: true,
            enabled: true,
            focusable: false,
            draggable: false,
            animated: false,
            phases: WidgetPhases::NONE,
            pressed: false,
            hovered: false,
            focused: false,
            animation_time_elapsed: Duration::ZERO,
            callbacks: Callbacks::new(),
            geometry_changed: Signal::new(),
        }
    }

    /// The widget's unique id.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position relative to the parent's local space.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the widget. Emits `geometry_changed` when the position changes.
    pub fn set_position(&mut self, position: Point) {
        if self.position != position {
            self.position = position;
            self.geometry_changed.emit(self.rect());
        }
    }

    /// The widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the widget. Emits `geometry_changed` when the size changes.
    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.geometry_changed.emit(self.rect());
        }
    }

    /// The widget's bounds in its parent's coordinate space.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            origin: self.position,
            size: self.size,
        }
    }

    /// Check if a point in parent space lies within the bounds.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    // =========================================================================
    // Flags
    // =========================================================================

    /// Check if the widget is visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set whether the widget is visible.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check if the widget is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set whether the widget is enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the widget can receive keyboard focus.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Set whether the widget can receive keyboard focus.
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    /// Check if the widget tracks the mouse while pressed.
    #[inline]
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Set whether the widget tracks the mouse while pressed.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    /// Check if the widget consumes per-frame time updates.
    #[inline]
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Set whether the widget consumes per-frame time updates.
    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    /// The visual phases the widget's artwork distinguishes.
    #[inline]
    pub fn phases(&self) -> WidgetPhases {
        self.phases
    }

    /// Declare the visual phases the widget's artwork distinguishes.
    pub fn set_phases(&mut self, phases: WidgetPhases) {
        self.phases = phases;
    }

    // =========================================================================
    // Transient input state (dispatcher-owned)
    // =========================================================================

    /// Check if the mouse went down on the widget and is still down.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the pressed state (used by the dispatch protocol).
    pub(crate) fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Check if the mouse is currently over the widget.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the hover state (used by the dispatch protocol).
    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Check if the widget currently has keyboard focus.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Set the focused state (used by the focus state machine).
    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    // =========================================================================
    // Animation time
    // =========================================================================

    /// Time accumulated since the widget last consumed it.
    #[inline]
    pub fn animation_time_elapsed(&self) -> Duration {
        self.animation_time_elapsed
    }

    /// Accumulate elapsed time (used by `update_time`).
    pub(crate) fn add_animation_time(&mut self, elapsed: Duration) {
        self.animation_time_elapsed += elapsed;
    }

    /// Consume part of the accumulated time.
    pub fn consume_animation_time(&mut self, amount: Duration) {
        self.animation_time_elapsed = self.animation_time_elapsed.saturating_sub(amount);
    }

    /// Consume all accumulated time, returning it.
    pub fn take_animation_time(&mut self) -> Duration {
        std::mem::take(&mut self.animation_time_elapsed)
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// The widget's callback registry.
    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// Mutable access to the callback registry (for subscribing).
    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    /// Raise a notification carrying only this widget's id and a trigger.
    pub fn raise(&self, trigger: Trigger) {
        self.callbacks.emit(CallbackArgs::new(self.id, trigger));
    }

    /// Raise a notification with a prepared payload.
    pub fn raise_args(&self, args: CallbackArgs) {
        self.callbacks.emit(args);
    }

    /// Start a payload originating from this widget.
    pub fn args(&self, trigger: Trigger) -> CallbackArgs {
        CallbackArgs::new(self.id, trigger)
    }
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("focusable", &self.focusable)
            .field("focused", &self.focused)
            .field("pressed", &self.pressed)
            .field("hovered", &self.hovered)
            .finish()
    }
}
