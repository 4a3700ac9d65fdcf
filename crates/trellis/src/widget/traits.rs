//! Core widget trait definition.
//!
//! [`Widget`] is the capability surface the dispatcher and containers see.
//! Instead of the deep inheritance chain of classic toolkits, behavior is
//! composed: the trait's default method implementations provide the plain
//! clickable-widget protocol (hover tracking, press/release/click
//! callbacks), and concrete widgets override only the hooks they care
//! about. Container-type widgets additionally expose their
//! [`ContainerBase`] through [`Widget::container_base`], which is the seam
//! the dispatcher uses for recursive routing and tab descent.
//!
//! The input hooks are invoked exactly by the dispatch protocol in
//! [`EventManager`](super::EventManager); application code never calls them
//! directly.

use trellis_core::{ConnectionId, Point, Rect, Size, WidgetId};

use super::base::WidgetBase;
use super::callback::{CallbackArgs, Trigger};
use super::container::ContainerBase;
use super::events::{KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, TextEvent};
use crate::backend::{DrawStates, RenderTarget};

/// The core trait for all widgets.
pub trait Widget: Send + Sync {
    // =========================================================================
    // Required methods
    // =========================================================================

    /// Get a reference to the widget's base.
    fn base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget's base.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Draw the widget.
    ///
    /// Positions are relative to the parent; `states.offset` carries the
    /// accumulated translation to world space.
    fn draw(&self, target: &mut dyn RenderTarget, states: DrawStates);

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// Ask the widget whether a point (in parent space) is on top of it.
    ///
    /// Widgets with non-rectangular interactive areas (image widgets with
    /// transparent pixels) override this. If the point misses while the
    /// widget still believes it is hovered, the widget must notify itself
    /// that the mouse left before returning `false`; the default
    /// implementation does exactly that.
    fn hit_test(&mut self, pos: Point) -> bool {
        if self.base().is_visible() && self.base().contains_point(pos) {
            true
        } else {
            self.mouse_not_on_widget();
            false
        }
    }

    // =========================================================================
    // Input hooks (invoked by the dispatch protocol)
    // =========================================================================

    /// The mouse moved over (or, while dragging, relative to) the widget.
    fn on_mouse_moved(&mut self, ev: &MouseMoveEvent) {
        if !self.base().is_hovered() {
            self.base_mut().set_hovered(true);
            let args = self.base().args(Trigger::MouseEntered).with_mouse(ev.pos);
            self.base().raise_args(args);
        }
    }

    /// The left mouse button went down on the widget.
    fn on_left_mouse_pressed(&mut self, ev: &MouseButtonEvent) {
        self.base_mut().set_pressed(true);
        let args = self
            .base()
            .args(Trigger::LeftMousePressed)
            .with_mouse(ev.pos);
        self.base().raise_args(args);
    }

    /// The left mouse button went up on the widget.
    ///
    /// A click is reported only when the press also landed on this widget.
    fn on_left_mouse_released(&mut self, ev: &MouseButtonEvent) {
        let args = self
            .base()
            .args(Trigger::LeftMouseReleased)
            .with_mouse(ev.pos);
        self.base().raise_args(args);

        if self.base().is_pressed() {
            let args = self
                .base()
                .args(Trigger::LeftMouseClicked)
                .with_mouse(ev.pos);
            self.base().raise_args(args);
            self.base_mut().set_pressed(false);
        }
    }

    /// A routed key was pressed while the widget had focus.
    fn on_key_pressed(&mut self, _ev: &KeyEvent) {}

    /// A printable code point was entered while the widget had focus.
    fn on_text_entered(&mut self, _ev: &TextEvent) {}

    /// The mouse wheel moved over the widget.
    fn on_mouse_wheel_moved(&mut self, _ev: &MouseWheelEvent) {}

    /// The widget gained keyboard focus.
    fn on_focused(&mut self) {
        self.base().raise(Trigger::Focused);
    }

    /// The widget lost keyboard focus.
    fn on_unfocused(&mut self) {
        self.base().raise(Trigger::Unfocused);
    }

    /// Advance time-based internal state.
    ///
    /// Only invoked for widgets flagged as animated. The dispatcher has
    /// already accumulated the elapsed time into the widget's base; the
    /// widget consumes (subtracts) what it uses. The default discards the
    /// accumulated time so it cannot grow without bound.
    fn on_update(&mut self) {
        self.base_mut().take_animation_time();
    }

    /// Notification that the mouse is no longer on top of the widget.
    fn mouse_not_on_widget(&mut self) {
        if self.base().is_hovered() {
            self.base_mut().set_hovered(false);
            self.base().raise(Trigger::MouseLeft);
        }
    }

    /// Notification that the mouse is no longer down on the widget.
    fn mouse_no_longer_down(&mut self) {
        self.base_mut().set_pressed(false);
    }

    // =========================================================================
    // Container seam
    // =========================================================================

    /// The widget's container surface, when it is a container.
    ///
    /// The dispatcher uses this for drag-forwarding precedence, recursive
    /// tab descent, and the press-on-container focus path.
    fn container_base(&self) -> Option<&ContainerBase> {
        None
    }

    /// Mutable access to the widget's container surface.
    fn container_base_mut(&mut self) -> Option<&mut ContainerBase> {
        None
    }

    // =========================================================================
    // Convenience delegation to WidgetBase
    // =========================================================================

    /// The widget's unique id.
    fn id(&self) -> WidgetId {
        self.base().id()
    }

    /// Position relative to the parent's local space.
    fn position(&self) -> Point {
        self.base().position()
    }

    /// Move the widget.
    fn set_position(&mut self, position: Point) {
        self.base_mut().set_position(position);
    }

    /// The widget's size.
    fn size(&self) -> Size {
        self.base().size()
    }

    /// Resize the widget.
    fn set_size(&mut self, size: Size) {
        self.base_mut().set_size(size);
    }

    /// The widget's bounds in its parent's coordinate space.
    fn rect(&self) -> Rect {
        self.base().rect()
    }

    /// Check if the widget is visible.
    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    /// Set whether the widget is visible.
    fn set_visible(&mut self, visible: bool) {
        self.base_mut().set_visible(visible);
    }

    /// Check if the widget is enabled.
    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    /// Set whether the widget is enabled.
    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }

    /// Check if the widget currently has keyboard focus.
    fn is_focused(&self) -> bool {
        self.base().is_focused()
    }

    /// Subscribe a listener to one of the widget's trigger kinds.
    fn connect<F>(&mut self, trigger: Trigger, listener: F) -> ConnectionId
    where
        F: Fn(&CallbackArgs) + Send + Sync + 'static,
        Self: Sized,
    {
        self.base_mut().callbacks_mut().connect(trigger, listener)
    }
}
