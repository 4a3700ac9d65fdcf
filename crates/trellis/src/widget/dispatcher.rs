//! Event dispatch and focus management.
//!
//! [`EventManager`] is the per-container dispatcher: it owns the focus
//! state machine and the input-routing protocol for one level of the
//! widget tree. Containers embed one and hand it their child list for
//! every operation; recursive routing happens through the child widgets'
//! own container surfaces.
//!
//! # Focus state machine
//!
//! The dispatcher is in one of two states: no focus, or focused on a
//! member of the child list. Transitions always run as an explicit
//! unfocus-then-focus pair, so a callback that changes state mid-hook
//! still leaves the machine consistent for the next event. Re-focusing
//! the already-focused widget re-runs both hooks rather than
//! short-circuiting: the hooks are observable side effects.
//!
//! # Routing rules
//!
//! - Hit testing scans children in order; the last (topmost) qualifying
//!   widget wins, and every provisional match that is superseded is told
//!   the mouse is no longer on it exactly once.
//! - A pressed widget that is draggable or a container receives mouse
//!   moves regardless of pointer position (drag tracking beats hit
//!   testing; first such widget found wins).
//! - Keyboard and text go to the focused widget only, filtered by the key
//!   allow-list and the printable-code-point rule.
//! - Every operation is a no-op on an empty child list or with no focus.

use std::time::Duration;

use trellis_core::WidgetId;

use super::events::{
    Key, KeyEvent, MouseButton, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, TextEvent,
};
use super::traits::Widget;
use crate::context::Context;

/// The ordered child list a dispatcher operates over.
///
/// Order is z-order (last drawn on top), the hit-test tie break, and the
/// tab order.
pub type WidgetList = Vec<Box<dyn Widget>>;

/// Per-container input dispatcher and focus state machine.
///
/// The dispatcher never owns widgets; every operation borrows the child
/// list from the container. The focus reference is a [`WidgetId`] looked
/// up per operation, so removing a widget can never leave a dangling
/// pointer — the container clears the reference on removal via
/// [`EventManager::widget_removed`].
#[derive(Debug, Default)]
pub struct EventManager {
    /// The id of the focused widget, if any.
    focused: Option<WidgetId>,
}

impl EventManager {
    /// Create a dispatcher with no focus.
    pub fn new() -> Self {
        Self { focused: None }
    }

    /// The id of the currently focused widget.
    #[inline]
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.focused
    }

    // =========================================================================
    // Focus state machine
    // =========================================================================

    /// Focus a widget by id.
    ///
    /// The previously focused widget is unfocused first (its hook runs),
    /// then the target is focused. Re-focusing the focused widget re-runs
    /// both hooks. Returns `false`, leaving focus unchanged, when the id
    /// is not in the list or the widget is not visible, enabled and
    /// focusable.
    pub fn focus_widget(&mut self, widgets: &mut [Box<dyn Widget>], id: WidgetId) -> bool {
        let Some(index) = position_of(widgets, id) else {
            return false;
        };
        if !accepts_focus(widgets[index].as_ref()) {
            return false;
        }
        self.apply_focus(widgets, index);
        true
    }

    /// Unfocus the focused widget, if any.
    pub fn unfocus_all(&mut self, widgets: &mut [Box<dyn Widget>]) {
        if let Some(id) = self.focused.take() {
            tracing::trace!(target: "trellis::dispatch", %id, "unfocus");
            if let Some(index) = position_of(widgets, id) {
                widgets[index].base_mut().set_focused(false);
                widgets[index].on_unfocused();
            }
        }
    }

    /// Focus the next focusable widget, scanning forward with a single
    /// wrap-around.
    ///
    /// Widgets that are not focusable, not visible or not enabled are
    /// skipped. When no sibling qualifies, focus is left unchanged and
    /// `false` is returned.
    pub fn focus_next(&mut self, widgets: &mut [Box<dyn Widget>]) -> bool {
        let start = self.focused_index(widgets);
        for index in forward_scan(widgets.len(), start) {
            if accepts_focus(widgets[index].as_ref()) {
                self.apply_focus(widgets, index);
                return true;
            }
        }
        false
    }

    /// Focus the previous focusable widget, scanning backward with a
    /// single wrap-around.
    ///
    /// Same qualification and no-candidate policy as
    /// [`focus_next`](Self::focus_next).
    pub fn focus_previous(&mut self, widgets: &mut [Box<dyn Widget>]) -> bool {
        let start = self.focused_index(widgets);
        for index in backward_scan(widgets.len(), start) {
            if accepts_focus(widgets[index].as_ref()) {
                self.apply_focus(widgets, index);
                return true;
            }
        }
        false
    }

    /// Handle a tab key press.
    ///
    /// A no-op when tab navigation is disabled in the context. When the
    /// focused widget is itself a container, focus first tries to advance
    /// *within* it; only when that sub-dispatch reports the end of its
    /// children does focus advance among this dispatcher's own widgets.
    /// The result is depth-first tab traversal across nested containers.
    pub fn tab_key_pressed(&mut self, widgets: &mut [Box<dyn Widget>], ctx: &Context) {
        if !ctx.tab_key_navigation() {
            return;
        }

        // Descend into a focused container first.
        if let Some(index) = self.focused_index(widgets) {
            if let Some(container) = widgets[index].container_base_mut() {
                if container.focus_next_widget_in_container(ctx) {
                    return;
                }
            }
        }

        let start = self.focused_index(widgets);
        for index in forward_scan(widgets.len(), start) {
            if accepts_focus(widgets[index].as_ref()) {
                self.apply_focus(widgets, index);
                return;
            }
        }

        // The focused container is the only tab stop at this level; wrap
        // around inside it.
        if let Some(index) = self.focused_index(widgets) {
            if let Some(container) = widgets[index].container_base_mut() {
                container.tab_key_pressed(ctx);
            }
        }
    }

    /// Advance focus for a recursive tab descent.
    ///
    /// Scans forward from the focused widget without wrapping. A
    /// container child only counts as a tab target when it recursively
    /// contains a focusable widget (checked by this same operation on its
    /// dispatcher). When the end of the list is reached, all widgets are
    /// unfocused and `false` is returned so the parent dispatcher resumes
    /// scanning its own siblings.
    pub fn focus_next_widget_in_container(
        &mut self,
        widgets: &mut [Box<dyn Widget>],
        ctx: &Context,
    ) -> bool {
        if !ctx.tab_key_navigation() {
            return false;
        }

        let start = self.focused_index(widgets).map_or(0, |index| index + 1);
        for index in start..widgets.len() {
            if !accepts_focus(widgets[index].as_ref()) {
                continue;
            }
            // Containers may not consume a tab stop unless they actually
            // have focusable content.
            if let Some(container) = widgets[index].container_base_mut() {
                if !container.focus_next_widget_in_container(ctx) {
                    continue;
                }
            }
            self.apply_focus(widgets, index);
            return true;
        }

        // Reached the end of the children; hand the scan back to the
        // parent dispatcher.
        self.unfocus_all(widgets);
        false
    }

    /// Clear the focus reference when a widget leaves the list.
    ///
    /// Called by the container during removal; the widget is already on
    /// its way out, so no unfocus hook runs.
    pub(crate) fn widget_removed(&mut self, id: WidgetId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Run the unfocus/focus hook pair for a transition to `index`.
    fn apply_focus(&mut self, widgets: &mut [Box<dyn Widget>], index: usize) {
        if let Some(previous) = self.focused.and_then(|id| position_of(widgets, id)) {
            widgets[previous].base_mut().set_focused(false);
            widgets[previous].on_unfocused();
        }

        let id = widgets[index].id();
        tracing::trace!(target: "trellis::dispatch", %id, "focus");
        self.focused = Some(id);
        widgets[index].base_mut().set_focused(true);
        widgets[index].on_focused();
    }

    /// Index of the focused widget in the list, if any.
    fn focused_index(&self, widgets: &[Box<dyn Widget>]) -> Option<usize> {
        self.focused.and_then(|id| position_of(widgets, id))
    }

    // =========================================================================
    // Mouse routing
    // =========================================================================

    /// Route a mouse move.
    ///
    /// Drag tracking takes precedence: the first pressed widget that is
    /// draggable or a container receives the move unconditionally.
    /// Otherwise the move goes to the widget under the pointer, if any.
    pub fn on_mouse_moved(&mut self, widgets: &mut [Box<dyn Widget>], ev: &MouseMoveEvent) {
        for widget in widgets.iter_mut() {
            if widget.base().is_pressed()
                && (widget.base().is_draggable() || widget.container_base().is_some())
            {
                widget.on_mouse_moved(ev);
                return;
            }
        }

        if let Some(index) = self.mouse_on_widget(widgets, ev) {
            widgets[index].on_mouse_moved(ev);
        }
    }

    /// Route a left mouse press.
    ///
    /// The widget under the pointer is focused (running the normal
    /// unfocus/focus hook pair) and receives the press. A press on empty
    /// space, or on a widget that cannot take focus, clears focus. Other
    /// buttons are ignored at this layer.
    pub fn on_mouse_pressed(&mut self, widgets: &mut [Box<dyn Widget>], ev: &MouseButtonEvent) {
        if ev.button != MouseButton::Left {
            return;
        }
        let hit = self.mouse_on_widget(widgets, &MouseMoveEvent { pos: ev.pos });
        match hit {
            Some(index) => {
                if accepts_focus(widgets[index].as_ref()) {
                    self.apply_focus(widgets, index);
                } else {
                    self.unfocus_all(widgets);
                }
                widgets[index].on_left_mouse_pressed(ev);
            }
            None => self.unfocus_all(widgets),
        }
    }

    /// Route a left mouse release.
    ///
    /// The widget under the pointer receives the release; every *other*
    /// widget is told the mouse is no longer down, clearing pressed flags
    /// left behind by widgets that lost the pointer mid-drag. The set of
    /// widgets to notify is fixed before any hook runs.
    pub fn on_mouse_released(&mut self, widgets: &mut [Box<dyn Widget>], ev: &MouseButtonEvent) {
        if ev.button != MouseButton::Left {
            return;
        }
        let hit = self.mouse_on_widget(widgets, &MouseMoveEvent { pos: ev.pos });
        if let Some(index) = hit {
            widgets[index].on_left_mouse_released(ev);
        }

        for (index, widget) in widgets.iter_mut().enumerate() {
            if Some(index) != hit {
                widget.mouse_no_longer_down();
            }
        }
    }

    /// Route a mouse wheel move to the widget under the pointer.
    pub fn on_mouse_wheel_moved(&mut self, widgets: &mut [Box<dyn Widget>], ev: &MouseWheelEvent) {
        if let Some(index) = self.mouse_on_widget(widgets, &MouseMoveEvent { pos: ev.pos }) {
            widgets[index].on_mouse_wheel_moved(ev);
        }
    }

    /// Find the widget under the pointer.
    ///
    /// Scans the list in order; the last widget that is visible, enabled
    /// and reports a hit wins. When overlapping widgets both qualify, the
    /// earlier provisional match is told the mouse is not on it before
    /// being superseded.
    fn mouse_on_widget(
        &mut self,
        widgets: &mut [Box<dyn Widget>],
        ev: &MouseMoveEvent,
    ) -> Option<usize> {
        let mut found: Option<usize> = None;

        for index in 0..widgets.len() {
            let widget = &mut widgets[index];
            if !(widget.base().is_visible() && widget.base().is_enabled()) {
                continue;
            }
            if widget.hit_test(ev.pos) {
                if let Some(previous) = found {
                    widgets[previous].mouse_not_on_widget();
                }
                found = Some(index);
            }
        }

        found
    }

    // =========================================================================
    // Keyboard and text routing
    // =========================================================================

    /// Route a key press to the focused widget.
    ///
    /// Only the fixed allow-list (arrows, backspace, delete, space,
    /// return) is forwarded; other keys are dropped at this layer.
    pub fn on_key_pressed(&mut self, widgets: &mut [Box<dyn Widget>], ev: &KeyEvent) {
        if !ev.key.is_routed() {
            return;
        }
        if let Some(index) = self.focused_index(widgets) {
            widgets[index].on_key_pressed(ev);
        }
    }

    /// Consume a key release.
    ///
    /// Releases are never forwarded to widgets; the dispatcher uses them
    /// to detect the tab key.
    pub fn on_key_released(
        &mut self,
        widgets: &mut [Box<dyn Widget>],
        ctx: &Context,
        ev: &KeyEvent,
    ) {
        if ev.key == Key::Tab {
            self.tab_key_pressed(widgets, ctx);
        }
    }

    /// Route entered text to the focused widget.
    ///
    /// Code points below 30 and the delete code point (127) are dropped.
    pub fn on_text_entered(&mut self, widgets: &mut [Box<dyn Widget>], ev: &TextEvent) {
        let code_point = ev.unicode as u32;
        if code_point < 30 || code_point == 127 {
            return;
        }
        if let Some(index) = self.focused_index(widgets) {
            widgets[index].on_text_entered(ev);
        }
    }

    // =========================================================================
    // Time and bulk notifications
    // =========================================================================

    /// Deliver a frame tick to every animated widget.
    ///
    /// Elapsed time is accumulated into the widget's own counter before
    /// its update hook runs; consuming the accumulated time is the
    /// widget's responsibility.
    pub fn update_time(&mut self, widgets: &mut [Box<dyn Widget>], elapsed: Duration) {
        for widget in widgets.iter_mut() {
            if widget.base().is_animated() {
                widget.base_mut().add_animation_time(elapsed);
                widget.on_update();
            }
        }
    }

    /// Tell every widget the mouse is no longer on top of it.
    pub fn mouse_not_on_widgets(&mut self, widgets: &mut [Box<dyn Widget>]) {
        for widget in widgets.iter_mut() {
            widget.mouse_not_on_widget();
        }
    }

    /// Tell every widget the mouse is no longer down.
    pub fn mouse_no_longer_down(&mut self, widgets: &mut [Box<dyn Widget>]) {
        for widget in widgets.iter_mut() {
            widget.mouse_no_longer_down();
        }
    }
}

/// Index of a widget id in a list.
fn position_of(widgets: &[Box<dyn Widget>], id: WidgetId) -> Option<usize> {
    widgets.iter().position(|w| w.id() == id)
}

/// Whether a widget currently qualifies for focus.
fn accepts_focus(widget: &dyn Widget) -> bool {
    let base = widget.base();
    base.is_focusable() && base.is_visible() && base.is_enabled()
}

/// Indices after `start` (exclusive), wrapping once over the remainder.
fn forward_scan(len: usize, start: Option<usize>) -> impl Iterator<Item = usize> {
    let begin = start.map_or(0, |index| index + 1);
    let split = start.unwrap_or(0);
    (begin..len).chain(0..split.min(len))
}

/// Indices before `start` (exclusive) in descending order, wrapping once.
fn backward_scan(len: usize, start: Option<usize>) -> Box<dyn Iterator<Item = usize>> {
    match start {
        Some(index) => Box::new((0..index).rev().chain((index + 1..len).rev())),
        None => Box::new((0..len).rev()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_scan_wraps_once() {
        assert_eq!(forward_scan(4, Some(1)).collect::<Vec<_>>(), vec![2, 3, 0]);
        assert_eq!(forward_scan(4, None).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(forward_scan(0, None).count(), 0);
    }

    #[test]
    fn backward_scan_wraps_once() {
        assert_eq!(backward_scan(4, Some(2)).collect::<Vec<_>>(), vec![1, 0, 3]);
        assert_eq!(backward_scan(4, None).collect::<Vec<_>>(), vec![3, 2, 1, 0]);
        assert_eq!(backward_scan(0, None).count(), 0);
    }
}
