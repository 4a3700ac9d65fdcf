//! Child widget storage shared by every container.
//!
//! [`ContainerBase`] bundles the ordered child list, the per-child names,
//! and the [`EventManager`] that routes input among those children. The
//! [`Gui`](crate::Gui) root owns one directly; container widgets such as
//! [`Panel`](super::widgets::Panel) embed one and expose it through
//! [`Widget::container_base`](super::Widget::container_base).
//!
//! Children are stored in insertion order, which doubles as z-order (last
//! added draws on top and wins hit-test ties) and tab order. Names are
//! kept in a parallel list rather than a map so duplicates are allowed
//! and lookup order stays deterministic.

use std::time::Duration;

use trellis_core::WidgetId;

use super::dispatcher::{EventManager, WidgetList};
use super::events::{KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, TextEvent};
use super::traits::Widget;
use crate::backend::{DrawStates, RenderTarget};
use crate::context::Context;

/// Ordered child storage plus the dispatcher that routes among it.
#[derive(Default)]
pub struct ContainerBase {
    children: WidgetList,
    names: Vec<String>,
    event_manager: EventManager,
}

impl ContainerBase {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            names: Vec::new(),
            event_manager: EventManager::new(),
        }
    }

    // =========================================================================
    // Child management
    // =========================================================================

    /// Add a widget on top of the existing children.
    ///
    /// Returns the widget's id for later lookup and focus calls.
    pub fn add(&mut self, widget: Box<dyn Widget>, name: impl Into<String>) -> WidgetId {
        let id = widget.id();
        self.children.push(widget);
        self.names.push(name.into());
        id
    }

    /// Find a widget by name, searching nested containers depth-first.
    ///
    /// The first match in insertion order wins.
    pub fn get(&self, name: &str) -> Option<&dyn Widget> {
        for (child, child_name) in self.children.iter().zip(&self.names) {
            if child_name == name {
                return Some(child.as_ref());
            }
        }
        for child in &self.children {
            if let Some(container) = child.container_base() {
                if let Some(found) = container.get(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Widget + 'static)> {
        // Two passes keep the search order identical to `get`.
        if let Some(index) = self.names.iter().position(|n| n == name) {
            return Some(self.children[index].as_mut());
        }
        for child in &mut self.children {
            if let Some(container) = child.container_base_mut() {
                if let Some(found) = container.get_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// The children in z-order (bottom first).
    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    /// The name each child was added under, parallel to [`widgets`](Self::widgets).
    pub fn widget_names(&self) -> &[String] {
        &self.names
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the container has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Remove a direct child by id, returning it.
    ///
    /// Clears the focus reference when the removed widget was focused; no
    /// unfocus hook runs for a widget leaving the tree.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        let index = self.children.iter().position(|w| w.id() == id)?;
        self.names.remove(index);
        self.event_manager.widget_removed(id);
        Some(self.children.remove(index))
    }

    /// Remove every child.
    pub fn remove_all(&mut self) {
        while let Some(widget) = self.children.pop() {
            self.event_manager.widget_removed(widget.id());
        }
        self.names.clear();
    }

    /// Move a child to the end of the list (drawn last, on top).
    pub fn move_to_front(&mut self, id: WidgetId) -> bool {
        let Some(index) = self.children.iter().position(|w| w.id() == id) else {
            return false;
        };
        let widget = self.children.remove(index);
        let name = self.names.remove(index);
        self.children.push(widget);
        self.names.push(name);
        true
    }

    /// Move a child to the start of the list (drawn first, underneath).
    pub fn move_to_back(&mut self, id: WidgetId) -> bool {
        let Some(index) = self.children.iter().position(|w| w.id() == id) else {
            return false;
        };
        let widget = self.children.remove(index);
        let name = self.names.remove(index);
        self.children.insert(0, widget);
        self.names.insert(0, name);
        true
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The id of the focused direct child, if any.
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.event_manager.focused_widget()
    }

    /// Focus a direct child by id. See [`EventManager::focus_widget`].
    pub fn focus_widget(&mut self, id: WidgetId) -> bool {
        self.event_manager.focus_widget(&mut self.children, id)
    }

    /// Focus the next focusable child, wrapping once.
    pub fn focus_next(&mut self) -> bool {
        self.event_manager.focus_next(&mut self.children)
    }

    /// Focus the previous focusable child, wrapping once.
    pub fn focus_previous(&mut self) -> bool {
        self.event_manager.focus_previous(&mut self.children)
    }

    /// Unfocus the focused child, if any.
    pub fn unfocus_all(&mut self) {
        self.event_manager.unfocus_all(&mut self.children);
    }

    /// Handle a tab key press at this level. See
    /// [`EventManager::tab_key_pressed`].
    pub fn tab_key_pressed(&mut self, ctx: &Context) {
        self.event_manager.tab_key_pressed(&mut self.children, ctx);
    }

    /// Advance focus for a recursive tab descent. See
    /// [`EventManager::focus_next_widget_in_container`].
    pub fn focus_next_widget_in_container(&mut self, ctx: &Context) -> bool {
        self.event_manager
            .focus_next_widget_in_container(&mut self.children, ctx)
    }

    // =========================================================================
    // Event forwarding
    // =========================================================================
    //
    // Positions in the events are already in this container's local space;
    // the owning widget translates before forwarding.

    pub fn on_mouse_moved(&mut self, ev: &MouseMoveEvent) {
        self.event_manager.on_mouse_moved(&mut self.children, ev);
    }

    pub fn on_mouse_pressed(&mut self, ev: &MouseButtonEvent) {
        self.event_manager.on_mouse_pressed(&mut self.children, ev);
    }

    pub fn on_mouse_released(&mut self, ev: &MouseButtonEvent) {
        self.event_manager.on_mouse_released(&mut self.children, ev);
    }

    pub fn on_key_pressed(&mut self, ev: &KeyEvent) {
        self.event_manager.on_key_pressed(&mut self.children, ev);
    }

    pub fn on_key_released(&mut self, ctx: &Context, ev: &KeyEvent) {
        self.event_manager
            .on_key_released(&mut self.children, ctx, ev);
    }

    pub fn on_text_entered(&mut self, ev: &TextEvent) {
        self.event_manager.on_text_entered(&mut self.children, ev);
    }

    pub fn on_mouse_wheel_moved(&mut self, ev: &MouseWheelEvent) {
        self.event_manager
            .on_mouse_wheel_moved(&mut self.children, ev);
    }

    /// Deliver a frame tick to animated children.
    pub fn update_time(&mut self, elapsed: Duration) {
        self.event_manager.update_time(&mut self.children, elapsed);
    }

    /// Tell every child the mouse left the container.
    pub fn mouse_not_on_widgets(&mut self) {
        self.event_manager.mouse_not_on_widgets(&mut self.children);
    }

    /// Tell every child the mouse is no longer down.
    pub fn mouse_no_longer_down(&mut self) {
        self.event_manager.mouse_no_longer_down(&mut self.children);
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw visible children in z-order.
    ///
    /// `states` must already carry the translation into this container's
    /// local space.
    pub fn draw_children(&self, target: &mut dyn RenderTarget, states: DrawStates) {
        for child in &self.children {
            if child.is_visible() {
                child.draw(target, states);
            }
        }
    }
}

impl std::fmt::Debug for ContainerBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerBase")
            .field("children", &self.names)
            .field("focused", &self.event_manager.focused_widget())
            .finish()
    }
}
