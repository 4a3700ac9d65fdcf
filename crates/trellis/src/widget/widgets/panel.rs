//! Concrete container widget.

use trellis_core::{Color, Point, Size};

use crate::backend::{DrawStates, RenderTarget};
use crate::error::Result;
use crate::theme::Theme;
use crate::widget::events::{
    KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, TextEvent,
};
use crate::widget::{ContainerBase, Trigger, Widget, WidgetBase};

/// A rectangular group of child widgets.
///
/// The panel fills its background, clips children to its bounds, and owns
/// a nested dispatcher: events arriving in parent space are translated
/// into the panel's local space and routed among the children. The panel
/// itself is focusable so tab traversal can descend into it, and animated
/// so frame ticks reach animated descendants.
pub struct Panel {
    base: WidgetBase,
    container: ContainerBase,
    background_color: Color,
}

impl Panel {
    /// Create an empty panel of the given size.
    pub fn new(size: Size) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(size);
        base.set_focusable(true);
        base.set_animated(true);

        Self {
            base,
            container: ContainerBase::new(),
            background_color: Color::from_rgb8(220, 220, 220),
        }
    }

    /// The background fill color.
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Change the background fill color.
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// Style the panel from a theme section.
    pub fn apply_theme(&mut self, theme: &Theme, section: &str) -> Result<()> {
        self.background_color = theme.section(section)?.color("background_color")?;
        Ok(())
    }

    /// The panel's child storage and dispatcher.
    pub fn children(&self) -> &ContainerBase {
        &self.container
    }

    /// Mutable access to the panel's child storage and dispatcher.
    pub fn children_mut(&mut self) -> &mut ContainerBase {
        &mut self.container
    }
}

impl Widget for Panel {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn container_base(&self) -> Option<&ContainerBase> {
        Some(&self.container)
    }

    fn container_base_mut(&mut self) -> Option<&mut ContainerBase> {
        Some(&mut self.container)
    }

    fn hit_test(&mut self, pos: Point) -> bool {
        if self.base.is_visible() && self.base.contains_point(pos) {
            return true;
        }
        if self.base.is_hovered() {
            self.base.set_hovered(false);
            self.base.raise(Trigger::MouseLeft);
            // The mouse left the whole subtree at once.
            self.container.mouse_not_on_widgets();
        }
        false
    }

    fn on_mouse_moved(&mut self, ev: &MouseMoveEvent) {
        if !self.base.is_hovered() {
            self.base.set_hovered(true);
            let args = self.base.args(Trigger::MouseEntered).with_mouse(ev.pos);
            self.base.raise_args(args);
        }
        self.container
            .on_mouse_moved(&ev.translated(self.base.position()));
    }

    fn on_left_mouse_pressed(&mut self, ev: &MouseButtonEvent) {
        self.base.set_pressed(true);
        let args = self
            .base
            .args(Trigger::LeftMousePressed)
            .with_mouse(ev.pos);
        self.base.raise_args(args);

        self.container
            .on_mouse_pressed(&ev.translated(self.base.position()));
    }

    fn on_left_mouse_released(&mut self, ev: &MouseButtonEvent) {
        let args = self
            .base
            .args(Trigger::LeftMouseReleased)
            .with_mouse(ev.pos);
        self.base.raise_args(args);

        if self.base.is_pressed() {
            let args = self
                .base
                .args(Trigger::LeftMouseClicked)
                .with_mouse(ev.pos);
            self.base.raise_args(args);
            self.base.set_pressed(false);
        }

        self.container
            .on_mouse_released(&ev.translated(self.base.position()));
    }

    fn on_key_pressed(&mut self, ev: &KeyEvent) {
        self.container.on_key_pressed(ev);
    }

    fn on_text_entered(&mut self, ev: &TextEvent) {
        self.container.on_text_entered(ev);
    }

    fn on_mouse_wheel_moved(&mut self, ev: &MouseWheelEvent) {
        self.container
            .on_mouse_wheel_moved(&ev.translated(self.base.position()));
    }

    fn on_unfocused(&mut self) {
        self.base.raise(Trigger::Unfocused);
        // Losing focus at this level unfocuses the subtree.
        self.container.unfocus_all();
    }

    fn on_update(&mut self) {
        let elapsed = self.base.take_animation_time();
        self.container.update_time(elapsed);
    }

    fn mouse_not_on_widget(&mut self) {
        if self.base.is_hovered() {
            self.base.set_hovered(false);
            self.base.raise(Trigger::MouseLeft);
        }
        self.container.mouse_not_on_widgets();
    }

    fn mouse_no_longer_down(&mut self) {
        self.base.set_pressed(false);
        self.container.mouse_no_longer_down();
    }

    fn draw(&self, target: &mut dyn RenderTarget, states: DrawStates) {
        let rect = self.base.rect().translated(states.offset);
        if self.background_color.a != 0 {
            target.fill_rect(rect, self.background_color);
        }

        target.push_clip(rect);
        self.container
            .draw_children(target, states.translated(self.base.position()));
        target.pop_clip();
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("base", &self.base)
            .field("children", &self.container)
            .finish()
    }
}
