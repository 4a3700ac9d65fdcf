//! Two-state checkbox.

use trellis_core::{Color, Rect};

use crate::backend::{DrawStates, RenderTarget};
use crate::context::Context;
use crate::error::Result;
use crate::theme::Theme;
use crate::widget::events::Key;
use crate::widget::{KeyEvent, MouseButtonEvent, Trigger, Widget, WidgetBase, WidgetPhases};

/// A checkbox with a caption.
///
/// Toggles when a click completes on it and when space or return is
/// pressed while it has focus, raising `Checked` or `Unchecked` each time
/// the state flips.
pub struct Checkbox {
    base: WidgetBase,
    caption: String,
    text_size: u32,
    checked: bool,
    text_color: Color,
    box_color: Color,
    mark_color: Color,
}

impl Checkbox {
    /// Create an unchecked checkbox.
    pub fn new(ctx: &Context, caption: impl Into<String>) -> Self {
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.set_phases(WidgetPhases::HOVER.with(WidgetPhases::SELECTED));

        Self {
            base,
            caption: caption.into(),
            text_size: ctx.default_text_size(),
            checked: false,
            text_color: Color::BLACK,
            box_color: Color::WHITE,
            mark_color: Color::from_rgb8(70, 130, 180),
        }
    }

    /// Whether the checkbox is checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Check the checkbox. Raises `Checked` when the state changes.
    pub fn check(&mut self) {
        if !self.checked {
            self.checked = true;
            let args = self.base.args(Trigger::Checked).with_checked(true);
            self.base.raise_args(args);
        }
    }

    /// Uncheck the checkbox. Raises `Unchecked` when the state changes.
    pub fn uncheck(&mut self) {
        if self.checked {
            self.checked = false;
            let args = self.base.args(Trigger::Unchecked).with_checked(false);
            self.base.raise_args(args);
        }
    }

    /// The caption text.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Style the checkbox from a theme section.
    pub fn apply_theme(&mut self, theme: &Theme, section: &str) -> Result<()> {
        let section = theme.section(section)?;
        self.text_color = section.color("text_color")?;
        if let Ok(color) = section.color("box_color") {
            self.box_color = color;
        }
        if let Ok(color) = section.color("mark_color") {
            self.mark_color = color;
        }
        Ok(())
    }

    fn toggle(&mut self) {
        if self.checked {
            self.uncheck();
        } else {
            self.check();
        }
    }
}

impl Widget for Checkbox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn on_left_mouse_released(&mut self, ev: &MouseButtonEvent) {
        // Toggle before the click callback so listeners observe the new
        // state.
        if self.base.is_pressed() {
            self.toggle();
        }

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
    }

    fn on_key_pressed(&mut self, ev: &KeyEvent) {
        match ev.key {
            Key::Space => {
                self.toggle();
                self.base.raise(Trigger::SpaceKeyPressed);
            }
            Key::Return => {
                self.toggle();
                self.base.raise(Trigger::ReturnKeyPressed);
            }
            _ => {}
        }
    }

    fn draw(&self, target: &mut dyn RenderTarget, states: DrawStates) {
        let rect = self.base.rect().translated(states.offset);
        let box_side = rect.size.height;
        let box_rect = Rect {
            origin: rect.origin,
            size: (box_side, box_side).into(),
        };

        target.fill_rect(box_rect, self.box_color);
        if self.checked {
            let inset = box_side * 0.2;
            target.fill_rect(
                Rect::new(
                    box_rect.left() + inset,
                    box_rect.top() + inset,
                    box_side - 2.0 * inset,
                    box_side - 2.0 * inset,
                ),
                self.mark_color,
            );
        }

        let text_pos = trellis_core::Point::new(rect.left() + box_side * 1.2, rect.top());
        target.draw_text(&self.caption, text_pos, self.text_size, self.text_color);
    }
}
