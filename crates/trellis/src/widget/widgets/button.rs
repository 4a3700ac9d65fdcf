//! Push button.

use trellis_core::Color;

use crate::backend::{DrawStates, RenderTarget};
use crate::context::Context;
use crate::error::Result;
use crate::theme::Theme;
use crate::widget::{KeyEvent, Trigger, Widget, WidgetBase, WidgetPhases};
use crate::widget::events::Key;

/// A clickable, focusable push button.
///
/// Besides the click protocol inherited from the trait defaults, a focused
/// button activates on space or return, raising the matching trigger.
pub struct Button {
    base: WidgetBase,
    caption: String,
    text_size: u32,
    text_color: Color,
    background_color: Color,
    hover_color: Color,
    down_color: Color,
}

impl Button {
    /// Create a button with the given caption.
    pub fn new(ctx: &Context, caption: impl Into<String>) -> Self {
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.set_phases(WidgetPhases::HOVER.with(WidgetPhases::MOUSE_DOWN));

        Self {
            base,
            caption: caption.into(),
            text_size: ctx.default_text_size(),
            text_color: Color::WHITE,
            background_color: Color::from_rgb8(70, 130, 180),
            hover_color: Color::from_rgb8(100, 150, 200),
            down_color: Color::from_rgb8(50, 100, 150),
        }
    }

    /// The caption text.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Change the caption text.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// Change the character size of the caption.
    pub fn set_text_size(&mut self, size: u32) {
        self.text_size = size;
    }

    /// Style the button from a theme section.
    pub fn apply_theme(&mut self, theme: &Theme, section: &str) -> Result<()> {
        let section = theme.section(section)?;
        self.background_color = section.color("background_color")?;
        self.text_color = section.color("text_color")?;
        if let Ok(color) = section.color("hover_color") {
            self.hover_color = color;
        }
        if let Ok(color) = section.color("down_color") {
            self.down_color = color;
        }
        if let Ok(size) = section.number("text_size") {
            self.text_size = size;
        }
        Ok(())
    }

    fn fill_color(&self) -> Color {
        if self.base.is_pressed() {
            self.down_color
        } else if self.base.is_hovered() {
            self.hover_color
        } else {
            self.background_color
        }
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn on_key_pressed(&mut self, ev: &KeyEvent) {
        match ev.key {
            Key::Space => self.base.raise(Trigger::SpaceKeyPressed),
            Key::Return => self.base.raise(Trigger::ReturnKeyPressed),
            _ => {}
        }
    }

    fn draw(&self, target: &mut dyn RenderTarget, states: DrawStates) {
        let rect = self.base.rect().translated(states.offset);
        target.fill_rect(rect, self.fill_color());
        target.draw_text(&self.caption, rect.origin, self.text_size, self.text_color);
    }
}
