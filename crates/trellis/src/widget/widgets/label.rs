//! Static text widget.

use trellis_core::Color;

use crate::backend::{DrawStates, RenderTarget};
use crate::context::Context;
use crate::error::Result;
use crate::theme::Theme;
use crate::widget::{Widget, WidgetBase};

/// A piece of static text.
///
/// Labels are never focusable, so tab traversal skips them, and they have
/// no background unless one is set.
pub struct Label {
    base: WidgetBase,
    text: String,
    text_size: u32,
    text_color: Color,
    background_color: Color,
}

impl Label {
    /// Create a label with the context's default text size.
    pub fn new(ctx: &Context, text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            text: text.into(),
            text_size: ctx.default_text_size(),
            text_color: Color::BLACK,
            background_color: Color::TRANSPARENT,
        }
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Change the displayed text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The character size.
    pub fn text_size(&self) -> u32 {
        self.text_size
    }

    /// Change the character size.
    pub fn set_text_size(&mut self, size: u32) {
        self.text_size = size;
    }

    /// Change the text color.
    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    /// Change the background color. Transparent by default.
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// Style the label from a theme section.
    pub fn apply_theme(&mut self, theme: &Theme, section: &str) -> Result<()> {
        let section = theme.section(section)?;
        self.text_color = section.color("text_color")?;
        if let Ok(size) = section.number("text_size") {
            self.text_size = size;
        }
        Ok(())
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn draw(&self, target: &mut dyn RenderTarget, states: DrawStates) {
        let rect = self.base.rect().translated(states.offset);
        if self.background_color != Color::TRANSPARENT {
            target.fill_rect(rect, self.background_color);
        }
        target.draw_text(&self.text, rect.origin, self.text_size, self.text_color);
    }
}
