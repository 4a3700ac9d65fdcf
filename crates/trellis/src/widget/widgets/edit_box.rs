//! Single-line text input.

use trellis_core::{Color, Point, Rect};

use crate::backend::{DrawStates, RenderTarget};
use crate::context::Context;
use crate::error::Result;
use crate::theme::Theme;
use crate::widget::events::Key;
use crate::widget::{KeyEvent, TextEvent, Trigger, Widget, WidgetBase, WidgetPhases};

/// A single-line text entry field.
///
/// Text arrives through the dispatcher's text routing (printable code
/// points only); the caret moves with the left/right arrows, backspace
/// deletes before the caret and delete after it. `TextChanged` is raised
/// for every edit and `ReturnKeyPressed` carries the current text.
pub struct EditBox {
    base: WidgetBase,
    text: String,
    caret: usize,
    max_length: Option<usize>,
    text_size: u32,
    text_color: Color,
    background_color: Color,
    caret_color: Color,
}

impl EditBox {
    /// Create an empty edit box.
    pub fn new(ctx: &Context) -> Self {
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.set_phases(WidgetPhases::HOVER.with(WidgetPhases::FOCUSED));

        Self {
            base,
            text: String::new(),
            caret: 0,
            max_length: None,
            text_size: ctx.default_text_size(),
            text_color: Color::BLACK,
            background_color: Color::WHITE,
            caret_color: Color::BLACK,
        }
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, placing the caret at the end.
    ///
    /// Raises `TextChanged` when the content differs; text beyond the
    /// maximum length is truncated on a character boundary.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        if let Some(max) = self.max_length {
            if text.chars().count() > max {
                text = text.chars().take(max).collect();
            }
        }
        if text != self.text {
            self.text = text;
            self.caret = self.text.chars().count();
            self.raise_text_changed();
        } else {
            self.caret = self.text.chars().count();
        }
    }

    /// Caret position in characters from the start of the text.
    pub fn caret_position(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamped to the text length.
    pub fn set_caret_position(&mut self, position: usize) {
        self.caret = position.min(self.text.chars().count());
    }

    /// Maximum number of characters, or `None` for unlimited.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Limit the text length. Existing text is truncated to fit.
    pub fn set_max_length(&mut self, max: Option<usize>) {
        self.max_length = max;
        if let Some(max) = max {
            if self.text.chars().count() > max {
                self.text = self.text.chars().take(max).collect();
                self.caret = self.caret.min(max);
                self.raise_text_changed();
            }
        }
    }

    /// Style the edit box from a theme section.
    pub fn apply_theme(&mut self, theme: &Theme, section: &str) -> Result<()> {
        let section = theme.section(section)?;
        self.background_color = section.color("background_color")?;
        self.text_color = section.color("text_color")?;
        if let Ok(color) = section.color("caret_color") {
            self.caret_color = color;
        }
        if let Ok(size) = section.number("text_size") {
            self.text_size = size;
        }
        Ok(())
    }

    fn raise_text_changed(&self) {
        // The payload clones the text; only build it for subscribers.
        if self.base.callbacks().has_listeners(Trigger::TextChanged) {
            let args = self
                .base
                .args(Trigger::TextChanged)
                .with_text(self.text.clone());
            self.base.raise_args(args);
        }
    }

    /// Byte offset of the caret's character position.
    fn caret_byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.caret)
            .map_or(self.text.len(), |(index, _)| index)
    }
}

impl Widget for EditBox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn on_key_pressed(&mut self, ev: &KeyEvent) {
        match ev.key {
            Key::Left => {
                self.caret = self.caret.saturating_sub(1);
            }
            Key::Right => {
                self.caret = (self.caret + 1).min(self.text.chars().count());
            }
            Key::Backspace => {
                if self.caret > 0 {
                    self.caret -= 1;
                    let index = self.caret_byte_index();
                    self.text.remove(index);
                    self.raise_text_changed();
                }
            }
            Key::Delete => {
                if self.caret < self.text.chars().count() {
                    let index = self.caret_byte_index();
                    self.text.remove(index);
                    self.raise_text_changed();
                }
            }
            Key::Return => {
                let args = self
                    .base
                    .args(Trigger::ReturnKeyPressed)
                    .with_text(self.text.clone());
                self.base.raise_args(args);
            }
            _ => {}
        }
    }

    fn on_text_entered(&mut self, ev: &TextEvent) {
        if let Some(max) = self.max_length {
            if self.text.chars().count() >= max {
                return;
            }
        }
        let index = self.caret_byte_index();
        self.text.insert(index, ev.unicode);
        self.caret += 1;
        self.raise_text_changed();
    }

    fn draw(&self, target: &mut dyn RenderTarget, states: DrawStates) {
        let rect = self.base.rect().translated(states.offset);
        target.fill_rect(rect, self.background_color);
        target.draw_text(&self.text, rect.origin, self.text_size, self.text_color);

        if self.base.is_focused() {
            // Approximate caret x from the character position.
            let advance = self.text_size as f32 * 0.6;
            let x = rect.left() + self.caret as f32 * advance;
            target.fill_rect(
                Rect {
                    origin: Point::new(x, rect.top()),
                    size: (1.0, rect.size.height).into(),
                },
                self.caret_color,
            );
        }
    }
}
