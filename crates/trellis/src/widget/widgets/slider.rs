//! Value slider.

use trellis_core::{Color, Point, Rect};

use crate::backend::{DrawStates, RenderTarget};
use crate::error::Result;
use crate::theme::Theme;
use crate::widget::events::{MouseButtonEvent, MouseMoveEvent, MouseWheelEvent};
use crate::widget::{Trigger, Widget, WidgetBase, WidgetPhases};

/// A slider selecting an integer value from a range.
///
/// Dragging the thumb follows the pointer (the widget is draggable, so
/// moves keep arriving while pressed even when the pointer leaves the
/// track), pressing the track jumps the value to the pressed position, and
/// the mouse wheel adjusts the value in place. `ValueChanged` is raised
/// each time the value actually changes.
///
/// The slider never keeps keyboard focus; pressing it clears the focus
/// like a press on empty space would.
pub struct Slider {
    base: WidgetBase,
    minimum: i32,
    maximum: i32,
    value: i32,
    vertical: bool,
    thumb_grabbed: bool,
    thumb_grab_offset: f32,
    track_color: Color,
    thumb_color: Color,
    thumb_hover_color: Color,
}

impl Slider {
    /// Create a vertical slider over the range 0..=10, at 0.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_draggable(true);
        base.set_phases(WidgetPhases::HOVER);

        Self {
            base,
            minimum: 0,
            maximum: 10,
            value: 0,
            vertical: true,
            thumb_grabbed: false,
            thumb_grab_offset: 0.0,
            track_color: Color::from_rgb8(200, 200, 200),
            thumb_color: Color::from_rgb8(70, 130, 180),
            thumb_hover_color: Color::from_rgb8(100, 160, 210),
        }
    }

    /// The current value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Change the value, clamped to the range.
    ///
    /// Raises `ValueChanged` when the clamped value differs from the
    /// current one.
    pub fn set_value(&mut self, value: i32) {
        let value = value.clamp(self.minimum, self.maximum);
        if value != self.value {
            self.value = value;
            if self.base.callbacks().has_listeners(Trigger::ValueChanged) {
                let args = self
                    .base
                    .args(Trigger::ValueChanged)
                    .with_value(value as f32);
                self.base.raise_args(args);
            }
        }
    }

    /// The lower bound of the range.
    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    /// Change the lower bound. A maximum below it is pulled up, and the
    /// value is re-clamped.
    pub fn set_minimum(&mut self, minimum: i32) {
        self.minimum = minimum;
        if self.maximum < minimum {
            self.maximum = minimum;
        }
        self.set_value(self.value);
    }

    /// The upper bound of the range.
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// Change the upper bound. A minimum above it is pulled down, and the
    /// value is re-clamped.
    pub fn set_maximum(&mut self, maximum: i32) {
        self.maximum = maximum;
        if self.minimum > maximum {
            self.minimum = maximum;
        }
        self.set_value(self.value);
    }

    /// Whether the slider runs top-to-bottom rather than left-to-right.
    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    /// Switch between vertical and horizontal orientation.
    pub fn set_vertical(&mut self, vertical: bool) {
        self.vertical = vertical;
    }

    /// Style the slider from a theme section.
    pub fn apply_theme(&mut self, theme: &Theme, section: &str) -> Result<()> {
        let section = theme.section(section)?;
        if let Ok(color) = section.color("track_color") {
            self.track_color = color;
        }
        if let Ok(color) = section.color("thumb_color") {
            self.thumb_color = color;
        }
        if let Ok(color) = section.color("thumb_hover_color") {
            self.thumb_hover_color = color;
        }
        Ok(())
    }

    /// The thumb's bounds in parent space: a square of the track's cross
    /// dimension, centered on the current value.
    fn thumb_rect(&self) -> Rect {
        let rect = self.base.rect();
        let span = self.maximum - self.minimum;
        let ratio = if span > 0 {
            (self.value - self.minimum) as f32 / span as f32
        } else {
            0.0
        };

        if self.vertical {
            let side = rect.size.width;
            Rect::new(
                rect.left(),
                rect.top() + ratio * rect.size.height - side / 2.0,
                side,
                side,
            )
        } else {
            let side = rect.size.height;
            Rect::new(
                rect.left() + ratio * rect.size.width - side / 2.0,
                rect.top(),
                side,
                side,
            )
        }
    }

    /// The value the pointer position corresponds to.
    ///
    /// When the press grabbed the thumb, the position is corrected by the
    /// grab offset so the thumb does not jump under the pointer.
    fn value_at(&self, pos: Point) -> i32 {
        let rect = self.base.rect();
        let (mut offset, length, side) = if self.vertical {
            (pos.y - rect.top(), rect.size.height, rect.size.width)
        } else {
            (pos.x - rect.left(), rect.size.width, rect.size.height)
        };
        if self.thumb_grabbed {
            offset = offset - self.thumb_grab_offset + side / 2.0;
        }
        if offset <= 0.0 || length <= 0.0 {
            return self.minimum;
        }

        let span = (self.maximum - self.minimum) as f32;
        (offset / length * span + self.minimum as f32 + 0.5) as i32
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Slider {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn hit_test(&mut self, pos: Point) -> bool {
        if self.base.is_visible() {
            let thumb = self.thumb_rect();
            if thumb.contains(pos) {
                self.thumb_grabbed = true;
                self.thumb_grab_offset = if self.vertical {
                    pos.y - thumb.top()
                } else {
                    pos.x - thumb.left()
                };
                return true;
            }
            self.thumb_grabbed = false;
            if self.base.contains_point(pos) {
                return true;
            }
        }
        self.mouse_not_on_widget();
        false
    }

    fn on_mouse_moved(&mut self, ev: &MouseMoveEvent) {
        if !self.base.is_hovered() {
            self.base.set_hovered(true);
            let args = self.base.args(Trigger::MouseEntered).with_mouse(ev.pos);
            self.base.raise_args(args);
        }

        if self.base.is_pressed() {
            self.set_value(self.value_at(ev.pos));
        }
    }

    fn on_left_mouse_pressed(&mut self, ev: &MouseButtonEvent) {
        self.base.set_pressed(true);
        let args = self
            .base
            .args(Trigger::LeftMousePressed)
            .with_mouse(ev.pos);
        self.base.raise_args(args);

        // The value follows the press position immediately, not only on
        // the next move.
        self.on_mouse_moved(&MouseMoveEvent { pos: ev.pos });
    }

    fn on_left_mouse_released(&mut self, ev: &MouseButtonEvent) {
        // Ending a drag is not a click.
        let args = self
            .base
            .args(Trigger::LeftMouseReleased)
            .with_mouse(ev.pos);
        self.base.raise_args(args);
        self.base.set_pressed(false);
    }

    fn on_mouse_wheel_moved(&mut self, ev: &MouseWheelEvent) {
        self.set_value(self.value - ev.delta as i32);
    }

    fn draw(&self, target: &mut dyn RenderTarget, states: DrawStates) {
        let rect = self.base.rect().translated(states.offset);
        let track = if self.vertical {
            Rect::new(
                rect.left() + rect.size.width * 0.4,
                rect.top(),
                rect.size.width * 0.2,
                rect.size.height,
            )
        } else {
            Rect::new(
                rect.left(),
                rect.top() + rect.size.height * 0.4,
                rect.size.width,
                rect.size.height * 0.2,
            )
        };
        target.fill_rect(track, self.track_color);

        let color = if self.base.is_hovered() {
            self.thumb_hover_color
        } else {
            self.thumb_color
        };
        target.fill_rect(self.thumb_rect().translated(states.offset), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::widget::events::MouseButton;

    fn horizontal_slider() -> Slider {
        let mut slider = Slider::new();
        slider.set_vertical(false);
        slider.base_mut().set_position(Point::new(0.0, 0.0));
        slider.base_mut().set_size((100.0, 10.0).into());
        slider
    }

    fn press(pos: Point) -> MouseButtonEvent {
        MouseButtonEvent {
            button: MouseButton::Left,
            pos,
        }
    }

    #[test]
    fn wheel_adjusts_and_clamps() {
        let mut slider = horizontal_slider();
        slider.set_value(5);

        let changes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&changes);
        slider.connect(Trigger::ValueChanged, move |args| {
            assert!(args.value.is_some());
            counter.fetch_add(1, Ordering::SeqCst);
        });

        slider.on_mouse_wheel_moved(&MouseWheelEvent {
            delta: 2.0,
            pos: Point::new(50.0, 5.0),
        });
        assert_eq!(slider.value(), 3);

        slider.on_mouse_wheel_moved(&MouseWheelEvent {
            delta: 10.0,
            pos: Point::new(50.0, 5.0),
        });
        assert_eq!(slider.value(), 0, "clamped at the minimum");

        // Already at the floor: no change, no callback.
        slider.on_mouse_wheel_moved(&MouseWheelEvent {
            delta: 1.0,
            pos: Point::new(50.0, 5.0),
        });
        assert_eq!(slider.value(), 0);
        assert_eq!(changes.load(Ordering::SeqCst), 2);

        slider.on_mouse_wheel_moved(&MouseWheelEvent {
            delta: -20.0,
            pos: Point::new(50.0, 5.0),
        });
        assert_eq!(slider.value(), 10, "clamped at the maximum");
    }

    #[test]
    fn press_jumps_to_track_position_and_drag_follows() {
        let mut slider = horizontal_slider();

        // The thumb sits at the left edge; a press further along lands on
        // the track and jumps the value.
        assert!(slider.hit_test(Point::new(35.0, 5.0)));
        slider.on_left_mouse_pressed(&press(Point::new(35.0, 5.0)));
        assert_eq!(slider.value(), 4);

        slider.on_mouse_moved(&MouseMoveEvent {
            pos: Point::new(75.0, 5.0),
        });
        assert_eq!(slider.value(), 8);

        // Dragging past the start pins the value at the minimum.
        slider.on_mouse_moved(&MouseMoveEvent {
            pos: Point::new(-30.0, 5.0),
        });
        assert_eq!(slider.value(), 0);

        slider.on_left_mouse_released(&press(Point::new(-30.0, 5.0)));
        assert!(!slider.base().is_pressed());

        // Released: moves no longer change the value.
        slider.on_mouse_moved(&MouseMoveEvent {
            pos: Point::new(90.0, 5.0),
        });
        assert_eq!(slider.value(), 0);
    }

    #[test]
    fn grabbing_the_thumb_keeps_the_grab_offset() {
        let mut slider = horizontal_slider();
        slider.set_value(5);

        // Thumb spans [45, 55); grab it 3px right of its center.
        assert!(slider.hit_test(Point::new(53.0, 5.0)));
        slider.on_left_mouse_pressed(&press(Point::new(53.0, 5.0)));
        assert_eq!(slider.value(), 5, "pressing the thumb does not jump");

        slider.on_mouse_moved(&MouseMoveEvent {
            pos: Point::new(73.0, 5.0),
        });
        assert_eq!(slider.value(), 7);
    }

    #[test]
    fn range_changes_reclamp_the_value() {
        let mut slider = horizontal_slider();
        slider.set_value(8);

        slider.set_maximum(5);
        assert_eq!(slider.value(), 5);

        slider.set_minimum(7);
        assert_eq!(slider.minimum(), 7);
        assert_eq!(slider.maximum(), 7, "maximum pulled up to the minimum");
        assert_eq!(slider.value(), 7);
    }
}
