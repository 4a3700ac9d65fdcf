//! Interface to the rendering/windowing collaborator.
//!
//! Trellis does not render anything itself; it submits draw calls to an
//! implementation of [`RenderTarget`] supplied by the embedding
//! application. The trait is the complete surface the toolkit needs from a
//! renderer: filled rectangles, textured quads, text runs, and a clip
//! (scissor) stack.

use std::sync::Arc;

use trellis_core::{Color, Point, Rect};

use crate::texture::Texture;

/// Transform state carried through a recursive draw pass.
///
/// Containers accumulate their own origin into `offset` before drawing
/// children, so leaf widgets always draw with coordinates relative to their
/// parent while the target receives world-space positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawStates {
    /// Accumulated translation from the root to the current parent.
    pub offset: Point,
}

impl DrawStates {
    /// States with no accumulated transform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// States translated by an additional offset.
    pub fn translated(&self, offset: Point) -> Self {
        Self {
            offset: self.offset + offset,
        }
    }
}

/// Draw-call sink provided by the rendering library.
pub trait RenderTarget {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a texture stretched into a rectangle, tinted by `tint`
    /// (use `Color::WHITE` for no tint; alpha applies opacity).
    fn draw_texture(&mut self, texture: &Arc<Texture>, rect: Rect, tint: Color);

    /// Draw a text run at a position.
    fn draw_text(&mut self, text: &str, pos: Point, size: u32, color: Color);

    /// Push a clip rectangle (intersected with the current clip).
    fn push_clip(&mut self, rect: Rect);

    /// Pop the most recently pushed clip rectangle.
    fn pop_clip(&mut self);
}

/// The world-space view used to interpret raw window events.
///
/// Raw input arrives in window pixel coordinates; the view maps it into the
/// coordinate space the widget tree lives in.
#[derive(Debug, Clone, Copy)]
pub struct View {
    /// World coordinate of the window's top-left pixel.
    pub origin: Point,
    /// World units per pixel.
    pub scale: f32,
}

impl View {
    /// Map a pixel position to world coordinates.
    pub fn map_pixel_to_coords(&self, pixel: Point) -> Point {
        Point::new(
            self.origin.x + pixel.x * self.scale,
            self.origin.y + pixel.y * self.scale,
        )
    }
}

impl Default for View {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_maps_pixels_to_world() {
        let view = View {
            origin: Point::new(100.0, 50.0),
            scale: 2.0,
        };
        let world = view.map_pixel_to_coords(Point::new(10.0, 20.0));
        assert_eq!(world, Point::new(120.0, 90.0));
    }

    #[test]
    fn draw_states_accumulate() {
        let states = DrawStates::identity()
            .translated(Point::new(10.0, 10.0))
            .translated(Point::new(5.0, -2.0));
        assert_eq!(states.offset, Point::new(15.0, 8.0));
    }
}
