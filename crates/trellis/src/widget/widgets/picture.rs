//! Textured image widget.

use std::sync::Arc;

use trellis_core::{Color, Point};

use crate::backend::{DrawStates, RenderTarget};
use crate::context::Context;
use crate::error::Result;
use crate::texture::Texture;
use crate::widget::{Widget, WidgetBase};

/// A widget displaying a single texture.
///
/// Hit testing is pixel-accurate: a pointer position over a fully
/// transparent pixel of the (scaled) image counts as a miss, so widgets
/// underneath an irregular sprite stay reachable.
pub struct Picture {
    base: WidgetBase,
    texture: Arc<Texture>,
    tint: Color,
}

impl Picture {
    /// Load a picture from an image file.
    ///
    /// The widget takes the texture's pixel size; resizing afterwards
    /// scales the image.
    pub fn new(ctx: &Context, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let texture = ctx.textures().load(path)?;
        let mut base = WidgetBase::new();
        base.set_size(texture.size());

        Ok(Self {
            base,
            texture,
            tint: Color::WHITE,
        })
    }

    /// The displayed texture.
    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    /// Make the picture follow the mouse while pressed.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.base.set_draggable(draggable);
    }

    /// Tint (and opacity, via alpha) applied when drawing.
    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    /// Map a point in parent space to a source pixel of the texture.
    fn source_pixel(&self, pos: Point) -> (u32, u32) {
        let local = pos - self.base.position();
        let size = self.base.size();
        let scale_x = size.width / self.texture.width() as f32;
        let scale_y = size.height / self.texture.height() as f32;
        ((local.x / scale_x) as u32, (local.y / scale_y) as u32)
    }
}

impl Widget for Picture {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn hit_test(&mut self, pos: Point) -> bool {
        if self.base.is_visible() && self.base.contains_point(pos) {
            let (x, y) = self.source_pixel(pos);
            if !self.texture.is_transparent_pixel(x, y) {
                return true;
            }
        }
        self.mouse_not_on_widget();
        false
    }

    fn draw(&self, target: &mut dyn RenderTarget, states: DrawStates) {
        let rect = self.base.rect().translated(states.offset);
        target.draw_texture(&self.texture, rect, self.tint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite_png(dir: &std::path::Path) -> std::path::PathBuf {
        // Left column opaque, right column transparent.
        let mut image = image::RgbaImage::new(2, 2);
        image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        image.put_pixel(0, 1, image::Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, image::Rgba([0, 0, 0, 0]));
        image.put_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
        let path = dir.join("sprite.png");
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn transparent_pixels_are_hit_test_misses() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new();
        let mut picture = Picture::new(&ctx, sprite_png(dir.path())).unwrap();

        // Scale the 2x2 sprite up to 20x20 at (10, 10).
        picture.base_mut().set_position(Point::new(10.0, 10.0));
        picture.base_mut().set_size((20.0, 20.0).into());

        assert!(picture.hit_test(Point::new(12.0, 15.0)), "opaque half");
        assert!(
            !picture.hit_test(Point::new(28.0, 15.0)),
            "transparent half, inside the bounding rectangle"
        );
        assert!(!picture.hit_test(Point::new(50.0, 50.0)), "outside");
    }

    #[test]
    fn takes_texture_size_on_construction() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new();
        let picture = Picture::new(&ctx, sprite_png(dir.path())).unwrap();
        assert_eq!(picture.size(), (2.0, 2.0).into());
    }
}
