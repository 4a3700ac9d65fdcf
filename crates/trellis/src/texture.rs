//! Reference-counted texture cache.
//!
//! Widgets that display images share decoded bitmaps through the
//! [`TextureManager`]: the same file loaded twice yields the same
//! allocation as long as any widget still holds it. Entries are weak, so a
//! texture is dropped as soon as its last widget goes away.
//!
//! Textures also back pixel-accurate hit testing: image widgets ask
//! [`Texture::is_transparent_pixel`] whether the pointer sits on a fully
//! transparent pixel, in which case the hit counts as a miss.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use trellis_core::Size;

use crate::error::{Error, Result};

/// A decoded bitmap shared between widgets.
pub struct Texture {
    /// Path the texture was loaded from.
    path: PathBuf,
    /// Decoded pixels, always RGBA8.
    image: image::RgbaImage,
}

impl Texture {
    /// The path this texture was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The texture size in pixels.
    pub fn size(&self) -> Size {
        Size::from(self.image.dimensions())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The decoded pixel data.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.image
    }

    /// Check whether the pixel at the given coordinate is fully transparent.
    ///
    /// Out-of-range coordinates count as transparent, so callers clamping
    /// scaled hit positions never index past the bitmap.
    pub fn is_transparent_pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.image.width() || y >= self.image.height() {
            return true;
        }
        self.image.get_pixel(x, y).0[3] == 0
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("path", &self.path)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Shared texture cache keyed by file path.
#[derive(Debug, Default)]
pub struct TextureManager {
    cache: Mutex<HashMap<PathBuf, Weak<Texture>>>,
}

impl TextureManager {
    /// Create an empty texture manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a texture, reusing the cached bitmap when still alive.
    ///
    /// A file that cannot be read or decoded is a hard error; widget
    /// constructors propagate it rather than deferring the failure to
    /// dispatch time.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Texture>> {
        let path = path.as_ref();
        let mut cache = self.cache.lock();

        if let Some(texture) = cache.get(path).and_then(Weak::upgrade) {
            tracing::trace!(target: "trellis::texture", ?path, "texture cache hit");
            return Ok(texture);
        }

        let image = image::open(path)
            .map_err(|source| Error::texture(path, source))?
            .to_rgba8();
        tracing::debug!(
            target: "trellis::texture",
            ?path,
            width = image.width(),
            height = image.height(),
            "texture loaded"
        );

        let texture = Arc::new(Texture {
            path: path.to_path_buf(),
            image,
        });
        cache.insert(path.to_path_buf(), Arc::downgrade(&texture));
        Ok(texture)
    }

    /// Drop cache entries whose textures are no longer referenced.
    ///
    /// Returns the number of entries removed.
    pub fn evict_dead(&self) -> usize {
        let mut cache = self.cache.lock();
        let before = cache.len();
        cache.retain(|_, weak| weak.strong_count() > 0);
        before - cache.len()
    }

    /// Number of live cached textures.
    pub fn live_count(&self) -> usize {
        self.cache
            .lock()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}
