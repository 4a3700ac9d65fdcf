//! Shared toolkit context.
//!
//! The original toolkit kept the tab-key flag, default text size and the
//! texture cache in process-wide globals. Here they live in an explicitly
//! constructed [`Context`] that the application hands to [`Gui`](crate::Gui)
//! and to widget constructors, so independent GUI roots can coexist and
//! tests run in isolation.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use crate::texture::TextureManager;

#[derive(Debug)]
struct ContextInner {
    /// Whether the tab key moves focus.
    tab_key_navigation: AtomicBool,
    /// Default text size handed to text widgets that don't specify one.
    default_text_size: AtomicU32,
    /// Shared texture cache.
    textures: TextureManager,
}

/// Shared state for one family of GUI roots.
///
/// Cheap to clone; all clones refer to the same underlying state.
#[derive(Debug, Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Context {
    /// Create a context with default settings.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContextInner {
                tab_key_navigation: AtomicBool::new(true),
                default_text_size: AtomicU32::new(16),
                textures: TextureManager::new(),
            }),
        }
    }

    /// Whether pressing tab moves focus to the next widget.
    pub fn tab_key_navigation(&self) -> bool {
        self.inner.tab_key_navigation.load(Ordering::Relaxed)
    }

    /// Enable or disable tab-key focus navigation.
    pub fn set_tab_key_navigation(&self, enabled: bool) {
        self.inner.tab_key_navigation.store(enabled, Ordering::Relaxed);
    }

    /// Default text size for newly constructed text widgets.
    pub fn default_text_size(&self) -> u32 {
        self.inner.default_text_size.load(Ordering::Relaxed)
    }

    /// Set the default text size for newly constructed text widgets.
    pub fn set_default_text_size(&self, size: u32) {
        self.inner.default_text_size.store(size, Ordering::Relaxed);
    }

    /// The shared texture cache.
    pub fn textures(&self) -> &TextureManager {
        &self.inner.textures
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_are_independent() {
        let a = Context::new();
        let b = Context::new();

        a.set_tab_key_navigation(false);
        assert!(!a.tab_key_navigation());
        assert!(b.tab_key_navigation());
    }

    #[test]
    fn clones_share_state() {
        let a = Context::new();
        let b = a.clone();

        a.set_default_text_size(24);
        assert_eq!(b.default_text_size(), 24);
    }
}
