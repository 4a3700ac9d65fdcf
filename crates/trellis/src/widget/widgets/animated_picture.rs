//! Frame-sequence image widget.

use std::sync::Arc;
use std::time::Duration;

use trellis_core::Color;

use crate::backend::{DrawStates, RenderTarget};
use crate::context::Context;
use crate::error::Result;
use crate::texture::Texture;
use crate::widget::{Trigger, Widget, WidgetBase};

/// A picture cycling through frames with per-frame durations.
///
/// The widget is animated: the dispatcher accumulates elapsed time into
/// its base every frame, and [`Widget::on_update`] consumes that time to
/// advance as many frames as it covers. A frame with zero duration blocks
/// the animation at that frame. When a non-looping run passes the last
/// frame, playback stops and `AnimationFinished` is raised once.
pub struct AnimatedPicture {
    base: WidgetBase,
    frames: Vec<Arc<Texture>>,
    durations: Vec<Duration>,
    current_frame: Option<usize>,
    playing: bool,
    looping: bool,
    tint: Color,
}

impl AnimatedPicture {
    /// Create an animation with no frames.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_animated(true);

        Self {
            base,
            frames: Vec::new(),
            durations: Vec::new(),
            current_frame: None,
            playing: false,
            looping: false,
            tint: Color::WHITE,
        }
    }

    /// Append a frame loaded from an image file.
    ///
    /// The first frame becomes the displayed frame and fixes the widget's
    /// size.
    pub fn add_frame(
        &mut self,
        ctx: &Context,
        path: impl AsRef<std::path::Path>,
        duration: Duration,
    ) -> Result<()> {
        let texture = ctx.textures().load(path)?;
        if self.frames.is_empty() {
            self.current_frame = Some(0);
            self.base.set_size(texture.size());
        }
        self.frames.push(texture);
        self.durations.push(duration);
        Ok(())
    }

    /// Start or resume playback. A no-op without frames.
    pub fn play(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.playing = true;
        self.base.take_animation_time();
    }

    /// Pause playback, keeping the current frame.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Stop playback and rewind to the first frame.
    pub fn stop(&mut self) {
        self.playing = false;
        self.current_frame = if self.frames.is_empty() { None } else { Some(0) };
    }

    /// Jump to a frame. Clamps to the last frame and returns `false` when
    /// the index is out of range.
    pub fn set_frame(&mut self, frame: usize) -> bool {
        if self.frames.is_empty() {
            self.current_frame = None;
            return false;
        }
        if frame >= self.frames.len() {
            self.current_frame = Some(self.frames.len() - 1);
            return false;
        }
        self.current_frame = Some(frame);
        true
    }

    /// The index of the displayed frame, if any frames are loaded.
    pub fn current_frame(&self) -> Option<usize> {
        self.current_frame
    }

    /// Number of loaded frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Remove a frame. Returns `false` when the index is out of range.
    pub fn remove_frame(&mut self, frame: usize) -> bool {
        if frame >= self.frames.len() {
            return false;
        }
        self.frames.remove(frame);
        self.durations.remove(frame);
        self.current_frame = match self.current_frame {
            _ if self.frames.is_empty() => None,
            Some(current) if current >= frame => Some(current.saturating_sub(1)),
            other => other,
        };
        true
    }

    /// Remove every frame and reset the animation.
    pub fn remove_all_frames(&mut self) {
        self.frames.clear();
        self.durations.clear();
        self.stop();
    }

    /// Whether the animation restarts from the first frame after the last.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Turn looping on or off.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Whether the animation is currently playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Tint (and opacity, via alpha) applied when drawing.
    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }
}

impl Default for AnimatedPicture {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for AnimatedPicture {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn on_update(&mut self) {
        if !self.playing {
            return;
        }
        let Some(mut frame) = self.current_frame else {
            return;
        };

        while self.base.animation_time_elapsed() > self.durations[frame] {
            if self.durations[frame].is_zero() {
                // A zero-duration frame blocks the animation there.
                self.base.take_animation_time();
                break;
            }

            self.base.consume_animation_time(self.durations[frame]);

            if frame + 1 < self.frames.len() {
                frame += 1;
            } else {
                if self.looping {
                    frame = 0;
                } else {
                    self.playing = false;
                    self.base.take_animation_time();
                }
                self.base.raise(Trigger::AnimationFinished);
                if !self.playing {
                    break;
                }
            }
        }

        self.current_frame = Some(frame);
    }

    fn draw(&self, target: &mut dyn RenderTarget, states: DrawStates) {
        if let Some(frame) = self.current_frame {
            let rect = self.base.rect().translated(states.offset);
            target.draw_texture(&self.frames[frame], rect, self.tint);
        }
    }
}
