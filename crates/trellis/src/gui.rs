//! Top-level GUI root.
//!
//! [`Gui`] owns the root widget tree and drives it from the embedding
//! application's event loop: raw window events go into
//! [`Gui::handle_event`], and once per frame [`Gui::draw`] advances
//! animations and redraws the tree.

use std::time::Instant;

use trellis_core::{Point, WidgetId};

use crate::backend::{DrawStates, RenderTarget, View};
use crate::context::Context;
use crate::widget::{ContainerBase, Event, Widget};

/// The root of a widget tree.
pub struct Gui {
    ctx: Context,
    root: ContainerBase,
    view: View,
    last_frame: Option<Instant>,
}

impl Gui {
    /// Create an empty GUI using the given shared context.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            root: ContainerBase::new(),
            view: View::default(),
            last_frame: None,
        }
    }

    /// The shared context this GUI was built with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The view mapping window pixels to world coordinates.
    pub fn view(&self) -> View {
        self.view
    }

    /// Replace the view, e.g. after a window resize.
    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// The root container holding the top-level widgets.
    pub fn root(&self) -> &ContainerBase {
        &self.root
    }

    /// Mutable access to the root container.
    pub fn root_mut(&mut self) -> &mut ContainerBase {
        &mut self.root
    }

    /// Add a top-level widget under a name.
    pub fn add(&mut self, widget: Box<dyn Widget>, name: impl Into<String>) -> WidgetId {
        self.root.add(widget, name)
    }

    /// Find a widget by name anywhere in the tree.
    pub fn get(&self, name: &str) -> Option<&dyn Widget> {
        self.root.get(name)
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Widget + 'static)> {
        self.root.get_mut(name)
    }

    /// Remove a top-level widget by id.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        self.root.remove(id)
    }

    /// Focus a top-level widget by id.
    pub fn focus_widget(&mut self, id: WidgetId) -> bool {
        self.root.focus_widget(id)
    }

    /// Unfocus the focused top-level widget, if any.
    pub fn unfocus_all(&mut self) {
        self.root.unfocus_all();
    }

    /// Route a raw window event into the widget tree.
    ///
    /// Mouse positions are mapped through the view before dispatch; key,
    /// text and tab handling follow the dispatcher's routing rules.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::MouseMoved(mut ev) => {
                ev.pos = self.map(ev.pos);
                self.root.on_mouse_moved(&ev);
            }
            Event::MouseButtonPressed(mut ev) => {
                ev.pos = self.map(ev.pos);
                self.root.on_mouse_pressed(&ev);
            }
            Event::MouseButtonReleased(mut ev) => {
                ev.pos = self.map(ev.pos);
                self.root.on_mouse_released(&ev);
            }
            Event::KeyPressed(ev) => {
                self.root.on_key_pressed(&ev);
            }
            Event::KeyReleased(ev) => {
                let ctx = self.ctx.clone();
                self.root.on_key_released(&ctx, &ev);
            }
            Event::TextEntered(ev) => {
                self.root.on_text_entered(&ev);
            }
            Event::MouseWheelMoved(mut ev) => {
                ev.pos = self.map(ev.pos);
                self.root.on_mouse_wheel_moved(&ev);
            }
        }
    }

    /// Advance animations by the time since the previous frame and draw
    /// the tree.
    pub fn draw(&mut self, target: &mut dyn RenderTarget) {
        let now = Instant::now();
        if let Some(last) = self.last_frame {
            self.root.update_time(now - last);
        }
        self.last_frame = Some(now);

        self.root.draw_children(target, DrawStates::identity());
    }

    fn map(&self, pixel: Point) -> Point {
        self.view.map_pixel_to_coords(pixel)
    }
}

impl std::fmt::Debug for Gui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gui").field("root", &self.root).finish()
    }
}
