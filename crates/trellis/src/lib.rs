//! Trellis - a retained-mode widget toolkit over a pluggable renderer.
//!
//! The toolkit keeps a tree of widgets, routes input events through
//! per-container dispatchers ([`widget::EventManager`]), tracks keyboard
//! focus, and issues draw calls to a [`RenderTarget`] supplied by the
//! embedding application. It never opens windows or rasterizes anything
//! itself.
//!
//! # Example
//!
//! ```no_run
//! use trellis::{Context, Gui};
//! use trellis::widget::widgets::Button;
//! use trellis::widget::{Trigger, Widget};
//!
//! let ctx = Context::new();
//! let mut gui = Gui::new(ctx.clone());
//!
//! let mut button = Button::new(&ctx, "Quit");
//! button.set_position((20.0, 20.0).into());
//! button.set_size((120.0, 32.0).into());
//! button.connect(Trigger::LeftMouseClicked, |_| println!("clicked"));
//! gui.add(Box::new(button), "quit");
//!
//! // In the event loop: gui.handle_event(..) and gui.draw(..).
//! ```

pub mod backend;
pub mod context;
pub mod error;
pub mod gui;
pub mod texture;
pub mod theme;
pub mod widget;

pub use backend::{DrawStates, RenderTarget, View};
pub use context::Context;
pub use error::{Error, Result};
pub use gui::Gui;
pub use texture::{Texture, TextureManager};
pub use theme::Theme;

pub use trellis_core::{Color, ConnectionId, Point, Rect, Signal, Size, WidgetId};
