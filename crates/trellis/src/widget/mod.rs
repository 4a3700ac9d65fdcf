//! Widget system.
//!
//! The retained widget tree is built from three pieces:
//!
//! - [`WidgetBase`], the state shared by all widgets, embedded by value
//! - [`Widget`], the trait the dispatcher and containers operate through
//! - [`ContainerBase`] + [`EventManager`], child storage and the per-level
//!   input router / focus state machine
//!
//! [`widgets`] holds the concrete widget implementations.

pub mod base;
pub mod callback;
pub mod container;
pub mod dispatcher;
pub mod events;
pub mod traits;
pub mod widgets;


pub use base::{WidgetBase, WidgetPhases};
pub use callback::{CallbackArgs, Callbacks, Trigger};
pub use container::ContainerBase;
pub use dispatcher::{EventManager, WidgetList};
pub use events::{
    Event, Key, KeyEvent, MouseButton, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent,
    TextEvent,
};
pub use traits::Widget;
